//! Simulation tick
//!
//! Advances a round by one step of caller-chosen length. Any scheduler can
//! drive it: the runner's fixed step, a variable frame time, or a test.

use super::collision::overlaps;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::ScoringMode;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (starts the round when idle)
    pub flap: bool,
    /// Discard the round and start over
    pub restart: bool,
    /// Let the computer fly
    pub autopilot: bool,
}

/// Advance the round by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart {
        state.restart();
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        input.flap |= autopilot_wants_flap(state);
    }

    state.flash_ticks = state.flash_ticks.saturating_sub(1);

    if input.flap {
        match state.phase {
            GamePhase::Idle => {
                if let Some(event) = state.avatar.start(&state.config) {
                    state.events.push(event);
                }
                state.phase = GamePhase::Active;
                log::info!("Round started (seed {})", state.seed);
            }
            GamePhase::Active => {
                if let Some(event) = state.avatar.flap(&state.config) {
                    state.events.push(event);
                }
            }
            GamePhase::Dead => {}
        }
    }

    match state.phase {
        GamePhase::Idle => state.title.update(),

        GamePhase::Active => {
            state.time_ticks += 1;

            // Obstacles freeze once the player loses control
            if state.avatar.moving() {
                state.obstacles.advance(dt);
                state.obstacles.maybe_spawn(&state.config, &mut state.rng);
                state.obstacles.retire();
            }

            let was_moving = state.avatar.moving();
            if let Some(event) = state.avatar.advance(dt, &state.config) {
                state.events.push(event);
            }

            if state.avatar.moving() {
                let struck = state.obstacles.bodies().any(|body| overlaps(&state.avatar, &body));
                if struck {
                    if let Some(event) = state.avatar.strike(&state.config) {
                        log::debug!("Avatar struck an obstacle at y={:.1}", state.avatar.pos.y);
                        state.events.push(event);
                    }
                }
            }

            if state.avatar.moving() {
                check_score(state);
            }

            if was_moving && !state.avatar.moving() {
                state.begin_flash();
            }

            if state.avatar.dead() {
                state.phase = GamePhase::Dead;
                log::info!("Round over: score {} after {} ticks", state.score, state.time_ticks);
            }
        }

        GamePhase::Dead => {}
    }
}

/// Award a point when the avatar's leading edge clears the tracked pair
fn check_score(state: &mut GameState) {
    let leading_edge = state.avatar.pos.x + state.avatar.radius;
    let clearance = state.config.score_clearance;

    let pair = match state.config.scoring_mode {
        ScoringMode::NewestPair => Some(state.obstacles.latest_mut()),
        ScoringMode::Sequential => state.obstacles.next_unscored_mut(),
    };

    if let Some(pair) = pair {
        if !pair.scored && leading_edge > pair.trailing_edge(clearance) {
            pair.scored = true;
            state.score += 1;
            state.events.push(GameEvent::Point);
            log::debug!("Scored pair {} (score {})", pair.id, state.score);
        }
    }
}

/// Fraction of the gap the autopilot keeps between itself and the floor
const AUTOPILOT_FLOOR_MARGIN: f32 = 0.15;

/// Flap when falling below the gap ahead, or to start the round
fn autopilot_wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Idle => true,
        GamePhase::Dead => false,
        GamePhase::Active => {
            let avatar = &state.avatar;
            if !avatar.moving() || avatar.velocity > 0.0 {
                return false;
            }
            let target = state
                .obstacles
                .next_ahead_of(avatar.pos.x - avatar.radius)
                .map(|pair| pair.gap_floor() + avatar.radius + AUTOPILOT_FLOOR_MARGIN * pair.gap)
                .unwrap_or(0.5 * state.config.screen_height);
            avatar.pos.y < target
        }
    }
}
