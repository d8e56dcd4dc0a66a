//! Round state and core simulation types
//!
//! One `GameState` is one round: avatar, obstacle stream, score, phase and
//! the seeded RNG that lays out the obstacles.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::frame_stats::FrameStats;
use super::obstacle::ObstacleStream;
use crate::config::Config;
use crate::consts::FLASH_TICKS;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Avatar waiting at the start, title showing
    Idle,
    /// Round in progress (including the fall after hitting an obstacle)
    Active,
    /// Avatar on the ground, waiting for restart
    Dead,
}

/// Side effects produced by a tick, emitted once on the transition that
/// causes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Avatar flapped
    Flap,
    /// Avatar struck an obstacle or the ground
    Hit,
    /// Avatar cleared a pair
    Point,
}

/// What the overlay should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hud {
    /// Title card, before the first flap
    Title,
    /// White impact flash right after control is lost
    Flash,
    /// Running score
    Score,
    /// Final score and restart prompt
    GameOver,
}

/// Bobbing title decoration shown while idle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleBob {
    /// Phase in degrees
    pub phase: f32,
    /// Vertical offset from the title's rest position
    pub offset: f32,
}

impl TitleBob {
    pub fn update(&mut self) {
        self.phase += 5.0;
        self.offset += self.phase.to_radians().sin() * 0.5;
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter for this round
    pub time_ticks: u64,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Ticks of impact flash left
    pub flash_ticks: u32,
    /// Decoration, not gameplay-affecting
    pub title: TitleBob,
    /// Diagnostics, not gameplay-affecting
    pub frame_stats: FrameStats,
}

impl GameState {
    /// Create a new idle round with the given seed. An unplayable config is
    /// replaced by the defaults.
    pub fn new(config: Config, seed: u64) -> Self {
        let config = config.or_default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let avatar = Avatar::new(&config);
        let obstacles = ObstacleStream::new(&config, &mut rng);
        Self {
            config,
            seed,
            rng,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            avatar,
            obstacles,
            events: Vec::new(),
            flash_ticks: 0,
            title: TitleBob::default(),
            frame_stats: FrameStats::default(),
        }
    }

    /// Throw away the round and start a fresh idle one.
    ///
    /// The RNG carries on so the next layout differs; frame stats survive
    /// since they describe the host loop, not the round.
    pub fn restart(&mut self) {
        self.avatar = Avatar::new(&self.config);
        self.obstacles = ObstacleStream::new(&self.config, &mut self.rng);
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.flash_ticks = 0;
        self.title = TitleBob::default();
        log::info!("Round restarted");
    }

    /// Feed one host frame into the frame-rate diagnostics
    pub fn record_frame(&mut self, dt: f32) {
        self.frame_stats.record(dt, self.config.min_healthy_fps);
    }

    /// Approximate frames per second for display
    pub fn fps(&self) -> u32 {
        self.frame_stats.fps
    }

    pub fn hud(&self) -> Hud {
        if self.avatar.started() && !self.avatar.moving() && self.flash_ticks > 0 {
            Hud::Flash
        } else if self.avatar.dead() {
            Hud::GameOver
        } else if self.avatar.started() {
            Hud::Score
        } else {
            Hud::Title
        }
    }

    /// Start the impact flash
    pub(crate) fn begin_flash(&mut self) {
        self.flash_ticks = FLASH_TICKS;
    }
}
