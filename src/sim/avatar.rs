//! The player-controlled falling body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Shape};
use super::state::GameEvent;
use crate::config::Config;
use crate::consts::{ANGLE_PER_VELOCITY, DIVE_ANGLE, DIVE_VELOCITY};

/// Where the avatar is in its life
///
/// The public `started`/`moving`/`dead` flags are derived from this, so
/// "dead implies not moving" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flight {
    /// Hovering at the start position, no physics
    Waiting,
    /// Under player control
    Flying,
    /// Bounced off an obstacle, falling with no control
    Stunned,
    /// On the ground
    Landed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Vertical velocity, in pixels per reference frame (up is positive)
    pub velocity: f32,
    /// Visual rotation in degrees (nose up is positive)
    pub angle: f32,
    pub radius: f32,
    pub flight: Flight,
}

impl Avatar {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec2::new(config.avatar_start_x(), config.avatar_start_y()),
            velocity: 0.0,
            angle: 0.0,
            radius: config.avatar_radius,
            flight: Flight::Waiting,
        }
    }

    /// Round has begun for this avatar
    #[inline]
    pub fn started(&self) -> bool {
        self.flight != Flight::Waiting
    }

    /// Player still in control
    #[inline]
    pub fn moving(&self) -> bool {
        self.flight == Flight::Flying
    }

    #[inline]
    pub fn dead(&self) -> bool {
        self.flight == Flight::Landed
    }

    /// Leave the start position and take the first flap
    pub fn start(&mut self, config: &Config) -> Option<GameEvent> {
        if self.flight != Flight::Waiting {
            return None;
        }
        self.flight = Flight::Flying;
        self.flap(config)
    }

    /// Upward impulse. Ignored unless the player is in control.
    pub fn flap(&mut self, config: &Config) -> Option<GameEvent> {
        if !self.moving() {
            return None;
        }
        self.velocity = config.flap_impulse;
        Some(GameEvent::Flap)
    }

    /// Integrate one step of motion.
    ///
    /// The ground check looks at the position left by the previous step, then
    /// this step still integrates, so the avatar can sink below the floor on
    /// the tick it lands. Returns `Hit` only when the player was still in
    /// control; an avatar already stunned by an obstacle lands silently.
    pub fn advance(&mut self, dt: f32, config: &Config) -> Option<GameEvent> {
        if !self.started() || self.dead() {
            return None;
        }

        let mut event = None;
        if self.pos.y <= config.ground_y() {
            if self.moving() {
                event = Some(GameEvent::Hit);
            }
            self.flight = Flight::Landed;
        }

        self.velocity -= config.gravity * dt;
        self.pos.y += self.velocity * dt * config.reference_frame_rate;
        self.angle = angle_for_velocity(self.velocity);

        event
    }

    /// React to touching an obstacle: lose control and pop up slightly.
    pub fn strike(&mut self, config: &Config) -> Option<GameEvent> {
        if !self.moving() {
            return None;
        }
        self.flight = Flight::Stunned;
        self.velocity = config.collision_residual_velocity;
        Some(GameEvent::Hit)
    }
}

impl Body for Avatar {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::Circle { radius: self.radius }
    }
}

/// Presentational tilt: proportional to velocity, clamped when diving
#[inline]
pub fn angle_for_velocity(velocity: f32) -> f32 {
    if velocity > DIVE_VELOCITY {
        ANGLE_PER_VELOCITY * velocity
    } else {
        DIVE_ANGLE
    }
}
