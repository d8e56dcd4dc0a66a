//! Flappy Sim - deterministic core of a flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, obstacle stream, round state)
//! - `config`: Tuning constants and layout, loadable from JSON
//! - `audio`: Fire-and-forget sound effect dispatch
//! - `runner`: Frame loop glue (input latch, fixed timestep, audio)

pub mod audio;
pub mod config;
pub mod runner;
pub mod sim;

pub use config::{Config, ScoringMode};
pub use runner::Runner;

/// Game configuration constants (defaults for [`Config`])
pub mod consts {
    /// Fixed simulation timestep used by the runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 500.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Avatar start position as fractions of the playfield
    pub const AVATAR_START_X_FRAC: f32 = 0.5;
    pub const AVATAR_START_Y_FRAC: f32 = 0.6;
    /// Collision radius of the avatar
    pub const AVATAR_RADIUS: f32 = 10.0;

    /// Downward acceleration (velocity units per second)
    pub const GRAVITY: f32 = 50.0;
    /// Velocity set by a flap
    pub const FLAP_IMPULSE: f32 = 16.0;
    /// Upward velocity left after bouncing off an obstacle
    pub const COLLISION_RESIDUAL_VELOCITY: f32 = 5.0;
    /// Height above the floor (plus radius) that counts as ground contact
    pub const GROUND_MARGIN: f32 = 2.0;
    /// Velocity is measured in pixels per frame at this rate
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Rotation degrees per unit of velocity
    pub const ANGLE_PER_VELOCITY: f32 = 3.0;
    /// Velocity at or below which the avatar is drawn fully nose-down
    pub const DIVE_VELOCITY: f32 = -15.0;
    /// Nose-down rotation in degrees
    pub const DIVE_ANGLE: f32 = -45.0;

    /// Vertical opening between the two bodies of a pair
    pub const OBSTACLE_GAP: f32 = 200.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HALF_HEIGHT: f32 = 642.0;
    /// Horizontal velocity of every pair (pixels/s, leftward)
    pub const OBSTACLE_VELOCITY: f32 = -250.0;
    /// Range for the y of the bottom body's top edge
    pub const GAP_FLOOR_MIN: f32 = 100.0;
    pub const GAP_FLOOR_MAX: f32 = 450.0;

    /// New pairs appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 80.0;
    /// A new pair spawns once the latest is this far left of the right edge
    pub const SPAWN_TRIGGER_DISTANCE: f32 = 300.0;
    /// Pairs left of this x are retired
    pub const RETIRE_X: f32 = -30.0;

    /// Extra distance past a pair's trailing edge before it scores
    pub const SCORE_CLEARANCE: f32 = 3.0;

    /// Frame rate below which a slow-frame warning is logged
    pub const MIN_HEALTHY_FPS: u32 = 30;
    /// Displayed frame rate refreshes every this many frames
    pub const FPS_REFRESH_FRAMES: u64 = 5;
    /// Ticks the white impact flash stays up
    pub const FLASH_TICKS: u32 = 5;
}
