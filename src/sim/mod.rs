//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collision;
pub mod frame_stats;
pub mod obstacle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, Flight};
pub use collision::{Body, Shape, overlaps};
pub use frame_stats::FrameStats;
pub use obstacle::{ObstacleBody, ObstaclePair, ObstacleStream, Side};
pub use snapshot::{AvatarView, BodyView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, Hud, TitleBob};
pub use tick::{TickInput, tick};
