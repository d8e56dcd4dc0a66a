//! Read-only view of a round for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::obstacle::Side;
use super::state::{GamePhase, GameState, Hud};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvatarView {
    pub pos: Vec2,
    /// Degrees, nose up positive
    pub angle: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub size: Vec2,
    pub side: Side,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub hud: Hud,
    pub score: u32,
    pub fps: u32,
    pub avatar: AvatarView,
    pub obstacles: Vec<BodyView>,
    /// Title bob offset, only meaningful while idle
    pub title_offset: f32,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            hud: self.hud(),
            score: self.score,
            fps: self.fps(),
            avatar: AvatarView {
                pos: self.avatar.pos,
                angle: self.avatar.angle,
                radius: self.avatar.radius,
            },
            obstacles: self
                .obstacles
                .bodies()
                .map(|body| BodyView {
                    pos: body.pos,
                    size: body.half_extents * 2.0,
                    side: body.side,
                })
                .collect(),
            title_offset: self.title.offset,
        }
    }
}
