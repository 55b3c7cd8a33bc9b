//! Read-only view of a run for renderers
//!
//! Renderers never touch [`GameState`]; they get a detached copy of exactly
//! what they draw each frame.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotation: f32,
}

/// Everything a frame needs, in spawn order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub speed: f32,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            speed: state.speed,
            player: PlayerView {
                x: state.player.pos.x,
                y: state.player.pos.y,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.pos.x,
                    y: o.pos.y,
                    rotation: o.rotation,
                })
                .collect(),
        }
    }

    /// Horizontal backdrop scroll in pixels (one pixel per point)
    pub fn backdrop_offset(&self) -> f32 {
        -(self.score as f32)
    }
}
