//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod hitbox;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, find_collision, significant_overlap};
pub use hitbox::Rect;
pub use state::{GameEvent, GamePhase, GameState, Intent, Obstacle, Player};
pub use tick::{step_player, tick};
