//! Collision detection between the player and obstacles
//!
//! Hitboxes are the sprite boxes shrunk by per-entity insets. Two hitboxes
//! only end the run if they overlap by more than a threshold on both axes,
//! so grazing contact is forgiven.

use glam::Vec2;

use super::hitbox::Rect;
use super::state::GameState;

/// A qualifying contact between the player and one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Position of the obstacle in the live collection
    pub index: usize,
    /// Overlap depth on each axis
    pub overlap: Vec2,
}

/// Overlap depth if the boxes intersect deeply enough on both axes
pub fn significant_overlap(a: &Rect, b: &Rect, threshold: f32) -> Option<Vec2> {
    if !a.intersects(b) {
        return None;
    }
    let overlap = a.overlap(b);
    (overlap.x > threshold && overlap.y > threshold).then_some(overlap)
}

/// First obstacle (in collection order) that hits the player, if any
pub fn find_collision(state: &GameState) -> Option<Contact> {
    let tuning = &state.tuning;
    let player_box = state.player.hitbox(tuning);

    state
        .obstacles
        .iter()
        .enumerate()
        .find_map(|(index, obstacle)| {
            significant_overlap(&player_box, &obstacle.hitbox(tuning), tuning.collision_threshold)
                .map(|overlap| Contact { index, overlap })
        })
}
