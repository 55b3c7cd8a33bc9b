//! Motion integration for obstacles and the player

use super::state::{Intent, Obstacle, Player};

/// Drop obstacles that have left the field, then scroll and spin the rest.
///
/// An obstacle already at the removal boundary is dropped without being
/// advanced. One that crosses the boundary during this step is dropped too, so
/// every survivor satisfies `x > -size` when this returns.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32, rotation_step: f32, size: f32) {
    obstacles.retain_mut(|obstacle| {
        if obstacle.is_offscreen(size) {
            return false;
        }
        obstacle.pos.x -= speed;
        obstacle.rotation += rotation_step;
        !obstacle.is_offscreen(size)
    });
}

/// One player-motion step.
///
/// Up and down held together cancel out; the result is always clamped to
/// `[0, max_y]`.
pub fn move_player(player: &mut Player, intent: Intent, move_speed: f32, max_y: f32) {
    let direction = intent.down as i8 - intent.up as i8;
    if direction == 0 {
        return;
    }
    let y = player.pos.y + direction as f32 * move_speed;
    player.pos.y = y.clamp(0.0, max_y);
}
