//! Demo-mode autopilot
//!
//! An extra for attract screens and headless balance runs; normal play never
//! consults it.
//!
//! Picks held directions from the current state only, so a demo run stays
//! deterministic for a given seed. It is a simple dodger, not a solver: it
//! reacts to the closest obstacle that would cross the player's band.

use super::hitbox::Rect;
use super::state::{GameState, Intent};

/// How far ahead (in simulation ticks) an obstacle counts as a threat
const LOOKAHEAD_TICKS: f32 = 40.0;
/// Extra vertical clearance kept around the player hitbox
const CLEARANCE: f32 = 12.0;

/// Choose held directions for the next player-motion step
pub fn steer(state: &GameState) -> Intent {
    let tuning = &state.tuning;
    let player_box = state.player.hitbox(tuning);
    let horizon = player_box.right + state.speed * LOOKAHEAD_TICKS;

    let threat = state
        .obstacles
        .iter()
        .map(|o| o.hitbox(tuning))
        .filter(|b| b.right > player_box.left && b.left < horizon)
        .filter(|b| b.top < player_box.bottom + CLEARANCE && b.bottom > player_box.top - CLEARANCE)
        .min_by(|a, b| a.left.total_cmp(&b.left));

    let Some(threat) = threat else {
        return drift_to_center(state);
    };

    let y = state.player.pos.y;
    let max_y = tuning.player_max_y();
    let threat_center = (threat.top + threat.bottom) * 0.5;
    let player_center = (player_box.top + player_box.bottom) * 0.5;

    // Dodge away from the obstacle's center, unless pinned against an edge
    let go_up = if y <= 0.0 {
        false
    } else if y >= max_y {
        true
    } else {
        threat_center >= player_center || room_below(&player_box, tuning.lane_height) < threat.height()
    };

    Intent {
        up: go_up,
        down: !go_up,
    }
}

fn room_below(player_box: &Rect, lane_height: f32) -> f32 {
    lane_height - player_box.bottom
}

/// Ease back toward the middle of the lane when nothing is incoming
fn drift_to_center(state: &GameState) -> Intent {
    let tuning = &state.tuning;
    let target = tuning.player_max_y() * 0.5;
    let offset = state.player.pos.y - target;
    if offset.abs() <= tuning.player_move_speed {
        return Intent::default();
    }
    Intent {
        up: offset > 0.0,
        down: offset < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::sim::{step_player, tick};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_idle_at_center_without_threats() {
        let mut state = GameState::new(1);
        state.player.pos.y = state.tuning.player_max_y() * 0.5;
        assert_eq!(steer(&state), Intent::default());
    }

    #[test]
    fn test_drifts_back_to_center() {
        let mut state = GameState::new(1);
        state.player.pos.y = 0.0;
        let intent = steer(&state);
        assert!(intent.down && !intent.up);
    }

    #[test]
    fn test_dodges_obstacle_below_center_by_going_up() {
        let mut state = GameState::new(1);
        // Player hitbox y 315..370 (center 342.5); obstacle hitbox 350..370
        state.obstacles.push(Obstacle::new(Vec2::new(300.0, 340.0)));
        let intent = steer(&state);
        assert!(intent.up && !intent.down);
    }

    #[test]
    fn test_pinned_at_top_goes_down() {
        let mut state = GameState::new(1);
        state.player.pos.y = 0.0;
        state.obstacles.push(Obstacle::new(Vec2::new(300.0, 20.0)));
        let intent = steer(&state);
        assert!(intent.down && !intent.up);
    }

    #[test]
    fn test_ignores_obstacles_already_passed() {
        let mut state = GameState::new(1);
        state.player.pos.y = state.tuning.player_max_y() * 0.5;
        state.obstacles.push(Obstacle::new(Vec2::new(0.0, 250.0)));
        assert_eq!(steer(&state), Intent::default());
    }

    #[test]
    fn test_single_incoming_obstacle_is_avoided() {
        let tuning = Tuning {
            spawn_probability: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(3, tuning).unwrap();
        state.start();
        // Head-on at the player's hitbox center
        state.obstacles.push(Obstacle::new(Vec2::new(600.0, 322.0)));
        for _ in 0..120 {
            state.intent = steer(&state);
            step_player(&mut state);
            tick(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }
}
