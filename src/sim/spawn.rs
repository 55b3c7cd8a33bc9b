//! Obstacle spawner
//!
//! One Bernoulli trial per simulation tick. There is no cap on live
//! obstacles: offscreen ones are filtered every tick before new ones appear,
//! which keeps the count bounded by how many fit across the field.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle};

/// Roll for a new obstacle at the right edge. Returns true if one spawned.
pub fn spawn_obstacle(state: &mut GameState) -> bool {
    if !state.rng.random_bool(state.tuning.spawn_probability) {
        return false;
    }

    let span = state.tuning.lane_height - state.tuning.obstacle_size;
    let y = if span > 0.0 {
        state.rng.random_range(0.0..span)
    } else {
        0.0
    };
    state
        .obstacles
        .push(Obstacle::new(Vec2::new(state.tuning.field_width, y)));
    log::debug!(
        "Spawned obstacle at y={:.1} ({} live)",
        y,
        state.obstacles.len()
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state_with_probability(p: f64) -> GameState {
        let tuning = Tuning {
            spawn_probability: p,
            ..Default::default()
        };
        GameState::with_tuning(7, tuning).unwrap()
    }

    #[test]
    fn test_certain_spawn_at_right_edge() {
        let mut state = state_with_probability(1.0);
        assert!(spawn_obstacle(&mut state));
        assert_eq!(state.obstacles.len(), 1);

        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.pos.x, state.tuning.field_width);
        assert_eq!(obstacle.rotation, 0.0);
        let max_y = state.tuning.lane_height - state.tuning.obstacle_size;
        assert!(obstacle.pos.y >= 0.0 && obstacle.pos.y < max_y);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut state = state_with_probability(0.0);
        for _ in 0..1000 {
            assert!(!spawn_obstacle(&mut state));
        }
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawns_append_in_order() {
        let mut state = state_with_probability(1.0);
        for _ in 0..5 {
            spawn_obstacle(&mut state);
        }
        assert_eq!(state.obstacles.len(), 5);
        assert!(state.obstacles.iter().all(|o| o.pos.x == state.tuning.field_width));
    }

    #[test]
    fn test_default_rate_near_expected() {
        let mut state = GameState::new(2024);
        let trials = 20_000;
        let spawned = (0..trials).filter(|_| spawn_obstacle(&mut state)).count();
        let rate = spawned as f64 / trials as f64;
        assert!((rate - 0.04).abs() < 0.01, "rate {}", rate);
    }

    #[test]
    fn test_same_seed_same_positions() {
        let mut a = state_with_probability(1.0);
        let mut b = state_with_probability(1.0);
        for _ in 0..10 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        assert_eq!(a.obstacles, b.obstacles);
    }
}
