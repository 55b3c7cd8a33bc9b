//! Property tests for the simulation invariants

use carpet_dodge::Tuning;
use carpet_dodge::sim::{GamePhase, GameState, Obstacle, step_player, tick};
use glam::Vec2;
use proptest::prelude::*;

fn running(seed: u64, tuning: Tuning) -> GameState {
    let mut state = GameState::with_tuning(seed, tuning).expect("valid tuning");
    state.start();
    state
}

proptest! {
    #[test]
    fn player_stays_in_lane(
        start_y in 0.0f32..=500.0,
        intents in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400),
    ) {
        let tuning = Tuning {
            player_start_y: start_y,
            spawn_probability: 0.0,
            ..Default::default()
        };
        let max_y = tuning.player_max_y();
        let mut state = running(1, tuning);

        for (up, down) in intents {
            state.set_moving_up(up);
            state.set_moving_down(down);
            step_player(&mut state);
            prop_assert!(state.player.pos.y >= 0.0 && state.player.pos.y <= max_y);
            prop_assert_eq!(state.player.pos.x, 80.0);
        }
    }

    #[test]
    fn live_obstacles_stay_on_field(
        seed in any::<u64>(),
        spawn_probability in 0.0f64..=1.0,
        ticks in 1usize..800,
    ) {
        let tuning = Tuning {
            spawn_probability,
            // Keep the run alive regardless of what spawns
            collision_threshold: 1000.0,
            ..Default::default()
        };
        let size = tuning.obstacle_size;
        let field_width = tuning.field_width;
        let mut state = running(seed, tuning);

        for _ in 0..ticks {
            let speed = state.speed;
            let survivors: Vec<Vec2> = state
                .obstacles
                .iter()
                .map(|o| o.pos)
                .filter(|p| p.x > -size && p.x - speed > -size)
                .collect();
            tick(&mut state);
            prop_assert!(state.obstacles.iter().all(|o| o.pos.x > -size));
            prop_assert!(state.obstacles.iter().all(|o| o.pos.x <= field_width));
            // Survivors keep their order and lane and only move left
            prop_assert!(state.obstacles.len() >= survivors.len());
            for (old, new) in survivors.iter().zip(&state.obstacles) {
                prop_assert_eq!(new.pos.x, old.x - speed);
                prop_assert_eq!(new.pos.y, old.y);
            }
        }
        prop_assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn score_and_speed_grow_every_tick(seed in any::<u64>(), ticks in 1usize..300) {
        let tuning = Tuning {
            collision_threshold: 1000.0,
            ..Default::default()
        };
        let increment = tuning.speed_increment;
        let mut state = running(seed, tuning);

        for _ in 0..ticks {
            let (score, speed) = (state.score, state.speed);
            tick(&mut state);
            prop_assert_eq!(state.score, score + 1);
            prop_assert!((state.speed - speed - increment).abs() < 1e-5);
            prop_assert!(state.speed >= state.tuning.initial_speed);
        }
    }

    #[test]
    fn run_ends_only_on_deep_overlap(dx in -60.0f32..60.0, dy in -70.0f32..70.0) {
        let tuning = Tuning {
            spawn_probability: 0.0,
            ..Default::default()
        };
        let mut state = running(1, tuning);
        let speed = state.speed;

        // Obstacle lands at (110 + dx, 320 + dy) after scrolling one tick
        let landed = Vec2::new(110.0 + dx, 320.0 + dy);
        state.obstacles.push(Obstacle::new(landed + Vec2::new(speed, 0.0)));
        tick(&mut state);

        let player = state.player.hitbox(&state.tuning);
        let obstacle = state.obstacles[0].hitbox(&state.tuning);
        let overlap_x = player.right.min(obstacle.right) - player.left.max(obstacle.left);
        let overlap_y = player.bottom.min(obstacle.bottom) - player.top.max(obstacle.top);
        let threshold = state.tuning.collision_threshold;
        let expected_hit = overlap_x > threshold && overlap_y > threshold;

        prop_assert_eq!(state.phase == GamePhase::Over, expected_hit);
    }

    #[test]
    fn restart_always_resets(seed in any::<u64>(), ticks in 0usize..400) {
        let mut state = running(seed, Tuning::default());
        for _ in 0..ticks {
            tick(&mut state);
        }
        state.restart();

        prop_assert_eq!(state.phase, GamePhase::Running);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.speed, state.tuning.initial_speed);
        prop_assert!(state.obstacles.is_empty());
        prop_assert_eq!(state.player.pos, Vec2::new(80.0, 300.0));
    }
}
