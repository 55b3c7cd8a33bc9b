//! Fixed timestep simulation steps
//!
//! Two independent steps drive a run:
//! - [`tick`]: obstacles, spawning, score, speed and collisions (60 Hz)
//! - [`step_player`]: vertical player motion from held intents (62.5 Hz)
//!
//! Both are no-ops outside [`GamePhase::Running`].

use super::collision::find_collision;
use super::motion::{advance_obstacles, move_player};
use super::spawn::spawn_obstacle;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the run by one simulation tick.
///
/// Order within a tick: filter and advance obstacles, roll the spawner,
/// bump score and speed, then check collisions against whatever player
/// position is current. A hit ends the run before returning.
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    advance_obstacles(
        &mut state.obstacles,
        state.speed,
        state.tuning.obstacle_rotation_step,
        state.tuning.obstacle_size,
    );
    spawn_obstacle(state);

    state.score += 1;
    state.speed = state.tuning.speed_at(state.time_ticks);

    if let Some(contact) = find_collision(state) {
        state.phase = GamePhase::Over;
        log::info!(
            "Game over at tick {} (score {}, overlap {:.1}x{:.1})",
            state.time_ticks,
            state.score,
            contact.overlap.x,
            contact.overlap.y
        );
        let score = state.score;
        state.emit(GameEvent::GameOver { score });
    }
}

/// Advance the player by one motion step using the held intents
pub fn step_player(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    let max_y = state.tuning.player_max_y();
    move_player(
        &mut state.player,
        state.intent,
        state.tuning.player_move_speed,
        max_y,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_probability: 0.0,
            ..Default::default()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(12345, tuning).unwrap();
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut state = GameState::new(1);
        tick(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);

        state.start();
        state.toggle_pause();
        tick(&mut state);
        assert_eq!(state.score, 0);

        state.phase = GamePhase::Over;
        tick(&mut state);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_and_speed_ramp() {
        let mut state = running(quiet_tuning());
        let increment = state.tuning.speed_increment;
        for expected in 1..=120u64 {
            let before = state.speed;
            tick(&mut state);
            assert_eq!(state.score, expected);
            assert!((state.speed - before - increment).abs() < 1e-5);
        }
    }

    #[test]
    fn test_speed_does_not_drift_on_long_runs() {
        let mut state = running(quiet_tuning());
        state.time_ticks = 999_999;
        state.score = 999_999;
        tick(&mut state);
        assert_eq!(state.time_ticks, 1_000_000);
        assert_eq!(state.speed, 1008.0);
    }

    #[test]
    fn test_forced_spawn_lands_at_field_edge() {
        let tuning = Tuning {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let mut state = running(tuning);
        tick(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, state.tuning.field_width);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_obstacles_move_at_current_speed() {
        let mut state = running(quiet_tuning());
        state.obstacles.push(Obstacle::new(Vec2::new(900.0, 0.0)));
        state.speed = 10.0;
        tick(&mut state);
        assert_eq!(state.obstacles[0].pos.x, 890.0);
        assert_eq!(state.obstacles[0].rotation, state.tuning.obstacle_rotation_step);
    }

    #[test]
    fn test_deep_hit_ends_run() {
        let mut state = running(quiet_tuning());
        // Lands at x=110 after one tick at speed 8; hitbox (120,330)-(140,350)
        state.obstacles.push(Obstacle::new(Vec2::new(118.0, 320.0)));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 1 }]);

        // No further ticks once over
        tick(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_shallow_hit_keeps_running() {
        let mut state = running(quiet_tuning());
        // After one tick x=137; hitbox (147,320)-(167,340) overlaps the
        // player hitbox (110..150) by only 3 units horizontally
        state.obstacles.push(Obstacle::new(Vec2::new(145.0, 310.0)));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_step_player_follows_intent() {
        let mut state = running(quiet_tuning());
        state.set_moving_up(true);
        step_player(&mut state);
        assert_eq!(state.player.pos.y, 290.0);

        state.set_moving_up(false);
        state.set_moving_down(true);
        step_player(&mut state);
        step_player(&mut state);
        assert_eq!(state.player.pos.y, 310.0);
    }

    #[test]
    fn test_step_player_frozen_when_paused() {
        let mut state = running(quiet_tuning());
        state.set_moving_down(true);
        state.toggle_pause();
        step_player(&mut state);
        assert_eq!(state.player.pos.y, 300.0);
    }

    #[test]
    fn test_pause_resume_preserves_state() {
        let mut state = running(Tuning::default());
        for _ in 0..200 {
            tick(&mut state);
        }
        if state.phase != GamePhase::Running {
            state.restart();
        }
        let score = state.score;
        let speed = state.speed;
        let obstacles = state.obstacles.clone();
        let player = state.player.clone();

        state.toggle_pause();
        tick(&mut state);
        step_player(&mut state);
        state.toggle_pause();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, score);
        assert_eq!(state.speed, speed);
        assert_eq!(state.obstacles, obstacles);
        assert_eq!(state.player, player);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        for i in 0..600 {
            let up = (i / 40) % 2 == 0;
            for state in [&mut state1, &mut state2] {
                state.set_moving_up(up);
                state.set_moving_down(!up);
                tick(state);
                step_player(state);
            }
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player, state2.player);
    }
}
