//! Carpet Dodge - A side-scrolling obstacle avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `driver`: Fixed-rate clocks that feed the simulation while running
//! - `input`: Key names to intent flags and commands
//! - `snapshot`: Read-only projection of the run for renderers
//! - `audio`: Audio cues for state transitions
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod driver;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use driver::{FixedStep, Session};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use tuning::{Insets, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (obstacles, score, speed)
    pub const SIM_HZ: f32 = 60.0;
    /// Player motion rate (one step every 16 ms)
    pub const PLAYER_HZ: f32 = 62.5;
    /// Largest frame delta fed into the drivers (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per driver per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Fastest driver rate a clamped frame can keep up with
    pub const MAX_DRIVER_HZ: f32 = MAX_SUBSTEPS as f32 / MAX_FRAME_DT;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1100.0;
    pub const LANE_HEIGHT: f32 = 600.0;

    /// Player (carpet) defaults
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const PLAYER_START_X: f32 = 80.0;
    pub const PLAYER_START_Y: f32 = LANE_HEIGHT / 2.0;
    pub const PLAYER_MOVE_SPEED: f32 = 10.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// Degrees per tick
    pub const OBSTACLE_ROTATION_STEP: f32 = 5.0;

    /// Scroll speed (units per tick) and its per-tick ramp
    pub const INITIAL_SPEED: f32 = 8.0;
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Bernoulli spawn chance per tick (~one obstacle every 25 ticks)
    pub const SPAWN_PROBABILITY: f64 = 0.04;

    /// Hitbox insets. The carpet sprite has empty space around the rider.
    pub const PLAYER_INSET_X: f32 = 30.0;
    pub const PLAYER_INSET_TOP: f32 = 15.0;
    pub const PLAYER_INSET_BOTTOM: f32 = 30.0;
    pub const OBSTACLE_INSET: f32 = 10.0;

    /// Minimum overlap on both axes before a contact ends the run
    pub const COLLISION_THRESHOLD: f32 = 5.0;
}
