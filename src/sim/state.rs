//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of everything that changes during a run.
//! Phase transitions happen only through its command methods and through
//! [`tick`](super::tick::tick); any (phase, command) pair that makes no sense
//! is a no-op.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hitbox::Rect;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended by a collision
    Over,
}

/// Transition notifications for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    PauseToggled { paused: bool },
    GameOver { score: u64 },
    Restarted,
}

/// Held directional controls, polled by the player-motion step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
}

/// The player's carpet
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner; x never changes after placement
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_y),
            size: tuning.player_size,
        }
    }

    /// Collidable box (sprite box shrunk by the player insets)
    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        Rect::square(self.pos, self.size).inset(&tuning.player_insets)
    }
}

/// An obstacle flying toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Degrees, grows every tick, never wrapped
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, rotation: 0.0 }
    }

    /// Collidable box (sprite box shrunk by the obstacle insets)
    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        Rect::square(self.pos, tuning.obstacle_size).inset(&tuning.obstacle_insets)
    }

    /// True once the obstacle has fully left the playfield on the left
    #[inline]
    pub fn is_offscreen(&self, size: f32) -> bool {
        self.pos.x <= -size
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawner randomness; continues across restarts
    pub(crate) rng: Pcg32,
    /// Balance values, validated at construction
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// One point per simulation tick survived
    pub score: u64,
    /// Current scroll speed (units per tick)
    pub speed: f32,
    /// Simulation ticks processed in this run
    pub time_ticks: u64,
    /// Player carpet
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Held directions
    pub intent: Intent,
    /// Notifications not yet collected by adapters
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game, rejecting tuning that breaks simulation preconditions
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            speed: tuning.initial_speed,
            time_ticks: 0,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            intent: Intent::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        self.emit(GameEvent::Started);
        log::info!("Run started");
        true
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        let paused = match self.phase {
            GamePhase::Running => true,
            GamePhase::Paused => false,
            GamePhase::Idle | GamePhase::Over => return false,
        };
        self.phase = if paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        };
        self.emit(GameEvent::PauseToggled { paused });
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        true
    }

    /// Hard reset from any phase straight into Running
    pub fn restart(&mut self) {
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.time_ticks = 0;
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.phase = GamePhase::Running;
        self.emit(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    pub fn set_moving_up(&mut self, held: bool) {
        self.intent.up = held;
    }

    pub fn set_moving_down(&mut self, held: bool) {
        self.intent.down = held;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
