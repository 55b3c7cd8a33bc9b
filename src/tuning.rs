//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`Tuning`]. Values are
//! checked once, when a game is constructed; the simulation itself never
//! re-validates them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Precondition violations reported when building a game
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be finite and greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite and not negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("spawn probability must be within [0, 1] (got {0})")]
    SpawnProbability(f64),
    #[error("lane height {lane_height} cannot fit a {what} of size {size}")]
    LaneTooShort {
        what: &'static str,
        lane_height: f32,
        size: f32,
    },
    #[error("player start y {y} is outside [0, {max}]")]
    StartOutOfLane { y: f32, max: f32 },
    #[error("{field} of {hz} Hz exceeds the {max} Hz a clamped frame can drain")]
    RateTooHigh {
        field: &'static str,
        hz: f32,
        max: f32,
    },
    #[error("{what} hitbox insets leave no collidable area")]
    EmptyHitbox { what: &'static str },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Shrinkage applied to each side of a sprite's box to get its hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn uniform(inset: f32) -> Self {
        Self {
            left: inset,
            right: inset,
            top: inset,
            bottom: inset,
        }
    }

    fn check(&self, what: &'static str, size: f32) -> Result<(), TuningError> {
        for (field, value) in [
            ("inset.left", self.left),
            ("inset.right", self.right),
            ("inset.top", self.top),
            ("inset.bottom", self.bottom),
        ] {
            non_negative(field, value as f64)?;
        }
        if self.left + self.right >= size || self.top + self.bottom >= size {
            return Err(TuningError::EmptyHitbox { what });
        }
        Ok(())
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal extent of the playfield; obstacles spawn here
    pub field_width: f32,
    /// Vertical extent of the lane the player moves in
    pub lane_height: f32,

    pub player_size: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,
    /// Units per player-motion tick
    pub player_move_speed: f32,
    pub player_insets: Insets,

    pub obstacle_size: f32,
    /// Degrees per simulation tick (cosmetic)
    pub obstacle_rotation_step: f32,
    pub obstacle_insets: Insets,

    /// Scroll speed at the start of a run (units per tick)
    pub initial_speed: f32,
    /// Added to the scroll speed every simulation tick
    pub speed_increment: f32,
    /// Chance of spawning one obstacle per simulation tick
    pub spawn_probability: f64,
    /// Overlap depth both axes must exceed for a hit
    pub collision_threshold: f32,

    pub sim_hz: f32,
    pub player_hz: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            lane_height: LANE_HEIGHT,

            player_size: PLAYER_SIZE,
            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_move_speed: PLAYER_MOVE_SPEED,
            player_insets: Insets {
                left: PLAYER_INSET_X,
                right: PLAYER_INSET_X,
                top: PLAYER_INSET_TOP,
                bottom: PLAYER_INSET_BOTTOM,
            },

            obstacle_size: OBSTACLE_SIZE,
            obstacle_rotation_step: OBSTACLE_ROTATION_STEP,
            obstacle_insets: Insets::uniform(OBSTACLE_INSET),

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            spawn_probability: SPAWN_PROBABILITY,
            collision_threshold: COLLISION_THRESHOLD,

            sim_hz: SIM_HZ,
            player_hz: PLAYER_HZ,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}

impl Tuning {
    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("field_width", self.field_width as f64)?;
        positive("lane_height", self.lane_height as f64)?;
        positive("player_size", self.player_size as f64)?;
        positive("obstacle_size", self.obstacle_size as f64)?;
        positive("player_move_speed", self.player_move_speed as f64)?;
        positive("initial_speed", self.initial_speed as f64)?;
        positive("sim_hz", self.sim_hz as f64)?;
        positive("player_hz", self.player_hz as f64)?;
        for (field, hz) in [("sim_hz", self.sim_hz), ("player_hz", self.player_hz)] {
            if hz > MAX_DRIVER_HZ {
                return Err(TuningError::RateTooHigh {
                    field,
                    hz,
                    max: MAX_DRIVER_HZ,
                });
            }
        }
        non_negative("player_start_x", self.player_start_x as f64)?;
        non_negative("speed_increment", self.speed_increment as f64)?;
        non_negative("collision_threshold", self.collision_threshold as f64)?;
        non_negative("obstacle_rotation_step", self.obstacle_rotation_step as f64)?;

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(TuningError::SpawnProbability(self.spawn_probability));
        }
        if self.player_size > self.lane_height {
            return Err(TuningError::LaneTooShort {
                what: "player",
                lane_height: self.lane_height,
                size: self.player_size,
            });
        }
        if self.obstacle_size > self.lane_height {
            return Err(TuningError::LaneTooShort {
                what: "obstacle",
                lane_height: self.lane_height,
                size: self.obstacle_size,
            });
        }
        let max_y = self.player_max_y();
        if !(0.0..=max_y).contains(&self.player_start_y) {
            return Err(TuningError::StartOutOfLane {
                y: self.player_start_y,
                max: max_y,
            });
        }
        self.player_insets.check("player", self.player_size)?;
        self.obstacle_insets.check("obstacle", self.obstacle_size)?;
        Ok(())
    }

    /// Lowest allowed player y (top edge)
    #[inline]
    pub fn player_max_y(&self) -> f32 {
        self.lane_height - self.player_size
    }

    /// Scroll speed after `ticks` ramp steps.
    ///
    /// Computed from the tick count in f64 rather than summed, so long runs
    /// do not drift.
    pub fn speed_at(&self, ticks: u64) -> f32 {
        (self.initial_speed as f64 + ticks as f64 * self.speed_increment as f64) as f32
    }

    /// Seconds between simulation ticks
    #[inline]
    pub fn sim_interval(&self) -> f32 {
        1.0 / self.sim_hz
    }

    /// Seconds between player-motion ticks
    #[inline]
    pub fn player_interval(&self) -> f32 {
        1.0 / self.player_hz
    }

    /// Parse from JSON, filling missing fields with defaults, then validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "carpet_dodge_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }
}
