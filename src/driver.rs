//! Fixed-rate drivers that feed the simulation
//!
//! The host hands [`Session::update`] the wall-clock time since the last
//! frame. Two accumulators turn that into simulation ticks (60 Hz) and
//! player-motion steps (62.5 Hz), run in the order they fall due.
//!
//! The accumulators exist only while the run is in
//! [`GamePhase::Running`](crate::sim::GamePhase::Running). Every command that
//! leaves Running drops them, so no queued time can tick a paused or finished
//! run, and a resumed run starts with empty accumulators.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GameEvent, GameState, Intent, autopilot, step_player, tick};
use crate::snapshot::Snapshot;
use crate::tuning::{Tuning, TuningError};

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: f32,
    accumulator: f32,
}

impl FixedStep {
    /// Driver firing `hz` times per second
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn accumulate(&mut self, dt: f32) {
        self.accumulator += dt;
    }

    #[inline]
    pub fn is_due(&self) -> bool {
        self.accumulator >= self.interval
    }

    /// How long ago the next step fell due; larger means earlier
    #[inline]
    fn overdue(&self) -> f32 {
        self.accumulator - self.interval
    }

    fn consume(&mut self) {
        self.accumulator -= self.interval;
    }

    /// Forget time the substep cap left undrained, keeping at most one
    /// pending step
    fn drop_backlog(&mut self) {
        if self.accumulator > self.interval {
            log::debug!("Dropped {:.4}s of driver backlog", self.accumulator - self.interval);
            self.accumulator = self.interval;
        }
    }
}

/// Both drivers, alive only while the run is Running
#[derive(Debug)]
struct Clocks {
    sim: FixedStep,
    player: FixedStep,
}

impl Clocks {
    fn new(tuning: &Tuning) -> Self {
        Self {
            sim: FixedStep::new(tuning.sim_hz),
            player: FixedStep::new(tuning.player_hz),
        }
    }
}

enum Step {
    Sim,
    Player,
}

/// Owns a run and the drivers that advance it
#[derive(Debug)]
pub struct Session {
    state: GameState,
    clocks: Option<Clocks>,
    autopilot: bool,
    /// Directions the player is physically holding, kept apart from the
    /// intents the autopilot writes
    held: Intent,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        let mut session = Self {
            state,
            clocks: None,
            autopilot: false,
            held: Intent::default(),
        };
        session.sync_clocks();
        session
    }

    /// Build a session, rejecting tuning that breaks simulation preconditions
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self::new(GameState::with_tuning(seed, tuning)?))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// True while the drivers are armed
    pub fn is_ticking(&self) -> bool {
        self.clocks.is_some()
    }

    pub fn start_game(&mut self) {
        self.state.start();
        self.sync_clocks();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        self.sync_clocks();
    }

    pub fn restart_game(&mut self) {
        self.state.restart();
        // Fresh accumulators even when restarting from Running
        self.clocks = None;
        self.sync_clocks();
    }

    pub fn set_moving_up(&mut self, held: bool) {
        self.held.up = held;
        if !self.autopilot {
            self.state.set_moving_up(held);
        }
    }

    pub fn set_moving_down(&mut self, held: bool) {
        self.held.down = held;
        if !self.autopilot {
            self.state.set_moving_down(held);
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Enable or disable demo steering. Disabling hands control back to
    /// whatever keys are still held.
    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot == enabled {
            return;
        }
        self.autopilot = enabled;
        if !enabled {
            self.state.intent = self.held;
        }
        log::info!("Autopilot {}", if enabled { "on" } else { "off" });
    }

    /// Take pending transition events for audio and UI adapters
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Feed `dt` seconds of wall-clock time to the drivers.
    ///
    /// Returns the number of simulation ticks run. Frame deltas are clamped
    /// and each driver runs at most [`MAX_SUBSTEPS`] steps per call. A driver
    /// that hits the cap keeps only one pending step; older time is dropped.
    pub fn update(&mut self, dt: f32) -> u32 {
        let Some(clocks) = self.clocks.as_mut() else {
            return 0;
        };

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        clocks.sim.accumulate(dt);
        clocks.player.accumulate(dt);

        let mut sim_steps = 0;
        let mut player_steps = 0;
        loop {
            let sim_due = clocks.sim.is_due() && sim_steps < MAX_SUBSTEPS;
            let player_due = clocks.player.is_due() && player_steps < MAX_SUBSTEPS;
            let next = match (sim_due, player_due) {
                (false, false) => break,
                (true, false) => Step::Sim,
                (false, true) => Step::Player,
                (true, true) if clocks.sim.overdue() > clocks.player.overdue() => Step::Sim,
                (true, true) => Step::Player,
            };

            match next {
                Step::Sim => {
                    clocks.sim.consume();
                    sim_steps += 1;
                    tick(&mut self.state);
                }
                Step::Player => {
                    clocks.player.consume();
                    player_steps += 1;
                    if self.autopilot {
                        self.state.intent = autopilot::steer(&self.state);
                    }
                    step_player(&mut self.state);
                }
            }

            if !self.state.is_running() {
                break;
            }
        }

        if let Some(clocks) = self.clocks.as_mut() {
            clocks.sim.drop_backlog();
            clocks.player.drop_backlog();
        }
        self.sync_clocks();
        sim_steps
    }

    /// Arm the drivers on entering Running, drop them on every exit
    fn sync_clocks(&mut self) {
        match (self.state.is_running(), self.clocks.is_some()) {
            (true, false) => {
                self.clocks = Some(Clocks::new(&self.state.tuning));
                log::debug!("Drivers armed");
            }
            (false, true) => {
                self.clocks = None;
                log::debug!("Drivers stopped ({:?})", self.state.phase);
            }
            _ => {}
        }
    }
}
