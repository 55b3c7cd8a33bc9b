//! Audio cues for state transitions
//!
//! The simulation only emits [`GameEvent`]s. This module decides what each
//! one sounds like; the Web Audio backend (wasm32 only) plays procedurally
//! generated effects and a background drone, no external files needed.

use crate::sim::{GameEvent, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run begins
    Start,
    /// Game paused
    Pause,
    /// Game resumed
    Resume,
    /// Collision ended the run
    Crash,
    /// Fresh run after restart
    Restart,
}

/// What to do with the background music
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Stop,
    /// Start over from the beginning
    Rewind,
}

/// Audio response to one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCue {
    pub effect: SoundEffect,
    pub music: MusicCommand,
}

/// Music runs only while the game is running
pub fn cue_for(event: GameEvent) -> AudioCue {
    let (effect, music) = match event {
        GameEvent::Started => (SoundEffect::Start, MusicCommand::Play),
        GameEvent::PauseToggled { paused: true } => (SoundEffect::Pause, MusicCommand::Stop),
        GameEvent::PauseToggled { paused: false } => (SoundEffect::Resume, MusicCommand::Play),
        GameEvent::GameOver { .. } => (SoundEffect::Crash, MusicCommand::Stop),
        GameEvent::Restarted => (SoundEffect::Restart, MusicCommand::Rewind),
    };
    AudioCue { effect, music }
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One enveloped oscillator voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    /// Pitch at onset (Hz)
    pub from_hz: f32,
    /// Pitch the voice glides to by the end (Hz)
    pub to_hz: f32,
    /// Seconds after the trigger
    pub delay: f64,
    /// Linear fade-in (seconds)
    pub attack: f64,
    /// Total voice length including the exponential tail (seconds)
    pub length: f64,
    /// Peak level before the effect volume is applied
    pub level: f32,
}

impl Tone {
    const fn new(
        wave: Wave,
        from_hz: f32,
        to_hz: f32,
        attack: f64,
        length: f64,
        level: f32,
    ) -> Self {
        Self {
            wave,
            from_hz,
            to_hz,
            delay: 0.0,
            attack,
            length,
            level,
        }
    }

    const fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Carpet lifting off: a pair of slightly detuned voices sweeping up
const LIFT_OFF: &[Tone] = &[
    Tone::new(Wave::Sine, 240.0, 880.0, 0.08, 0.45, 0.18),
    Tone::new(Wave::Sine, 246.0, 892.0, 0.08, 0.45, 0.14),
    Tone::new(Wave::Triangle, 120.0, 180.0, 0.05, 0.3, 0.1),
];

/// Shorter, brighter swoop back to the start
const SWOOP: &[Tone] = &[
    Tone::new(Wave::Sine, 520.0, 260.0, 0.02, 0.18, 0.16),
    Tone::new(Wave::Sine, 300.0, 960.0, 0.05, 0.3, 0.18).after(0.12),
];

const PAUSE: &[Tone] = &[Tone::new(Wave::Sine, 660.0, 440.0, 0.01, 0.14, 0.25)];

const RESUME: &[Tone] = &[Tone::new(Wave::Sine, 440.0, 660.0, 0.01, 0.14, 0.25)];

/// Carpet meets rock: low thud, a gritty crack, then rubble settling
const ROCK_HIT: &[Tone] = &[
    Tone::new(Wave::Square, 95.0, 32.0, 0.005, 0.28, 0.45),
    Tone::new(Wave::Sawtooth, 1300.0, 240.0, 0.002, 0.09, 0.16),
    Tone::new(Wave::Triangle, 70.0, 38.0, 0.04, 0.7, 0.35).after(0.08),
    Tone::new(Wave::Square, 180.0, 150.0, 0.002, 0.06, 0.08).after(0.3),
    Tone::new(Wave::Square, 140.0, 120.0, 0.002, 0.06, 0.06).after(0.45),
];

/// Voices that make up an effect
pub fn recipe(effect: SoundEffect) -> &'static [Tone] {
    match effect {
        SoundEffect::Start => LIFT_OFF,
        SoundEffect::Restart => SWOOP,
        SoundEffect::Pause => PAUSE,
        SoundEffect::Resume => RESUME,
        SoundEffect::Crash => ROCK_HIT,
    }
}

/// Music to start on the first key press of the page, if any. Browsers keep
/// audio locked until then, so a title screen key brings the drone in early.
pub fn first_key_music(phase: GamePhase) -> Option<MusicCommand> {
    match phase {
        GamePhase::Idle | GamePhase::Running => Some(MusicCommand::Play),
        GamePhase::Paused | GamePhase::Over => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{AudioManager, MusicLoop};

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{
        AudioCue, MusicCommand, SoundEffect, Tone, Wave, cue_for, first_key_music, recipe,
    };
    use crate::settings::Settings;
    use crate::sim::{GameEvent, GamePhase};

    fn oscillator_type(wave: Wave) -> OscillatorType {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Square => OscillatorType::Square,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }

    /// A playing background drone. Dropping it stops the sound.
    pub struct MusicLoop {
        voices: Vec<OscillatorNode>,
        _gain: GainNode,
    }

    impl MusicLoop {
        fn start(ctx: &AudioContext, vol: f32) -> Option<Self> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(vol * 0.15);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut voices = Vec::new();
            for (freq, osc_type) in [
                (110.0, OscillatorType::Triangle),
                (164.8, OscillatorType::Sine),
                (220.0, OscillatorType::Sine),
            ] {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(osc_type);
                osc.frequency().set_value(freq);
                osc.connect_with_audio_node(&gain).ok()?;
                osc.start().ok()?;
                voices.push(osc);
            }

            Some(Self {
                voices,
                _gain: gain,
            })
        }
    }

    impl Drop for MusicLoop {
        fn drop(&mut self) {
            for osc in &self.voices {
                let _ = osc.stop();
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music: Option<MusicLoop>,
        heard_key: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
                music: None,
                heard_key: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// A key went down. The first one unlocks audio and starts the music.
        pub fn key_pressed(&mut self, phase: GamePhase) {
            self.resume();
            if self.heard_key {
                return;
            }
            self.heard_key = true;
            if first_key_music(phase) == Some(MusicCommand::Play) {
                self.play_music();
            }
        }

        /// React to a transition from the simulation
        pub fn handle(&mut self, event: GameEvent) {
            let AudioCue { effect, music } = cue_for(event);
            self.play(effect);
            match music {
                MusicCommand::Play => self.play_music(),
                MusicCommand::Stop => self.music = None,
                MusicCommand::Rewind => {
                    self.music = None;
                    self.play_music();
                }
            }
        }

        fn play_music(&mut self) {
            if self.music.is_some() || self.music_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.music = MusicLoop::start(ctx, self.music_volume);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in recipe(effect) {
                play_tone(ctx, vol, tone);
            }
        }
    }

    /// Schedule one voice: linear attack, exponential tail, exponential glide
    fn play_tone(ctx: &AudioContext, vol: f32, tone: &Tone) {
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        osc.set_type(oscillator_type(tone.wave));
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time() + tone.delay;
        let end = t + tone.length;

        let envelope = gain.gain();
        envelope.set_value_at_time(0.0001, t).ok();
        envelope
            .linear_ramp_to_value_at_time(vol * tone.level, t + tone.attack)
            .ok();
        envelope.exponential_ramp_to_value_at_time(0.0001, end).ok();

        let pitch = osc.frequency();
        pitch.set_value_at_time(tone.from_hz, t).ok();
        if tone.to_hz != tone.from_hz {
            pitch.exponential_ramp_to_value_at_time(tone.to_hz, end).ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.02).ok();
    }
}
