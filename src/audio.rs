//! Audio: sound sets and Web Audio playback
//!
//! Procedurally generated tones - no external files needed! Each sound set
//! gives one note per wall, so a bead bouncing around the board plays a
//! little four-note tune. Spawning pops, merging drips.

use crate::consts::SOUND_SETS;
use crate::sim::{GameEvent, Wall};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// A single enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Frequency at the end of the note (Hz); equal to `freq` for a flat note
    pub end_freq: f32,
    pub waveform: Waveform,
    /// Seconds until the gain has decayed
    pub duration: f32,
    /// Peak gain before master/sfx volume
    pub gain: f32,
}

impl Tone {
    const fn flat(freq: f32, waveform: Waveform, duration: f32, gain: f32) -> Self {
        Self {
            freq,
            end_freq: freq,
            waveform,
            duration,
            gain,
        }
    }

    const fn sweep(freq: f32, end_freq: f32, waveform: Waveform, duration: f32, gain: f32) -> Self {
        Self {
            freq,
            end_freq,
            waveform,
            duration,
            gain,
        }
    }
}

use Waveform::*;

/// Four wall notes per sound set, in `Wall::tone_index` order
const SOUND_SET_TONES: [[Tone; 4]; SOUND_SETS as usize] = [
    // Xylophone: A4 C5 E5 G5
    [
        Tone::flat(440.00, Triangle, 0.25, 0.35),
        Tone::flat(523.25, Triangle, 0.25, 0.35),
        Tone::flat(659.25, Triangle, 0.25, 0.35),
        Tone::flat(783.99, Triangle, 0.25, 0.35),
    ],
    // High piano: G5 F6 D6 B5
    [
        Tone::flat(783.99, Sine, 0.4, 0.35),
        Tone::flat(1396.91, Sine, 0.4, 0.35),
        Tone::flat(1174.66, Sine, 0.4, 0.35),
        Tone::flat(987.77, Sine, 0.4, 0.35),
    ],
    // Low piano: A0 C1 E1 G1
    [
        Tone::flat(27.50, Triangle, 0.6, 0.6),
        Tone::flat(32.70, Triangle, 0.6, 0.6),
        Tone::flat(41.20, Triangle, 0.6, 0.6),
        Tone::flat(49.00, Triangle, 0.6, 0.6),
    ],
    // Low harpsichord: A2 C3 E3 G3
    [
        Tone::flat(110.00, Sawtooth, 0.3, 0.2),
        Tone::flat(130.81, Sawtooth, 0.3, 0.2),
        Tone::flat(164.81, Sawtooth, 0.3, 0.2),
        Tone::flat(196.00, Sawtooth, 0.3, 0.2),
    ],
    // High harpsichord: G6 B6 D7 F7
    [
        Tone::flat(1567.98, Sawtooth, 0.2, 0.12),
        Tone::flat(1975.53, Sawtooth, 0.2, 0.12),
        Tone::flat(2349.32, Sawtooth, 0.2, 0.12),
        Tone::flat(2793.83, Sawtooth, 0.2, 0.12),
    ],
    // Percussion: high bongo, low bongo, wood block, bass drum
    [
        Tone::sweep(420.0, 300.0, Sine, 0.12, 0.5),
        Tone::sweep(260.0, 180.0, Sine, 0.15, 0.5),
        Tone::flat(800.0, Square, 0.05, 0.2),
        Tone::sweep(120.0, 45.0, Sine, 0.25, 0.7),
    ],
    // Effects: chirp, coin, jump, shoot
    [
        Tone::sweep(900.0, 2400.0, Sine, 0.1, 0.3),
        Tone::sweep(988.0, 1319.0, Square, 0.15, 0.15),
        Tone::sweep(300.0, 650.0, Square, 0.2, 0.15),
        Tone::sweep(1200.0, 150.0, Sawtooth, 0.2, 0.15),
    ],
];

/// Sound set names, for the HUD
const SOUND_SET_NAMES: [&str; SOUND_SETS as usize] = [
    "Xylophone",
    "High Piano",
    "Low Piano",
    "Low Harpsichord",
    "High Harpsichord",
    "Percussion",
    "Effects",
];

/// Display name of a sound set (out-of-range sets clamp to the last)
pub fn sound_set_name(set: u8) -> &'static str {
    SOUND_SET_NAMES[(set as usize).min(SOUND_SET_NAMES.len() - 1)]
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bead spawned
    Pop,
    /// Two beads merged
    Drip,
    /// Bead bounced off a wall
    WallTone { set: u8, wall: Wall },
}

impl SoundEffect {
    /// The note this effect plays
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Pop => Tone::sweep(300.0, 900.0, Sine, 0.08, 0.4),
            SoundEffect::Drip => Tone::sweep(1400.0, 500.0, Sine, 0.18, 0.35),
            SoundEffect::WallTone { set, wall } => {
                let set = (set as usize).min(SOUND_SET_TONES.len() - 1);
                SOUND_SET_TONES[set][wall.tone_index()]
            }
        }
    }
}

/// Sound to play for a simulation event, if any
pub fn sound_for_event(event: &GameEvent, sound_set: u8) -> Option<SoundEffect> {
    match *event {
        GameEvent::Spawned { .. } => Some(SoundEffect::Pop),
        GameEvent::Merged { .. } => Some(SoundEffect::Drip),
        GameEvent::WallHit { wall, .. } => Some(SoundEffect::WallTone {
            set: sound_set,
            wall,
        }),
        GameEvent::Reset { .. } | GameEvent::SoundSetChanged { .. } => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Master x sfx volume, 0 when muted
        volume: f32,
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
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Pick up volume and mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.play_tone(ctx, effect.tone(), vol);
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: Tone, vol: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration as f64;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.end_freq != tone.freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_freq, end)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }
}
