//! Serializable instrument descriptions for melodic tracks.
//!
//! A [`Patch`] is plain data (enable the `serde` feature to load it from
//! files); [`Patch::builder`] turns it into a ready [`SynthBuilder`].

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        envelope::Enveloper,
        lfo::{Lfo, LfoFactory},
        wavetable::{WaveShape, WaveTable},
    },
    error::ConfigError,
    settings::Settings,
    synth::SynthBuilder,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub name: String,
    pub oscillators: Vec<OscillatorDescriptor>,
    pub envelope: EnvelopeDescriptor,
    pub pitch_lfo: LfoDescriptor,
    pub volume_lfo: LfoDescriptor,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorDescriptor {
    pub shape: WaveShape,
    /// Frequency ratio against the played pitch.
    pub offset: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeDescriptor {
    pub attack_ms: f64,
    pub sustain_level: f32,
    pub release_ms: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum LfoDescriptor {
    Flat,
    StraightLine { target: f32, duration_ms: f64 },
    Square { hi: f32, lo: f32, duration_ms: f64 },
    Sine { peak: f32, mid: f32, duration_ms: f64 },
    Intervals { levels: Vec<f32>, duration_ms: f64 },
}

impl LfoDescriptor {
    pub fn build(&self, lfos: &LfoFactory) -> Result<Lfo, ConfigError> {
        Ok(match self {
            LfoDescriptor::Flat => lfos.flat(1.0),
            LfoDescriptor::StraightLine {
                target,
                duration_ms,
            } => lfos.straight_line(*target, *duration_ms),
            LfoDescriptor::Square {
                hi,
                lo,
                duration_ms,
            } => lfos.square(*hi, *lo, *duration_ms),
            LfoDescriptor::Sine {
                peak,
                mid,
                duration_ms,
            } => lfos.sine(*peak, *mid, *duration_ms),
            LfoDescriptor::Intervals {
                levels,
                duration_ms,
            } => lfos.intervals(levels, *duration_ms)?,
        })
    }
}

fn osc(shape: WaveShape, offset: f64) -> OscillatorDescriptor {
    OscillatorDescriptor { shape, offset }
}

impl Patch {
    /// Detuned saw pair with a gentle vibrato.
    pub fn lead() -> Self {
        Self {
            name: "lead".into(),
            oscillators: vec![osc(WaveShape::Saw, 1.0), osc(WaveShape::Saw, 1.004)],
            envelope: EnvelopeDescriptor {
                attack_ms: 10.0,
                sustain_level: 0.5,
                release_ms: 120.0,
            },
            pitch_lfo: LfoDescriptor::Sine {
                peak: 1.003,
                mid: 0.997,
                duration_ms: 180.0,
            },
            volume_lfo: LfoDescriptor::Flat,
        }
    }

    /// Square plus a sine an octave down.
    pub fn bass() -> Self {
        Self {
            name: "bass".into(),
            oscillators: vec![osc(WaveShape::Square, 1.0), osc(WaveShape::Sine, 0.5)],
            envelope: EnvelopeDescriptor {
                attack_ms: 5.0,
                sustain_level: 0.6,
                release_ms: 60.0,
            },
            pitch_lfo: LfoDescriptor::Flat,
            volume_lfo: LfoDescriptor::Flat,
        }
    }

    /// Three slow-breathing detuned triangles.
    pub fn pad() -> Self {
        Self {
            name: "pad".into(),
            oscillators: vec![
                osc(WaveShape::Triangle, 0.996),
                osc(WaveShape::Triangle, 1.0),
                osc(WaveShape::Triangle, 1.004),
            ],
            envelope: EnvelopeDescriptor {
                attack_ms: 300.0,
                sustain_level: 0.4,
                release_ms: 400.0,
            },
            pitch_lfo: LfoDescriptor::Flat,
            volume_lfo: LfoDescriptor::Sine {
                peak: 1.0,
                mid: 0.7,
                duration_ms: 2000.0,
            },
        }
    }

    /// Drawbar-style sine stack.
    pub fn organ() -> Self {
        Self {
            name: "organ".into(),
            oscillators: vec![
                osc(WaveShape::Sine, 1.0),
                osc(WaveShape::Sine, 2.0),
                osc(WaveShape::Sine, 3.0),
            ],
            envelope: EnvelopeDescriptor {
                attack_ms: 15.0,
                sustain_level: 0.5,
                release_ms: 40.0,
            },
            pitch_lfo: LfoDescriptor::Flat,
            volume_lfo: LfoDescriptor::Square {
                hi: 1.0,
                lo: 0.85,
                duration_ms: 140.0,
            },
        }
    }

    /// Bright saw with a falling level, plucked-string style.
    pub fn pluck() -> Self {
        Self {
            name: "pluck".into(),
            oscillators: vec![osc(WaveShape::Saw, 1.0), osc(WaveShape::Square, 2.0)],
            envelope: EnvelopeDescriptor {
                attack_ms: 2.0,
                sustain_level: 0.5,
                release_ms: 80.0,
            },
            pitch_lfo: LfoDescriptor::Flat,
            volume_lfo: LfoDescriptor::Intervals {
                levels: vec![1.0, 0.8, 0.6, 0.45],
                duration_ms: 400.0,
            },
        }
    }

    /// Pick a preset from a General MIDI program number (0-based).
    pub fn for_program(program: u8) -> Self {
        match program {
            0..=7 | 24..=31 | 104..=111 => Self::pluck(), // pianos, guitars, ethnic
            16..=23 => Self::organ(),
            32..=39 => Self::bass(),
            40..=55 | 88..=103 => Self::pad(), // strings, ensembles, synth pads/fx
            _ => Self::lead(),
        }
    }

    /// Resolve tables, curves and envelope into a reusable builder.
    pub fn builder(&self, settings: &Settings) -> Result<SynthBuilder, ConfigError> {
        let lfos = LfoFactory::new(settings);
        let mut wavetables: Vec<Arc<WaveTable>> = Vec::with_capacity(self.oscillators.len());

        for descriptor in &self.oscillators {
            // oscillators sharing a shape share one table
            let table = match wavetables.iter().find(|t| t.shape() == descriptor.shape) {
                Some(table) => Arc::clone(table),
                None => Arc::new(WaveTable::build(
                    descriptor.shape,
                    settings.wavetable_size(),
                )?),
            };
            wavetables.push(table);
        }

        let envelope = Enveloper::new(
            settings,
            self.envelope.attack_ms,
            self.envelope.sustain_level,
            self.envelope.release_ms,
        )?;

        Ok(SynthBuilder::new(*settings)
            .with_wavetables(wavetables)
            .with_offsets(self.oscillators.iter().map(|o| o.offset).collect())
            .with_enveloper(envelope)
            .with_pitch_lfo(self.pitch_lfo.build(&lfos)?)
            .with_volume_lfo(self.volume_lfo.build(&lfos)?))
    }
}
