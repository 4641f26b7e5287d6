// Purpose: Voice management for melodic and percussion tracks
// Each track owns exactly one synth; the engine only sees the `Synth` trait.

pub mod builder;
pub mod drum;
pub mod keyboard;
#[cfg(feature = "rtrb")]
pub mod message;
pub mod pitch;

use crate::error::SynthError;

pub use builder::SynthBuilder;
pub use drum::DrumSynth;
pub use keyboard::KeyboardSynth;
pub use pitch::PitchId;

/// A score event addressed to one synth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Melodic note held for `lifetime_micros` before its release.
    Note {
        pitch: PitchId,
        lifetime_micros: u64,
    },
    /// Percussion hit, keyed by General MIDI drum key.
    Hit { key: u8 },
}

/// Capability shared by every per-track synth.
///
/// `poll_sample` and `active_voice_count` run on the audio thread: they
/// never allocate, block or fail. The engine calls `active_voice_count`
/// once per tick, which is also what prunes finished voices.
pub trait Synth: Send {
    fn trigger(&mut self, trigger: Trigger) -> Result<(), SynthError>;

    fn poll_sample(&mut self) -> f32;

    fn active_voice_count(&mut self) -> usize;
}

/// Allow boxed synths to be used as synths (for dynamic dispatch)
impl Synth for Box<dyn Synth> {
    fn trigger(&mut self, trigger: Trigger) -> Result<(), SynthError> {
        (**self).trigger(trigger)
    }

    fn poll_sample(&mut self) -> f32 {
        (**self).poll_sample()
    }

    fn active_voice_count(&mut self) -> usize {
        (**self).active_voice_count()
    }
}
