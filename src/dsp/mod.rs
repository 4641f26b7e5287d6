//! Low-level primitives the synths are built from.
//!
//! Tables and curves are immutable once built and safe to share across the
//! rendering threads. Envelope iterators are per-voice, allocation-free
//! state machines that run on the audio thread.

/// Attack/hold/release envelope with anti-click re-arming.
pub mod envelope;
/// Sample-indexed modulation curves.
pub mod lfo;
/// Single-cycle waveform lookup tables.
pub mod wavetable;

pub use envelope::{EnvelopeIter, EnvelopeState, Enveloper};
pub use lfo::{Lfo, LfoFactory};
pub use wavetable::{WaveShape, WaveTable};
