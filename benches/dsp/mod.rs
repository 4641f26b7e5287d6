//! Benchmarks for the building blocks used while rendering voices.

mod envelope;
mod lfo;
mod wavetable;

pub use envelope::bench_envelope;
pub use lfo::bench_lfo;
pub use wavetable::bench_wavetable;
