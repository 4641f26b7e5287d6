//! Real-world scenario benchmarks.
//!
//! These model how the engine is actually driven: rendering a patch up
//! front, then summing many pre-rendered voices per sample.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
