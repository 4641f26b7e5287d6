//! Kick drum.
//!
//! A sine body whose pitch sweeps from ~150 Hz down to ~50 Hz, the classic
//! electronic kick "punch".
//!
//! # How It Works
//!
//! 1. Cosine phase start: the hit begins at its peak, not at a zero crossing
//! 2. Pitch envelope: fast exponential drop toward the fundamental
//! 3. Amplitude envelope: instant attack, ~400 ms decay
//!
//! # Variations
//!
//! - Longer decay = boomy 808-style kick
//! - Higher start pitch = more "click" attack

use crate::settings::Settings;

use super::decay;

const START_HZ: f64 = 150.0;
const END_HZ: f64 = 50.0;
const SWEEP_MS: f64 = 60.0;
const DECAY_MS: f64 = 400.0;
const LEVEL: f64 = 0.9;

/// Render a kick drum hit.
pub fn kick(settings: &Settings) -> Vec<f32> {
    let len = settings.ms_to_samples(DECAY_MS);
    let sample_rate = settings.sample_rate() as f64;
    let mut phase = 0.0f64;

    (0..len)
        .map(|i| {
            let sweep = decay(i, SWEEP_MS, settings);
            let freq = END_HZ + (START_HZ - END_HZ) * sweep;
            let out = LEVEL * decay(i, DECAY_MS, settings) * phase.cos();
            phase += std::f64::consts::TAU * freq / sample_rate;
            out as f32
        })
        .collect()
}
