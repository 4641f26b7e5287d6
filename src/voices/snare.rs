//! Snare drum.
//!
//! A tonal body for the drum head plus noise for the wires buzzing against
//! the bottom head.
//!
//! # How It Works
//!
//! 1. Triangle-ish body at ~180 Hz with a short decay
//! 2. Noise rattle, high-passed by a one-pole differentiator
//! 3. Rattle decays slower than the body
//!
//! # Variations
//!
//! - More noise = trashy, lo-fi snare
//! - Less noise = more "tom" like

use crate::settings::Settings;

use super::{decay, Noise};

/// Render a snare hit.
pub fn snare(settings: &Settings) -> Vec<f32> {
    let len = settings.ms_to_samples(250.0);
    let step = std::f64::consts::TAU * 180.0 / settings.sample_rate() as f64;
    let mut noise = Noise::new(0x5eed_0001);
    let mut previous = 0.0f32;

    (0..len)
        .map(|i| {
            let body = (step * i as f64).cos() * decay(i, 90.0, settings);
            let white = noise.next_sample();
            let rattle = 0.5 * (white - previous) as f64;
            previous = white;
            (0.45 * body + 0.5 * rattle * decay(i, 250.0, settings)) as f32
        })
        .collect()
}
