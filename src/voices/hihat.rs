//! Hi-hats.
//!
//! Bright noise bursts. Closed and open hats share the same source and only
//! differ in how long they ring.

use crate::settings::Settings;

use super::{decay, Noise};

/// Render a closed hi-hat hit.
pub fn closed_hat(settings: &Settings) -> Vec<f32> {
    metallic_noise(settings, 60.0, 0x4a7_0001)
}

/// Render an open hi-hat hit.
pub fn open_hat(settings: &Settings) -> Vec<f32> {
    metallic_noise(settings, 450.0, 0x4a7_0002)
}

fn metallic_noise(settings: &Settings, decay_ms: f64, seed: u32) -> Vec<f32> {
    let len = settings.ms_to_samples(decay_ms);
    let mut noise = Noise::new(seed);
    let mut previous = 0.0f32;

    (0..len)
        .map(|i| {
            // first difference removes the low end
            let white = noise.next_sample();
            let bright = 0.5 * (white - previous);
            previous = white;
            (0.6 * bright as f64 * decay(i, decay_ms, settings)) as f32
        })
        .collect()
}
