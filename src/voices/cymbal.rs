//! Crash and ride cymbals.
//!
//! Noise mixed with a handful of inharmonic square partials, which is what
//! gives cymbals their metallic shimmer instead of plain hiss.

use crate::settings::Settings;

use super::{decay, Noise};

// Ratios borrowed from the classic 808 cymbal oscillator bank.
const PARTIALS_HZ: [f64; 6] = [205.3, 304.4, 369.6, 522.7, 540.0, 800.0];

/// Render a crash cymbal hit.
pub fn crash(settings: &Settings) -> Vec<f32> {
    cymbal(settings, 1200.0, 0.7, 0xc7a5)
}

/// Render a ride cymbal hit.
pub fn ride(settings: &Settings) -> Vec<f32> {
    cymbal(settings, 700.0, 0.35, 0x71de)
}

fn cymbal(settings: &Settings, decay_ms: f64, noise_mix: f64, seed: u32) -> Vec<f32> {
    let len = settings.ms_to_samples(decay_ms);
    let sample_rate = settings.sample_rate() as f64;
    let mut noise = Noise::new(seed);

    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let metal: f64 = PARTIALS_HZ
                .iter()
                .map(|hz| if (hz * t).fract() < 0.5 { 1.0 } else { -1.0 })
                .sum::<f64>()
                / PARTIALS_HZ.len() as f64;
            let source = noise_mix * noise.next_sample() as f64 + (1.0 - noise_mix) * metal;
            (0.5 * source * decay(i, decay_ms, settings)) as f32
        })
        .collect()
}
