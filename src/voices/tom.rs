//! Tom.
//!
//! Like the kick, but higher and with a gentler pitch drop, so it reads as a
//! pitched drum rather than a thump.

use crate::settings::Settings;

use super::decay;

/// Render a mid tom hit.
pub fn tom(settings: &Settings) -> Vec<f32> {
    let len = settings.ms_to_samples(300.0);
    let sample_rate = settings.sample_rate() as f64;
    let mut phase = 0.0f64;

    (0..len)
        .map(|i| {
            let freq = 110.0 + 60.0 * decay(i, 120.0, settings);
            let out = 0.8 * decay(i, 300.0, settings) * phase.cos();
            phase += std::f64::consts::TAU * freq / sample_rate;
            out as f32
        })
        .collect()
}
