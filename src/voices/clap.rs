//! Hand clap.
//!
//! Several hands never hit at exactly the same moment: three short noise
//! bursts ~10 ms apart, then a longer diffuse tail.

use crate::settings::Settings;

use super::{decay, Noise};

const BURST_SPACING_MS: f64 = 10.0;
const BURSTS: usize = 3;

/// Render a clap hit.
pub fn clap(settings: &Settings) -> Vec<f32> {
    let len = settings.ms_to_samples(200.0);
    let spacing = settings.ms_to_samples(BURST_SPACING_MS).max(1);
    let mut noise = Noise::new(0xc1a9);

    (0..len)
        .map(|i| {
            let envelope = if i < spacing * BURSTS {
                decay(i % spacing, BURST_SPACING_MS, settings)
            } else {
                0.6 * decay(i - spacing * BURSTS, 150.0, settings)
            };
            (0.7 * noise.next_sample() as f64 * envelope) as f32
        })
        .collect()
}
