//! Sample-indexed modulation curves.

use std::sync::Arc;

use crate::{error::ConfigError, settings::Settings};

/*
Low Frequency Oscillators as Curves
===================================

Voices here are rendered ahead of time, so an LFO is not a running
oscillator with phase state. It is a pure function from the sample index
(counted from the start of the voice buffer) to a scalar:

    lfo(k) -> f32

Purity is what makes precomputation work. The same curve is evaluated for
every unison oscillator at the same index, from several rendering threads at
once, and always returns the same value.

Vocabulary
----------

  period      Curve length in samples: duration_ms * samples_per_ms.
  baseline    1.0. A pitch curve at 1.0 leaves the pitch untouched; a volume
              curve at 1.0 leaves the level untouched.
  vibrato     Pitch curve hovering around 1.0 (e.g. sine 1.01 / 0.99).
  tremolo     Volume curve dipping below 1.0.


Available Shapes
----------------

  straight line   1.0 ─────╱ target      then back to 1.0 past the end
  square          hi ▔▔▔▔▁▁▁▁ lo         repeating every period
  sine            peak ╲_╱ mid ╲_╱       cosine from peak down to mid
  intervals       l0 ▔ l1 ▁ l2 ▔ l3 ─    equal steps, repeating
  flat            constant value

The straight line is one-shot: indices at or past its last sample report the
baseline again rather than holding the target. Everything else repeats.
*/

/// A modulation curve, shareable across rendering threads.
pub type Lfo = Arc<dyn Fn(u64) -> f32 + Send + Sync>;

/// Builds modulation curves whose durations are given in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct LfoFactory {
    samples_per_ms: f64,
}

impl LfoFactory {
    pub fn new(settings: &Settings) -> Self {
        Self {
            samples_per_ms: settings.samples_per_ms(),
        }
    }

    /// Curve length in samples, never zero.
    fn period(&self, duration_ms: f64) -> u64 {
        ((duration_ms * self.samples_per_ms).round() as u64).max(1)
    }

    pub fn flat(&self, value: f32) -> Lfo {
        Arc::new(move |_| value)
    }

    /// Linear ramp from 1.0 at index 0 to `target` at the last in-domain index.
    pub fn straight_line(&self, target: f32, duration_ms: f64) -> Lfo {
        let total = self.period(duration_ms);
        let last = (total - 1) as f64;
        Arc::new(move |k| {
            if k >= total {
                return 1.0;
            }
            if last == 0.0 {
                return target;
            }
            (1.0 + (target as f64 - 1.0) * (k as f64 / last)) as f32
        })
    }

    /// `hi` for the first half of each period, `lo` for the second.
    pub fn square(&self, hi: f32, lo: f32, duration_ms: f64) -> Lfo {
        let period = self.period(duration_ms);
        let half = period / 2;
        Arc::new(move |k| if k % period < half { hi } else { lo })
    }

    /// Raised cosine: `peak` at the period start, `mid` at the half period.
    pub fn sine(&self, peak: f32, mid: f32, duration_ms: f64) -> Lfo {
        let period = self.period(duration_ms);
        let (peak, mid) = (peak as f64, mid as f64);
        Arc::new(move |k| {
            let angle = std::f64::consts::TAU * (k % period) as f64 / period as f64;
            (mid + (peak - mid) * (1.0 + angle.cos()) * 0.5) as f32
        })
    }

    /// Step function splitting each period into `levels.len()` equal parts.
    pub fn intervals(&self, levels: &[f32], duration_ms: f64) -> Result<Lfo, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyIntervals);
        }

        let period = self.period(duration_ms);
        let levels: Arc<[f32]> = levels.into();
        let count = levels.len() as u64;
        Ok(Arc::new(move |k| {
            let segment = ((k % period) * count / period).min(count - 1);
            levels[segment as usize]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> LfoFactory {
        LfoFactory::new(&Settings::default())
    }

    fn within(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() < 1e-4
    }

    #[test]
    fn straight_line_rises_then_falls_back_to_baseline() {
        let lfo = factory().straight_line(1.5, 500.0);
        let total = 22_050u64;

        let values: Vec<f32> = (0..total).map(|k| lfo(k)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values[0], 1.0);
        assert!(within(lfo(total - 1), 1.5));
        assert_eq!(lfo(total), 1.0);
        assert_eq!(lfo(total * 3), 1.0);
    }

    #[test]
    fn square_splits_each_period_in_half() {
        let lfo = factory().square(1.5, 0.8, 1000.0);
        let total = 44_100u64;

        let highs = (0..total).filter(|&k| lfo(k) == 1.5).count() as u64;
        let lows = (0..total).filter(|&k| lfo(k) == 0.8).count() as u64;
        assert_eq!(highs, total / 2);
        assert_eq!(lows, total / 2);
        assert_eq!(lfo(total), 1.5);
    }

    #[test]
    fn sine_moves_between_peak_and_mid() {
        let lfo = factory().sine(2.0, 1.5, 2000.0);
        let total = 88_200u64;

        assert_eq!(lfo(0), 2.0);
        assert!(within(lfo(total / 2), 1.5));
        assert!(within(lfo(total - 1), 2.0));
        let quarter = lfo(total / 4);
        assert!(quarter > 1.5 && quarter < 2.0);
        assert_eq!(lfo(total), lfo(0));
    }

    #[test]
    fn intervals_step_through_levels() {
        let lfo = factory().intervals(&[1.0, 0.0, 1.0, 0.5], 1000.0).unwrap();
        let total = 44_100u64;

        assert_eq!(lfo(0), 1.0);
        assert_eq!(lfo(total / 4), 0.0);
        assert_eq!(lfo(total / 2), 1.0);
        assert_eq!(lfo(total - 1), 0.5);
        assert_eq!(lfo(total), 1.0);
    }

    #[test]
    fn intervals_need_levels() {
        assert!(matches!(
            factory().intervals(&[], 1000.0),
            Err(ConfigError::EmptyIntervals)
        ));
    }

    #[test]
    fn curves_are_reentrant() {
        let lfo = factory().sine(1.02, 0.98, 150.0);
        let first: Vec<f32> = (0..500).map(|k| lfo(k)).collect();
        let second: Vec<f32> = (0..500).map(|k| lfo(k)).collect();
        assert_eq!(first, second);
    }
}
