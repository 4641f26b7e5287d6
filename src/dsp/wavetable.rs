#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/*
Wavetables
==========

A wavetable stores exactly one period of a waveform. Playing a pitch means
walking through the table at a speed proportional to the frequency:

    step = table_size * frequency / sample_rate

At 44.1 kHz with a 2048-entry table, A4 (440 Hz) advances ~20.4 entries per
sample; A2 (110 Hz) advances ~5.1. The phase is a float that wraps modulo the
table size, and the integer part selects the entry.

  index    0 ............ size/2 ............ size-1
  Saw     -1 ─────────────  0  ─────────────→ ~+1
  Square  +1 +1 +1 +1 +1 | -1 -1 -1 -1 -1 -1
  Sine     0  ↗ 1  ↘  0  ↘ -1  ↗  0

Tables are built once and never written again, so every voice can read the
same `Arc<WaveTable>` from any thread without locking.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveShape {
    Sine,
    Saw,
    Square,
    Triangle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    shape: WaveShape,
    samples: Box<[f32]>,
}

impl WaveTable {
    pub fn build(shape: WaveShape, size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidTableSize(size));
        }

        let len = size as f64;
        let samples = (0..size)
            .map(|i| {
                let x = i as f64 / len; // position within the period, [0, 1)
                let value = match shape {
                    WaveShape::Sine => (std::f64::consts::TAU * x).sin(),
                    WaveShape::Saw => 2.0 * x - 1.0,
                    WaveShape::Square => {
                        if i < size / 2 {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                    WaveShape::Triangle => 1.0 - 4.0 * (x - 0.5).abs(),
                };
                value as f32
            })
            .collect();

        Ok(Self { shape, samples })
    }

    /// Amplitude at a fractional phase measured in table entries.
    ///
    /// The phase wraps modulo the table length and is truncated to the entry
    /// below it, so any finite phase (negative included) is a valid read.
    #[inline]
    pub fn get_at(&self, phase: f64) -> f32 {
        let len = self.samples.len();
        let wrapped = phase.rem_euclid(len as f64);
        // rem_euclid can round up to `len` for tiny negative inputs
        let index = (wrapped as usize).min(len - 1);
        self.samples[index]
    }

    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
