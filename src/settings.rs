//! Engine-wide constants shared by every table, curve and voice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_WAVETABLE_SIZE: usize = 2048;
/// Length of the anti-click ramp used when a sounding voice is retriggered.
pub const DEFAULT_ATTENUATION: usize = 200;

/// Immutable audio configuration.
///
/// Everything that converts milliseconds to samples goes through
/// [`Settings::samples_per_ms`], so buffers, curves and envelopes agree on
/// their lengths.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSettings"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    sample_rate: u32,
    wavetable_size: usize,
    attenuation: usize,
}

/// Unchecked wire form; loading goes through [`Settings::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSettings {
    sample_rate: u32,
    wavetable_size: usize,
    attenuation: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Settings::new(raw.sample_rate, raw.wavetable_size, raw.attenuation)
    }
}

impl Settings {
    pub fn new(
        sample_rate: u32,
        wavetable_size: usize,
        attenuation: usize,
    ) -> Result<Self, ConfigError> {
        if sample_rate == 0 {
            return Err(ConfigError::InvalidSettings("sample rate must be positive"));
        }
        if wavetable_size == 0 {
            return Err(ConfigError::InvalidTableSize(wavetable_size));
        }
        if attenuation == 0 {
            return Err(ConfigError::InvalidSettings(
                "attenuation window must be at least one sample",
            ));
        }

        Ok(Self {
            sample_rate,
            wavetable_size,
            attenuation,
        })
    }

    /// Same defaults, different output rate (e.g. whatever the device asks for).
    pub fn with_sample_rate(sample_rate: u32) -> Result<Self, ConfigError> {
        Self::new(sample_rate, DEFAULT_WAVETABLE_SIZE, DEFAULT_ATTENUATION)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn wavetable_size(&self) -> usize {
        self.wavetable_size
    }

    pub fn attenuation(&self) -> usize {
        self.attenuation
    }

    #[inline]
    pub fn samples_per_ms(&self) -> f64 {
        self.sample_rate as f64 / 1000.0
    }

    #[inline]
    pub fn ms_to_samples(&self, ms: f64) -> usize {
        (ms * self.samples_per_ms()).round().max(0.0) as usize
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            wavetable_size: DEFAULT_WAVETABLE_SIZE,
            attenuation: DEFAULT_ATTENUATION,
        }
    }
}
