//! Pre-rendered percussion hits.
//!
//! Each kit piece is a pure function from [`Settings`] to a one-shot sample
//! buffer. Study them to learn how different drum timbres are built from
//! decaying tones and filtered noise.
//!
//! # Example
//!
//! ```
//! use wavebake::{settings::Settings, voices::{self, Percussion}};
//!
//! let settings = Settings::default();
//! let kick = voices::render(Percussion::Kick, &settings);
//! assert!(kick[0] > 0.0);
//! assert_eq!(Percussion::from_midi_key(38), Some(Percussion::Snare));
//! ```

mod clap;
mod cymbal;
mod hihat;
mod kick;
mod snare;
mod tom;

use crate::settings::Settings;

pub use clap::clap;
pub use cymbal::{crash, ride};
pub use hihat::{closed_hat, open_hat};
pub use kick::kick;
pub use snare::snare;
pub use tom::tom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percussion {
    Kick,
    Snare,
    ClosedHat,
    OpenHat,
    Clap,
    Tom,
    Crash,
    Ride,
}

impl Percussion {
    pub const ALL: [Percussion; 8] = [
        Percussion::Kick,
        Percussion::Snare,
        Percussion::ClosedHat,
        Percussion::OpenHat,
        Percussion::Clap,
        Percussion::Tom,
        Percussion::Crash,
        Percussion::Ride,
    ];

    /// Map a General MIDI percussion key (channel 10) to a kit piece.
    pub fn from_midi_key(key: u8) -> Option<Self> {
        match key {
            35 | 36 => Some(Percussion::Kick),
            37 | 38 | 40 => Some(Percussion::Snare),
            39 => Some(Percussion::Clap),
            42 | 44 => Some(Percussion::ClosedHat),
            46 => Some(Percussion::OpenHat),
            41 | 43 | 45 | 47 | 48 | 50 => Some(Percussion::Tom),
            49 | 52 | 55 | 57 => Some(Percussion::Crash),
            51 | 53 | 59 => Some(Percussion::Ride),
            _ => None,
        }
    }

    /// Position in [`Percussion::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Render the one-shot buffer for `piece`.
pub fn render(piece: Percussion, settings: &Settings) -> Vec<f32> {
    match piece {
        Percussion::Kick => kick(settings),
        Percussion::Snare => snare(settings),
        Percussion::ClosedHat => closed_hat(settings),
        Percussion::OpenHat => open_hat(settings),
        Percussion::Clap => clap(settings),
        Percussion::Tom => tom(settings),
        Percussion::Crash => crash(settings),
        Percussion::Ride => ride(settings),
    }
}

/// Deterministic white noise (xorshift32), so kits render identically
/// on every run.
pub(crate) struct Noise {
    state: u32,
}

impl Noise {
    pub(crate) fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Uniform sample in [-1.0, 1.0].
    #[inline]
    pub(crate) fn next_sample(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f64 / u32::MAX as f64 * 2.0 - 1.0) as f32
    }
}

/// Exponential decay reaching -60 dB after `decay_ms`.
#[inline]
pub(crate) fn decay(i: usize, decay_ms: f64, settings: &Settings) -> f64 {
    let t60 = (decay_ms * settings.samples_per_ms()).max(1.0);
    (-6.907_755 * i as f64 / t60).exp()
}
