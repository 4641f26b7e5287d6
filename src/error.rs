//! Error types for synth construction and triggering.

use thiserror::Error;

use crate::synth::pitch::PitchId;

/// Problems detected while building tables, curves, envelopes or synths.
///
/// Construction fails as a whole: a builder that returns one of these never
/// hands back a partially rendered synth.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("offsets, enveloper or wavetables are missing")]
    MissingComponents,

    #[error("wavetables and offsets do not match ({wavetables} wavetables, {offsets} offsets)")]
    OscillatorMismatch { wavetables: usize, offsets: usize },

    #[error("wavetable size must be positive, got {0}")]
    InvalidTableSize(usize),

    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(&'static str),

    #[error("interval curve needs at least one level")]
    EmptyIntervals,

    /// An LFO produced NaN or infinity while a voice buffer was rendered.
    #[error("non-finite modulation value for {pitch} at sample {index}")]
    NonFiniteModulation { pitch: PitchId, index: u64 },
}

/// Errors returned while driving synths at playback time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("pitch {0} was not configured on this synth")]
    UnknownPitch(PitchId),

    #[error("no percussion voice is mapped to key {0}")]
    UnknownPercussion(u8),

    #[error("lifetime of {requested_ms} ms for {pitch} exceeds the configured {max_ms} ms")]
    LifetimeExceeded {
        pitch: PitchId,
        requested_ms: u64,
        max_ms: u64,
    },

    #[error("trigger kind not supported by this synth")]
    UnsupportedTrigger,

    #[error("no synth bound to track {0}")]
    UnknownTrack(usize),

    #[error("trigger queue is full")]
    QueueFull,
}
