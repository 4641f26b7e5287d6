pub mod dsp;
pub mod engine; // Per-track mixing and score scheduling
pub mod error;
pub mod io;
pub mod patch;
pub mod settings;
pub mod synth; // Voice management: keyboard and drum synths
pub mod voices; // Pre-rendered percussion hits

pub use engine::{render_score, Engine, Scheduler};
pub use error::{ConfigError, SynthError};
pub use settings::Settings;
pub use synth::{DrumSynth, KeyboardSynth, PitchId, Synth, SynthBuilder, Trigger};

/// Samples handed to the audio callback per engine render call.
pub const MAX_BLOCK_SIZE: usize = 2048;
