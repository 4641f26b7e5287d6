use std::sync::Arc;

use crate::{
    dsp::{
        envelope::Enveloper,
        lfo::{Lfo, LfoFactory},
        wavetable::WaveTable,
    },
    error::ConfigError,
    settings::Settings,
    synth::{
        keyboard::{KeyboardSynth, Oscillator},
        pitch::PitchId,
    },
};

/// Collects the pieces of a keyboard synth and renders it in one step.
///
/// The builder is reusable: `build` borrows it, so one configuration can
/// render synths for several tracks.
#[derive(Clone)]
pub struct SynthBuilder {
    settings: Settings,
    wavetables: Option<Vec<Arc<WaveTable>>>,
    offsets: Option<Vec<f64>>,
    enveloper: Option<Enveloper>,
    pitch_lfo: Option<Lfo>,
    volume_lfo: Option<Lfo>,
}

impl SynthBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            wavetables: None,
            offsets: None,
            enveloper: None,
            pitch_lfo: None,
            volume_lfo: None,
        }
    }

    /// One table per unison oscillator.
    pub fn with_wavetables(mut self, wavetables: Vec<Arc<WaveTable>>) -> Self {
        self.wavetables = Some(wavetables);
        self
    }

    /// Frequency ratio per oscillator (1.0 = the played pitch).
    pub fn with_offsets(mut self, offsets: Vec<f64>) -> Self {
        self.offsets = Some(offsets);
        self
    }

    pub fn with_enveloper(mut self, enveloper: Enveloper) -> Self {
        self.enveloper = Some(enveloper);
        self
    }

    pub fn with_pitch_lfo(mut self, lfo: Lfo) -> Self {
        self.pitch_lfo = Some(lfo);
        self
    }

    pub fn with_volume_lfo(mut self, lfo: Lfo) -> Self {
        self.volume_lfo = Some(lfo);
        self
    }

    /// Render one voice per `(pitch, max_lifetime_ms)` pair.
    pub fn build(&self, notes: &[(PitchId, u64)]) -> Result<KeyboardSynth, ConfigError> {
        let (Some(wavetables), Some(offsets), Some(enveloper)) =
            (&self.wavetables, &self.offsets, self.enveloper)
        else {
            return Err(ConfigError::MissingComponents);
        };

        if wavetables.is_empty() || wavetables.len() != offsets.len() {
            return Err(ConfigError::OscillatorMismatch {
                wavetables: wavetables.len(),
                offsets: offsets.len(),
            });
        }

        let oscillators = wavetables
            .iter()
            .zip(offsets)
            .map(|(table, &offset)| Oscillator {
                table: Arc::clone(table),
                offset,
            })
            .collect();

        let lfos = LfoFactory::new(&self.settings);
        let pitch_lfo = self.pitch_lfo.clone().unwrap_or_else(|| lfos.flat(1.0));
        let volume_lfo = self.volume_lfo.clone().unwrap_or_else(|| lfos.flat(1.0));

        KeyboardSynth::new(
            self.settings,
            oscillators,
            pitch_lfo,
            volume_lfo,
            enveloper,
            notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetable::WaveShape;

    fn table(shape: WaveShape) -> Arc<WaveTable> {
        Arc::new(WaveTable::build(shape, 256).unwrap())
    }

    #[test]
    fn missing_pieces_then_mismatch_then_success() {
        let settings = Settings::default();
        let builder = SynthBuilder::new(settings)
            .with_wavetables(vec![table(WaveShape::Saw)])
            .with_offsets(vec![1.0, 2.0]);

        let err = builder.build(&[]).err().unwrap();
        assert_eq!(err, ConfigError::MissingComponents);
        assert!(err.to_string().contains("offsets, enveloper or wavetables"));

        let builder =
            builder.with_enveloper(Enveloper::new(&settings, 100.0, 1.0, 100.0).unwrap());
        let err = builder.build(&[]).err().unwrap();
        assert!(err.to_string().contains("wavetables and offsets do not match"));

        let builder =
            builder.with_wavetables(vec![table(WaveShape::Saw), table(WaveShape::Square)]);
        assert!(builder.build(&[]).is_ok());
    }

    #[test]
    fn empty_oscillator_bank_is_rejected() {
        let settings = Settings::default();
        let result = SynthBuilder::new(settings)
            .with_wavetables(vec![])
            .with_offsets(vec![])
            .with_enveloper(Enveloper::new(&settings, 1.0, 1.0, 1.0).unwrap())
            .build(&[]);
        assert!(matches!(result, Err(ConfigError::OscillatorMismatch { .. })));
    }

    #[test]
    fn builder_is_reusable() {
        let settings = Settings::default();
        let builder = SynthBuilder::new(settings)
            .with_wavetables(vec![table(WaveShape::Sine), table(WaveShape::Sine)])
            .with_offsets(vec![1.0, 1.005])
            .with_enveloper(Enveloper::new(&settings, 5.0, 0.5, 5.0).unwrap());

        let a = builder.build(&[(PitchId::from_midi(60), 10)]).unwrap();
        let b = builder.build(&[(PitchId::from_midi(64), 10)]).unwrap();
        assert_eq!(a.pitches().next(), Some(PitchId::from_midi(60)));
        assert_eq!(b.pitches().next(), Some(PitchId::from_midi(64)));
    }
}
