use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    dsp::{
        envelope::{Enveloper, EnvelopeIter},
        lfo::Lfo,
        wavetable::WaveTable,
    },
    error::{ConfigError, SynthError},
    settings::Settings,
    synth::{pitch::PitchId, Synth, Trigger},
};

/*
Baked Unison Voices
===================

Every pitch a track will ever play is known before playback starts, so the
expensive part of synthesis happens once, at construction:

    for each unison oscillator i:
        step_i   = table_size * offset_i * pitch / sample_rate
        phase_i += step_i * pitch_lfo(k)
    buffer[k] = mean_i(table_i[phase_i]) * volume_lfo(k)

Vibrato (pitch curve) and tremolo (volume curve) are therefore frozen into
the buffer. Playback is just

    out = buffer[cursor] * envelope.next_gain()

summed over the sounding voices, which costs one multiply-add per voice per
sample and never allocates.

One voice per pitch: retriggering a pitch that is still sounding re-arms
its envelope (with the anti-click fade) rather than stacking a second copy.
The cursor is not rewound on retrigger; it keeps cycling through the buffer.
*/

pub(crate) struct Oscillator {
    pub table: Arc<WaveTable>,
    pub offset: f64,
}

struct KeyVoice {
    pitch: PitchId,
    max_lifetime_ms: u64,
    buffer: Box<[f32]>,
    cursor: usize,
    envelope: EnvelopeIter,
}

impl KeyVoice {
    fn render(
        settings: &Settings,
        pitch: PitchId,
        max_lifetime_ms: u64,
        oscillators: &[Oscillator],
        pitch_lfo: &Lfo,
        volume_lfo: &Lfo,
        enveloper: &Enveloper,
    ) -> Result<Self, ConfigError> {
        let len = settings.ms_to_samples(max_lifetime_ms as f64)
            + enveloper.time()
            + enveloper.lead_in();
        let sample_rate = settings.sample_rate() as f64;
        let count = oscillators.len() as f64;

        let steps: Vec<f64> = oscillators
            .iter()
            .map(|osc| osc.table.len() as f64 * osc.offset * pitch.hz() / sample_rate)
            .collect();
        let mut phases = vec![0.0f64; oscillators.len()];
        let mut buffer = Vec::with_capacity(len);

        for k in 0..len as u64 {
            let bend = pitch_lfo(k);
            let level = volume_lfo(k);
            if !bend.is_finite() || !level.is_finite() {
                return Err(ConfigError::NonFiniteModulation { pitch, index: k });
            }

            let mut sum = 0.0f64;
            for ((osc, phase), step) in oscillators.iter().zip(&mut phases).zip(&steps) {
                let table_len = osc.table.len() as f64;
                *phase = (*phase + step * bend as f64).rem_euclid(table_len);
                sum += osc.table.get_at(*phase) as f64;
            }
            buffer.push((sum / count * level as f64) as f32);
        }

        Ok(Self {
            pitch,
            max_lifetime_ms,
            buffer: buffer.into_boxed_slice(),
            cursor: 0,
            envelope: enveloper.create_iterator(),
        })
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let sample = self.buffer[self.cursor] * self.envelope.next_gain();
        self.cursor = (self.cursor + 1) % self.buffer.len();
        sample
    }
}

pub struct KeyboardSynth {
    settings: Settings,
    voices: Vec<KeyVoice>,
    index: HashMap<PitchId, usize>,
    /// Indices into `voices` currently sounding. Capacity is reserved for
    /// every voice up front so pushes never reallocate.
    active: Vec<usize>,
    is_active: Vec<bool>,
}

impl KeyboardSynth {
    /// Render every voice. Usually reached through [`SynthBuilder::build`].
    ///
    /// [`SynthBuilder::build`]: crate::synth::SynthBuilder::build
    pub(crate) fn new(
        settings: Settings,
        oscillators: Vec<Oscillator>,
        pitch_lfo: Lfo,
        volume_lfo: Lfo,
        enveloper: Enveloper,
        notes: &[(PitchId, u64)],
    ) -> Result<Self, ConfigError> {
        // Duplicate pitches keep the longest declared lifetime.
        let mut lifetimes: Vec<(PitchId, u64)> = Vec::with_capacity(notes.len());
        for &(pitch, ms) in notes {
            match lifetimes.iter_mut().find(|(p, _)| *p == pitch) {
                Some(entry) => entry.1 = entry.1.max(ms),
                None => lifetimes.push((pitch, ms)),
            }
        }

        let voices = lifetimes
            .par_iter()
            .map(|&(pitch, ms)| {
                KeyVoice::render(
                    &settings,
                    pitch,
                    ms,
                    &oscillators,
                    &pitch_lfo,
                    &volume_lfo,
                    &enveloper,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let index = voices
            .iter()
            .enumerate()
            .map(|(i, voice)| (voice.pitch, i))
            .collect();
        let buffered: usize = voices.iter().map(|v| v.buffer.len()).sum();

        tracing::info!(
            pitches = voices.len(),
            oscillators = oscillators.len(),
            buffer_bytes = buffered * std::mem::size_of::<f32>(),
            "keyboard synth rendered"
        );

        Ok(Self {
            settings,
            active: Vec::with_capacity(voices.len()),
            is_active: vec![false; voices.len()],
            voices,
            index,
        })
    }

    /// Start (or restart) `pitch` for `lifetime_micros`.
    pub fn trigger(&mut self, pitch: PitchId, lifetime_micros: u64) -> Result<(), SynthError> {
        let &slot = self
            .index
            .get(&pitch)
            .ok_or(SynthError::UnknownPitch(pitch))?;
        let voice = &mut self.voices[slot];

        let ttl_ms = lifetime_micros / 1000;
        if ttl_ms > voice.max_lifetime_ms {
            return Err(SynthError::LifetimeExceeded {
                pitch,
                requested_ms: ttl_ms,
                max_ms: voice.max_lifetime_ms,
            });
        }

        voice.envelope.refresh(self.settings.ms_to_samples(ttl_ms as f64));
        if !self.is_active[slot] {
            self.is_active[slot] = true;
            self.active.push(slot);
        }
        Ok(())
    }

    /// Sum of every sounding voice for one sample.
    pub fn poll_sample(&mut self) -> f32 {
        let voices = &mut self.voices;
        self.active
            .iter()
            .map(|&slot| voices[slot].next_sample())
            .sum()
    }

    /// Drop voices whose envelope is exhausted and report how many remain.
    pub fn active_voice_count(&mut self) -> usize {
        let voices = &self.voices;
        let flags = &mut self.is_active;
        self.active.retain(|&slot| {
            let alive = voices[slot].envelope.has_next();
            if !alive {
                flags[slot] = false;
            }
            alive
        });
        self.active.len()
    }

    pub fn pitches(&self) -> impl Iterator<Item = PitchId> + '_ {
        self.voices.iter().map(|v| v.pitch)
    }

    /// Length of the precomputed buffer for `pitch`, if configured.
    pub fn buffer_len(&self, pitch: PitchId) -> Option<usize> {
        self.index.get(&pitch).map(|&slot| self.voices[slot].buffer.len())
    }
}

impl Synth for KeyboardSynth {
    fn trigger(&mut self, trigger: Trigger) -> Result<(), SynthError> {
        match trigger {
            Trigger::Note {
                pitch,
                lifetime_micros,
            } => KeyboardSynth::trigger(self, pitch, lifetime_micros),
            Trigger::Hit { .. } => Err(SynthError::UnsupportedTrigger),
        }
    }

    fn poll_sample(&mut self) -> f32 {
        KeyboardSynth::poll_sample(self)
    }

    fn active_voice_count(&mut self) -> usize {
        KeyboardSynth::active_voice_count(self)
    }
}
