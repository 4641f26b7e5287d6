use rayon::prelude::*;

use crate::{
    error::SynthError,
    settings::Settings,
    synth::{Synth, Trigger},
    voices::{self, Percussion},
};

/*
One-Shot Percussion
===================

Every kit piece owns a fixed pre-rendered hit. Triggering never starts the
hit mid-waveform: the voice first ramps whatever it was last emitting down to
exactly zero over the attenuation window, then plays the hit from sample 0.

    retrigger while sounding          trigger from idle

    ╲╱╲╱╲                              (A samples of silence)
         ╲___                          ______
             ╲__ 0 ╱╲╱╲╱...                  ╱╲╱╲╱...
        |<- A ->|                      |<- A ->|

The fade sample j (0-based) is `last * ((A - 1 - j) / A)`: the first faded
sample is already below `last`, the last sample of the window is exactly 0,
and the magnitude strictly decreases across the window whenever `last` is
non-zero. A piece whose hit rendered to nothing (very low sample rates)
goes straight back to idle after its window.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
enum HitState {
    Idle,
    Fading { from: f32, step: usize },
    Playing,
}

struct DrumVoice {
    hit: Box<[f32]>,
    cursor: usize,
    state: HitState,
    last: f32,
}

impl DrumVoice {
    #[inline]
    fn next_sample(&mut self, attenuation: usize) -> f32 {
        let out = match self.state {
            HitState::Idle => 0.0,
            HitState::Fading { from, step } => {
                let out = from * ((attenuation - 1 - step) as f32 / attenuation as f32);
                self.state = if step + 1 >= attenuation {
                    self.cursor = 0;
                    if self.hit.is_empty() {
                        HitState::Idle
                    } else {
                        HitState::Playing
                    }
                } else {
                    HitState::Fading {
                        from,
                        step: step + 1,
                    }
                };
                out
            }
            HitState::Playing => {
                let out = self.hit[self.cursor];
                self.cursor += 1;
                if self.cursor >= self.hit.len() {
                    self.state = HitState::Idle;
                }
                out
            }
        };
        self.last = out;
        out
    }
}

pub struct DrumSynth {
    attenuation: usize,
    voices: Vec<DrumVoice>, // indexed by Percussion::index
    active: Vec<usize>,
}

impl DrumSynth {
    /// Render the whole kit.
    pub fn new(settings: &Settings) -> Self {
        let kit: Vec<DrumVoice> = Percussion::ALL
            .par_iter()
            .map(|&piece| DrumVoice {
                hit: voices::render(piece, settings).into_boxed_slice(),
                cursor: 0,
                state: HitState::Idle,
                last: 0.0,
            })
            .collect();

        tracing::info!(
            pieces = kit.len(),
            samples = kit.iter().map(|v| v.hit.len()).sum::<usize>(),
            "drum kit rendered"
        );

        Self {
            attenuation: settings.attenuation(),
            active: Vec::with_capacity(kit.len()),
            voices: kit,
        }
    }

    /// Start `piece`, fading out whatever it is currently playing first.
    pub fn trigger_percussion(&mut self, piece: Percussion) {
        let slot = piece.index();
        let voice = &mut self.voices[slot];

        let from = if voice.state == HitState::Idle {
            0.0
        } else {
            voice.last
        };
        voice.state = HitState::Fading { from, step: 0 };

        if !self.active.contains(&slot) {
            self.active.push(slot);
        }
    }

    /// Trigger by General MIDI drum key.
    pub fn trigger_midi(&mut self, key: u8) -> Result<(), SynthError> {
        let piece = Percussion::from_midi_key(key).ok_or(SynthError::UnknownPercussion(key))?;
        self.trigger_percussion(piece);
        Ok(())
    }

    pub fn poll_sample(&mut self) -> f32 {
        let voices = &mut self.voices;
        let attenuation = self.attenuation;
        self.active
            .iter()
            .map(|&slot| voices[slot].next_sample(attenuation))
            .sum()
    }

    /// Number of pieces still fading or inside their hit buffer.
    pub fn active_voice_count(&mut self) -> usize {
        let voices = &self.voices;
        self.active.retain(|&slot| voices[slot].state != HitState::Idle);
        self.active.len()
    }

    /// Length of the pre-rendered hit for `piece`.
    pub fn hit_len(&self, piece: Percussion) -> usize {
        self.voices[piece.index()].hit.len()
    }
}

impl Synth for DrumSynth {
    fn trigger(&mut self, trigger: Trigger) -> Result<(), SynthError> {
        match trigger {
            Trigger::Hit { key } => self.trigger_midi(key),
            Trigger::Note { .. } => Err(SynthError::UnsupportedTrigger),
        }
    }

    fn poll_sample(&mut self) -> f32 {
        DrumSynth::poll_sample(self)
    }

    fn active_voice_count(&mut self) -> usize {
        DrumSynth::active_voice_count(self)
    }
}
