use crate::{error::ConfigError, settings::Settings};

/*
Timed AHR Envelope
==================

Notes coming from a score carry their duration up front, so there is no
note-off event: the envelope knows at trigger time how long to hold. Each
voice owns one `EnvelopeIter`, a finite generator of per-sample gains that
the voice multiplies into its precomputed buffer.

Vocabulary
----------

  gain        The value emitted for one sample, 0.0 ..= sustain.
  ttl         Hold length in samples: how long the note was asked to last.
  lead-in     The anti-click window. When a voice is re-armed while still
              sounding, the last gain is ramped down to 0 before the new
              attack starts. A fresh voice spends the same window silent.
  exhausted   Every stage has been consumed. The owning voice is finished.


The Shape
---------

  gain
  S   │            ┌────────────────┐
      │           ╱                  ╲
      │   ╲      ╱                    ╲
  0.0 └────╲────╱──────────────────────╲─────→ samples
       Fade    Attack      Hold (ttl)   Release
    (lead-in)

Attack climbs to the sustain level rather than to 1.0, so the output of a
voice never exceeds sustain times its buffer amplitude.


The State Machine
-----------------

    ┌──────┐ refresh ┌──────┐   ┌────────┐   ┌──────┐   ┌─────────┐   ┌──────┐
    │ Idle │ ──────→ │ Fade │ → │ Attack │ → │ Hold │ → │ Release │ → │ Done │
    └──────┘         └──────┘   └────────┘   └──────┘   └─────────┘   └──────┘
                        ↑                                                 │
                        └──────────────────── refresh ────────────────────┘

`refresh` is allowed from any stage. Stages with a zero length are skipped.
Once Done, the iterator stays exhausted until the next `refresh`.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // never armed
    Fade,    // ramping the previous gain down to 0
    Attack,  // 0 → sustain
    Hold,    // sustain for ttl samples
    Release, // sustain → 0
    Done,    // exhausted
}

/// Envelope shape shared by every voice of a synth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enveloper {
    attack_samples: usize,
    release_samples: usize,
    lead_in_samples: usize,
    sustain_level: f32,
}

impl Enveloper {
    pub fn new(
        settings: &Settings,
        attack_ms: f64,
        sustain_level: f32,
        release_ms: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&sustain_level) {
            return Err(ConfigError::InvalidEnvelope("sustain level must be within 0..=1"));
        }
        if !attack_ms.is_finite() || !release_ms.is_finite() || attack_ms < 0.0 || release_ms < 0.0
        {
            return Err(ConfigError::InvalidEnvelope(
                "attack and release must be finite and non-negative",
            ));
        }

        Ok(Self {
            attack_samples: settings.ms_to_samples(attack_ms),
            release_samples: settings.ms_to_samples(release_ms),
            lead_in_samples: settings.attenuation(),
            sustain_level,
        })
    }

    /// Attack plus release, in samples. Voice buffers reserve this much tail.
    pub fn time(&self) -> usize {
        self.attack_samples + self.release_samples
    }

    pub fn lead_in(&self) -> usize {
        self.lead_in_samples
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    /// Samples emitted by one armed pass with the given hold length.
    pub fn total_len(&self, ttl: usize) -> usize {
        self.lead_in_samples + self.time() + ttl
    }

    pub fn create_iterator(&self) -> EnvelopeIter {
        EnvelopeIter {
            shape: *self,
            stage: EnvelopeState::Idle,
            elapsed: 0,
            ttl: 0,
            level: 0.0,
            fade_from: 0.0,
        }
    }
}

pub struct EnvelopeIter {
    shape: Enveloper,
    stage: EnvelopeState,
    elapsed: usize, // samples spent in the current stage
    ttl: usize,
    level: f32, // fade source for the next refresh
    fade_from: f32,
}

impl EnvelopeIter {
    /// Re-arm for a note held `ttl` samples, starting with the lead-in fade.
    pub fn refresh(&mut self, ttl: usize) {
        self.ttl = ttl;
        self.fade_from = self.level;
        self.elapsed = 0;
        self.stage = EnvelopeState::Fade;
        self.skip_empty_stages();
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Done)
    }

    /// Next gain; 0.0 once exhausted.
    #[inline]
    pub fn next_gain(&mut self) -> f32 {
        let sustain = self.shape.sustain_level;
        let step = (self.elapsed + 1) as f32;

        let gain = match self.stage {
            EnvelopeState::Idle | EnvelopeState::Done => return 0.0,
            EnvelopeState::Fade => {
                self.fade_from * (1.0 - step / self.shape.lead_in_samples as f32)
            }
            EnvelopeState::Attack => sustain * (step / self.shape.attack_samples as f32),
            EnvelopeState::Hold => sustain,
            EnvelopeState::Release => {
                sustain * (1.0 - step / self.shape.release_samples as f32)
            }
        }
        .clamp(0.0, sustain.max(self.fade_from));
        self.level = gain;

        self.elapsed += 1;
        if self.elapsed >= self.stage_len(self.stage) {
            self.elapsed = 0;
            self.stage = Self::following(self.stage);
            // resets the fade source once Done, not the gain emitted here
            self.skip_empty_stages();
        }

        gain
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    /// Gain the next `refresh` fades from: the most recent `next_gain`
    /// output, or 0.0 once the pass is exhausted.
    pub fn level(&self) -> f32 {
        self.level
    }

    fn stage_len(&self, stage: EnvelopeState) -> usize {
        match stage {
            EnvelopeState::Fade => self.shape.lead_in_samples,
            EnvelopeState::Attack => self.shape.attack_samples,
            EnvelopeState::Hold => self.ttl,
            EnvelopeState::Release => self.shape.release_samples,
            EnvelopeState::Idle | EnvelopeState::Done => usize::MAX,
        }
    }

    fn following(stage: EnvelopeState) -> EnvelopeState {
        match stage {
            EnvelopeState::Fade => EnvelopeState::Attack,
            EnvelopeState::Attack => EnvelopeState::Hold,
            EnvelopeState::Hold => EnvelopeState::Release,
            EnvelopeState::Release | EnvelopeState::Done => EnvelopeState::Done,
            EnvelopeState::Idle => EnvelopeState::Idle,
        }
    }

    fn skip_empty_stages(&mut self) {
        while self.has_next() && self.stage_len(self.stage) == 0 {
            self.stage = Self::following(self.stage);
        }
        if self.stage == EnvelopeState::Done {
            self.level = 0.0;
        }
    }
}

impl Iterator for EnvelopeIter {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        self.has_next().then(|| self.next_gain())
    }
}
