//! Per-track synths mixed into one output stream.

pub mod scheduler;

pub use scheduler::Scheduler;

use crate::{
    error::SynthError,
    io::{AudioSink, Score, ScoreTrack},
    patch::Patch,
    settings::Settings,
    synth::{DrumSynth, Synth, Trigger},
};

#[cfg(feature = "rtrb")]
use crate::synth::message::{MessageReceiver, TrackTrigger};

/// Owns one synth per score track and produces one mixed sample per tick.
pub struct Engine {
    settings: Settings,
    tracks: Vec<Box<dyn Synth>>,
    clock: u64,
    #[cfg(feature = "rtrb")]
    queue: Option<Box<dyn MessageReceiver>>,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tracks: Vec::new(),
            clock: 0,
            #[cfg(feature = "rtrb")]
            queue: None,
        }
    }

    /// Bind every track of `score`: the percussion channel gets the drum
    /// kit, everything else a keyboard synth rendered from its program.
    pub fn from_score(score: &Score, settings: Settings) -> Result<Self, SynthError> {
        let mut engine = Self::new(settings);
        for track in &score.tracks {
            if track.is_percussion() {
                engine.add_drum();
            } else {
                engine.add_synth(track)?;
            }
        }

        tracing::info!(
            tracks = engine.tracks.len(),
            sample_rate = settings.sample_rate(),
            "engine ready"
        );
        Ok(engine)
    }

    /// Render a keyboard synth for `track` and bind it to the next index.
    pub fn add_synth(&mut self, track: &ScoreTrack) -> Result<usize, SynthError> {
        let patch = Patch::for_program(track.program);
        let synth = patch
            .builder(&self.settings)?
            .build(&track.voice_lifetimes())?;

        tracing::debug!(
            track = self.tracks.len(),
            channel = track.channel,
            patch = %patch.name,
            "bound keyboard synth"
        );
        Ok(self.add(synth))
    }

    /// Bind a fresh drum kit to the next index.
    pub fn add_drum(&mut self) -> usize {
        tracing::debug!(track = self.tracks.len(), "bound drum synth");
        self.add(DrumSynth::new(&self.settings))
    }

    /// Bind an already built synth to the next index.
    pub fn add<S: Synth + 'static>(&mut self, synth: S) -> usize {
        self.tracks.push(Box::new(synth));
        self.tracks.len() - 1
    }

    pub fn get_synth(&mut self, track: usize) -> Option<&mut dyn Synth> {
        self.tracks
            .get_mut(track)
            .map(|synth| synth.as_mut() as &mut dyn Synth)
    }

    /// Trigger directly. Only call this from the thread that pulls audio;
    /// other threads go through [`Engine::attach_queue`].
    pub fn trigger(&mut self, track: usize, trigger: Trigger) -> Result<(), SynthError> {
        self.tracks
            .get_mut(track)
            .ok_or(SynthError::UnknownTrack(track))?
            .trigger(trigger)
    }

    /// Receive triggers from another thread; they are applied at the start
    /// of each tick, never while a synth is being polled.
    #[cfg(feature = "rtrb")]
    pub fn attach_queue<R: MessageReceiver + 'static>(&mut self, receiver: R) {
        self.queue = Some(Box::new(receiver));
    }

    #[cfg(feature = "rtrb")]
    fn drain_queue(&mut self) {
        let Some(queue) = self.queue.as_mut() else {
            return;
        };
        while let Some(TrackTrigger { track, trigger }) = queue.pop() {
            let result = match self.tracks.get_mut(track) {
                Some(synth) => synth.trigger(trigger),
                None => Err(SynthError::UnknownTrack(track)),
            };
            if let Err(err) = result {
                tracing::warn!(track, %err, "dropped queued trigger");
            }
        }
    }

    /// One mixing tick: apply queued triggers, prune finished voices, sum
    /// the synths that are still sounding.
    pub fn next_frame(&mut self) -> f32 {
        #[cfg(feature = "rtrb")]
        self.drain_queue();

        let mut frame = 0.0;
        for synth in &mut self.tracks {
            if synth.active_voice_count() > 0 {
                frame += synth.poll_sample();
            }
        }
        self.clock += 1;
        frame
    }

    /// Mix one tick and hand it to `sink`.
    pub fn play_buffer(&mut self, sink: &mut dyn AudioSink) {
        let frame = self.next_frame();
        sink.write_sample(frame);
    }

    /// Fill `out` with consecutive ticks.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_frame();
        }
    }

    /// Voices sounding across all tracks (prunes as a side effect).
    pub fn active_voice_count(&mut self) -> usize {
        self.tracks.iter_mut().map(|s| s.active_voice_count()).sum()
    }

    /// Ticks mixed so far.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn clock_micros(&self) -> u64 {
        self.clock * 1_000_000 / self.settings.sample_rate() as u64
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Render `score` offline until every note has finished sounding.
pub fn render_score(score: &Score, settings: Settings) -> Result<Vec<f32>, SynthError> {
    let mut engine = Engine::from_score(score, settings)?;
    let mut scheduler = Scheduler::new(score);
    let mut out = Vec::new();

    loop {
        let now = engine.clock_micros();
        scheduler.dispatch(now, |track, trigger| engine.trigger(track, trigger))?;
        engine.play_buffer(&mut out);

        if scheduler.is_finished() && engine.active_voice_count() == 0 {
            break;
        }
    }

    Ok(out)
}
