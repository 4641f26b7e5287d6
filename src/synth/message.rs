//! Hand-off of score triggers from a control thread to the audio thread.
//!
//! The audio thread must never see a synth mutated underneath a
//! `poll_sample` call, so triggers produced elsewhere travel through a
//! wait-free ring buffer and are applied by the engine at tick boundaries.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{error::SynthError, synth::Trigger};

/// A trigger addressed to the synth bound to `track`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackTrigger {
    pub track: usize,
    pub trigger: Trigger,
}

pub trait MessageReceiver: Send {
    fn pop(&mut self) -> Option<TrackTrigger>;
}

impl MessageReceiver for Consumer<TrackTrigger> {
    fn pop(&mut self) -> Option<TrackTrigger> {
        Consumer::pop(self).ok()
    }
}

/// Control-thread end of the queue.
pub struct TriggerSender {
    tx: Producer<TrackTrigger>,
}

impl TriggerSender {
    /// Queue a trigger; fails instead of blocking when the audio thread lags.
    pub fn send(&mut self, track: usize, trigger: Trigger) -> Result<(), SynthError> {
        self.tx
            .push(TrackTrigger { track, trigger })
            .map_err(|_| SynthError::QueueFull)
    }

    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

/// Create a bounded trigger queue.
pub fn trigger_queue(capacity: usize) -> (TriggerSender, Consumer<TrackTrigger>) {
    let (tx, rx) = RingBuffer::<TrackTrigger>::new(capacity);
    (TriggerSender { tx }, rx)
}
