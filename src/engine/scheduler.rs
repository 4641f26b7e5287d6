//! Scheduler - score playback by elapsed time
//!
//! Converts the note lists of a [`Score`] into triggers as the playback clock
//! passes each note's start time. It knows nothing about synths: whoever
//! drives it decides whether triggers go straight to an [`Engine`] or through
//! the cross-thread queue.
//!
//! [`Engine`]: crate::engine::Engine

use crate::{error::SynthError, io::Score, synth::Trigger};

/// Playback state for a single track
struct TrackPlayback {
    /// (start time, trigger), sorted by start
    events: Vec<(u64, Trigger)>,
    /// Index of the next event to fire
    event_index: usize,
}

pub struct Scheduler {
    tracks: Vec<TrackPlayback>,
}

impl Scheduler {
    pub fn new(score: &Score) -> Self {
        let tracks = score
            .tracks
            .iter()
            .map(|track| TrackPlayback {
                events: track
                    .notes
                    .iter()
                    .map(|note| (note.start_micros, track.trigger_for(note)))
                    .collect(),
                event_index: 0,
            })
            .collect();

        Self { tracks }
    }

    /// Fire every event starting at or before `elapsed_micros`.
    ///
    /// Returns how many events fired. On error the failing event is already
    /// consumed, so the next call resumes after it.
    pub fn dispatch<F>(&mut self, elapsed_micros: u64, mut fire: F) -> Result<usize, SynthError>
    where
        F: FnMut(usize, Trigger) -> Result<(), SynthError>,
    {
        let mut fired = 0;
        for (track_idx, state) in self.tracks.iter_mut().enumerate() {
            while let Some(&(start, trigger)) = state.events.get(state.event_index) {
                if start > elapsed_micros {
                    break;
                }
                state.event_index += 1;
                fire(track_idx, trigger)?;
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// True once every event of every track has fired.
    pub fn is_finished(&self) -> bool {
        self.tracks
            .iter()
            .all(|t| t.event_index >= t.events.len())
    }

    /// Rewind playback to the beginning
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.event_index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{ScoreNote, ScoreTrack, PERCUSSION_CHANNEL};

    fn score() -> Score {
        let hit = |start_micros| ScoreNote {
            start_micros,
            key: 36,
            duration_micros: None,
        };
        Score {
            tracks: vec![
                ScoreTrack::new(PERCUSSION_CHANNEL, 0, vec![hit(0), hit(1_000), hit(2_000)]),
                ScoreTrack::new(PERCUSSION_CHANNEL, 0, vec![hit(1_500)]),
            ],
        }
    }

    #[test]
    fn fires_events_as_time_passes() {
        let mut scheduler = Scheduler::new(&score());
        let mut seen = Vec::new();
        let mut record = |track: usize, _: Trigger| -> Result<(), SynthError> {
            seen.push(track);
            Ok(())
        };

        assert_eq!(scheduler.dispatch(0, &mut record).unwrap(), 1);
        assert_eq!(scheduler.dispatch(0, &mut record).unwrap(), 0);
        assert_eq!(scheduler.dispatch(1_600, &mut record).unwrap(), 2);
        assert!(!scheduler.is_finished());
        assert_eq!(scheduler.dispatch(10_000, &mut record).unwrap(), 1);
        assert!(scheduler.is_finished());
        assert_eq!(seen, vec![0, 0, 1, 0]);
    }

    #[test]
    fn errors_consume_the_failing_event() {
        let mut scheduler = Scheduler::new(&score());
        let result = scheduler.dispatch(0, |_, _| Err(SynthError::UnknownTrack(0)));
        assert_eq!(result, Err(SynthError::UnknownTrack(0)));
        assert_eq!(scheduler.dispatch(0, |_, _| Ok(())).unwrap(), 0);
    }

    #[test]
    fn reset_rewinds() {
        let mut scheduler = Scheduler::new(&score());
        scheduler.dispatch(u64::MAX, |_, _| Ok(())).unwrap();
        assert!(scheduler.is_finished());
        scheduler.reset();
        assert_eq!(scheduler.dispatch(u64::MAX, |_, _| Ok(())).unwrap(), 4);
    }
}
