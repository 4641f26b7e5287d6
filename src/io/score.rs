//! In-memory score handed over by the (external) file parser.

use crate::synth::{PitchId, Trigger};

/// 1-based MIDI channel reserved for percussion.
pub const PERCUSSION_CHANNEL: u8 = 10;

/// Hold used for notes whose duration the parser could not determine.
pub const DEFAULT_NOTE_MICROS: u64 = 250_000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    pub tracks: Vec<ScoreTrack>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTrack {
    /// 1-based MIDI channel.
    pub channel: u8,
    /// General MIDI program (0-based); ignored on the percussion channel.
    pub program: u8,
    /// Notes sorted by `start_micros`.
    pub notes: Vec<ScoreNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreNote {
    pub start_micros: u64,
    /// MIDI key: a pitch on melodic tracks, a kit piece on percussion.
    pub key: u8,
    pub duration_micros: Option<u64>,
}

impl ScoreNote {
    pub fn duration_micros(&self) -> u64 {
        self.duration_micros.unwrap_or(DEFAULT_NOTE_MICROS)
    }
}

impl ScoreTrack {
    pub fn new(channel: u8, program: u8, mut notes: Vec<ScoreNote>) -> Self {
        notes.sort_by_key(|n| n.start_micros);
        Self {
            channel,
            program,
            notes,
        }
    }

    pub fn is_percussion(&self) -> bool {
        self.channel == PERCUSSION_CHANNEL
    }

    /// `(pitch, longest lifetime in ms)` for every distinct pitch played.
    pub fn voice_lifetimes(&self) -> Vec<(PitchId, u64)> {
        let mut lifetimes: Vec<(PitchId, u64)> = Vec::new();
        for note in &self.notes {
            let pitch = PitchId::from_midi(note.key);
            let ms = note.duration_micros() / 1000;
            match lifetimes.iter_mut().find(|(p, _)| *p == pitch) {
                Some(entry) => entry.1 = entry.1.max(ms),
                None => lifetimes.push((pitch, ms)),
            }
        }
        lifetimes
    }

    /// The trigger this track's synth expects for `note`.
    pub fn trigger_for(&self, note: &ScoreNote) -> Trigger {
        if self.is_percussion() {
            Trigger::Hit { key: note.key }
        } else {
            Trigger::Note {
                pitch: PitchId::from_midi(note.key),
                lifetime_micros: note.duration_micros(),
            }
        }
    }
}

impl Score {
    /// Time of the last note release, in microseconds.
    pub fn duration_micros(&self) -> u64 {
        self.tracks
            .iter()
            .flat_map(|t| t.notes.iter())
            .map(|n| n.start_micros + n.duration_micros())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(start_micros: u64, key: u8, duration_micros: Option<u64>) -> ScoreNote {
        ScoreNote {
            start_micros,
            key,
            duration_micros,
        }
    }

    #[test]
    fn notes_are_sorted_on_construction() {
        let track = ScoreTrack::new(1, 0, vec![note(500, 60, None), note(0, 62, None)]);
        assert_eq!(track.notes[0].start_micros, 0);
    }

    #[test]
    fn lifetimes_keep_the_longest_duration() {
        let track = ScoreTrack::new(
            1,
            0,
            vec![
                note(0, 60, Some(100_000)),
                note(10, 60, Some(300_000)),
                note(20, 64, None),
            ],
        );
        let lifetimes = track.voice_lifetimes();
        assert_eq!(lifetimes.len(), 2);
        assert!(lifetimes.contains(&(PitchId::from_midi(60), 300)));
        assert!(lifetimes.contains(&(PitchId::from_midi(64), 250)));
    }

    #[test]
    fn triggers_depend_on_channel() {
        let drums = ScoreTrack::new(PERCUSSION_CHANNEL, 0, vec![note(0, 36, None)]);
        assert_eq!(drums.trigger_for(&drums.notes[0]), Trigger::Hit { key: 36 });

        let keys = ScoreTrack::new(2, 0, vec![note(0, 69, Some(1_000))]);
        assert_eq!(
            keys.trigger_for(&keys.notes[0]),
            Trigger::Note {
                pitch: PitchId::from_hz(440.0),
                lifetime_micros: 1_000
            }
        );
    }

    #[test]
    fn score_duration_covers_last_release() {
        let score = Score {
            tracks: vec![
                ScoreTrack::new(1, 0, vec![note(0, 60, Some(1_000_000))]),
                ScoreTrack::new(2, 0, vec![note(500_000, 60, None)]),
            ],
        };
        assert_eq!(score.duration_micros(), 1_000_000);
    }
}
