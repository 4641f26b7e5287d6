//! Built-in score: a short lead line over bass and a drum groove.

use wavebake::io::{Score, ScoreNote, ScoreTrack, PERCUSSION_CHANNEL};

const BEAT_MICROS: u64 = 500_000; // 120 BPM

fn note(beat: f64, key: u8, beats: Option<f64>) -> ScoreNote {
    ScoreNote {
        start_micros: (beat * BEAT_MICROS as f64) as u64,
        key,
        duration_micros: beats.map(|b| (b * BEAT_MICROS as f64) as u64),
    }
}

pub fn score() -> Score {
    // C minor: C4 Eb4 G4 F4 | Eb4 D4 C4
    let melody = [60, 63, 67, 65, 63, 62, 60, 60]
        .iter()
        .enumerate()
        .map(|(i, &key)| note(i as f64, key, Some(0.9)))
        .collect();

    let bass = [36, 36, 43, 43, 41, 41, 43, 36]
        .iter()
        .enumerate()
        .map(|(i, &key)| note(i as f64, key, Some(0.5)))
        .collect();

    let mut drums = Vec::new();
    for beat in 0..8 {
        let beat = beat as f64;
        drums.push(note(beat, if beat as u32 % 2 == 0 { 36 } else { 38 }, None));
        drums.push(note(beat, 42, None));
        drums.push(note(beat + 0.5, 42, None));
    }
    drums.push(note(8.0, 49, None));

    Score {
        tracks: vec![
            ScoreTrack::new(1, 81, melody),
            ScoreTrack::new(2, 33, bass),
            ScoreTrack::new(PERCUSSION_CHANNEL, 0, drums),
        ],
    }
}
