//! Benchmarks for multi-track engine rendering.
//!
//! These drive the engine the way the player does: triggers arrive on
//! tracks and whole blocks are rendered at once.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavebake::io::{Score, ScoreNote, ScoreTrack, PERCUSSION_CHANNEL};
use wavebake::{Engine, Settings};

use crate::BLOCK_SIZES;

fn note(key: u8) -> ScoreNote {
    ScoreNote {
        start_micros: 0,
        key,
        duration_micros: Some(1_000_000),
    }
}

/// Lead, bass, pad and drums, each with a handful of keys.
fn arrangement() -> Score {
    Score {
        tracks: vec![
            ScoreTrack::new(1, 81, [60, 64, 67, 72].map(note).into()),
            ScoreTrack::new(2, 33, [36, 43].map(note).into()),
            ScoreTrack::new(3, 48, [48, 52, 55].map(note).into()),
            ScoreTrack::new(PERCUSSION_CHANNEL, 0, [36, 38, 42].map(note).into()),
        ],
    }
}

/// Trigger every key of the arrangement on its track.
fn retrigger_all(engine: &mut Engine, score: &Score) {
    for (track, score_track) in score.tracks.iter().enumerate() {
        for n in &score_track.notes {
            engine.trigger(track, score_track.trigger_for(n)).unwrap();
        }
    }
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let settings = Settings::default();
    let score = arrangement();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === IDLE ENGINE ===
        // Baseline: tracks loaded, nothing sounding
        let mut idle = Engine::from_score(&score, settings).unwrap();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut buffer)))
        });

        // === FULL ARRANGEMENT ===
        // 4 tracks, 12 voices sounding
        let mut full = Engine::from_score(&score, settings).unwrap();
        retrigger_all(&mut full, &score);
        group.bench_with_input(BenchmarkId::new("4_track_full", size), &size, |b, _| {
            b.iter(|| {
                if full.active_voice_count() == 0 {
                    retrigger_all(&mut full, &score);
                }
                full.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
