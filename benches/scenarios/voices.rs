//! Benchmarks for building and playing keyboard and drum synths.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavebake::patch::Patch;
use wavebake::voices::Percussion;
use wavebake::{DrumSynth, PitchId, Settings};

use crate::BLOCK_SIZES;

/// One octave of C major starting at middle C.
const CHORD_KEYS: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let settings = Settings::default();

    // === RENDER ===
    // Building a synth renders every voice buffer (in parallel)
    for count in [1usize, 8, 32] {
        let builder = Patch::lead().builder(&settings).unwrap();
        let notes: Vec<(PitchId, u64)> = (0..count)
            .map(|i| (PitchId::from_midi(48 + i as u8), 500))
            .collect();
        group.sample_size(10);
        group.bench_with_input(BenchmarkId::new("render_lead", count), &notes, |b, notes| {
            b.iter(|| builder.build(black_box(notes)).unwrap())
        });
    }
    group.sample_size(100);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === POLYPHONIC PLAYBACK ===
        // 8 sustained pad voices summed per sample
        let notes: Vec<(PitchId, u64)> = CHORD_KEYS
            .iter()
            .map(|&k| (PitchId::from_midi(k), 2000))
            .collect();
        let mut pad = Patch::pad()
            .builder(&settings)
            .unwrap()
            .build(&notes)
            .unwrap();
        for &(pitch, _) in &notes {
            pad.trigger(pitch, 2_000_000).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("pad_8_voices", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = pad.poll_sample();
                }
                black_box(&buffer);
            })
        });

        // === DRUM KIT ===
        // Every piece sounding at once
        let mut drums = DrumSynth::new(&settings);
        group.bench_with_input(BenchmarkId::new("full_kit", size), &size, |b, _| {
            b.iter(|| {
                if drums.active_voice_count() < Percussion::ALL.len() {
                    for piece in Percussion::ALL {
                        drums.trigger_percussion(piece);
                    }
                }
                for s in buffer.iter_mut() {
                    *s = drums.poll_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
