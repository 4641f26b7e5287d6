//! Benchmarks for envelope stepping.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavebake::dsp::Enveloper;
use wavebake::Settings;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let settings = Settings::default();
    let env = Enveloper::new(&settings, 100.0, 0.7, 300.0).unwrap();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        let mut iter = env.create_iterator();
        iter.refresh(usize::MAX / 2);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = iter.next_gain();
                }
                black_box(&buffer);
            })
        });

        // Hold phase (steady sustain)
        let mut iter = env.create_iterator();
        iter.refresh(usize::MAX / 2);
        for _ in 0..env.lead_in() + settings.ms_to_samples(100.0) {
            iter.next_gain();
        }
        group.bench_with_input(BenchmarkId::new("hold", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = iter.next_gain();
                }
                black_box(&buffer);
            })
        });
    }

    // Whole gain curve for one 500ms note, as done once per pitch at build
    group.bench_function("full_curve_500ms", |b| {
        let ttl = settings.ms_to_samples(500.0);
        b.iter(|| {
            let mut iter = env.create_iterator();
            iter.refresh(black_box(ttl));
            black_box(iter.sum::<f32>())
        })
    });

    group.finish();
}
