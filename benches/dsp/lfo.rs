//! Benchmarks for LFO curve evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavebake::dsp::{Lfo, LfoFactory};
use wavebake::Settings;

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");
    let lfos = LfoFactory::new(&Settings::default());

    let curves: [(&str, Lfo); 4] = [
        ("flat", lfos.flat(1.0)),
        ("sine", lfos.sine(1.02, 0.98, 200.0)),
        ("square", lfos.square(1.0, 0.5, 125.0)),
        ("intervals", lfos.intervals(&[1.0, 0.75, 0.5, 0.25], 400.0).unwrap()),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, lfo) in &curves {
            let mut k = 0u64;
            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| {
                    for s in buffer.iter_mut() {
                        *s = lfo(black_box(k));
                        k += 1;
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
