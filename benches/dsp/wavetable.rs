//! Benchmarks for table construction and phase lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavebake::dsp::{WaveShape, WaveTable};

use crate::BLOCK_SIZES;

pub fn bench_wavetable(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/wavetable");

    for shape in [WaveShape::Sine, WaveShape::Saw] {
        group.bench_with_input(
            BenchmarkId::new("build", format!("{shape:?}")),
            &shape,
            |b, &shape| b.iter(|| WaveTable::build(black_box(shape), 2048).unwrap()),
        );
    }

    let table = WaveTable::build(WaveShape::Saw, 2048).unwrap();
    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        // 440 Hz at 44.1kHz through a 2048-sample table
        let step = 440.0 * 2048.0 / 44_100.0;
        let mut phase = 0.0f64;

        group.bench_with_input(BenchmarkId::new("lookup", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = table.get_at(phase);
                    phase += step;
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
