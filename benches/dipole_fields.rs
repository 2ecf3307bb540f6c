use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use em_dipole::fields::{compute_fields, ReceiverOffset, SpatialResolution};
use em_dipole::waveforms::{Waveform, WaveformKind};

fn bench_dipole_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("dipole_fields");
    let resolution = SpatialResolution::uniform(1.0e-3);
    let receiver = ReceiverOffset::new(0.03, 0.01, 0.02);

    for iterations in [1_000usize, 10_000] {
        group.bench_function(BenchmarkId::new("serial", iterations), |b| {
            b.iter(|| compute_fields(iterations, 1.0e-12, resolution, receiver))
        });
    }
    group.finish();
}

fn bench_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("waveforms");
    let times: Vec<f64> = (0..10_000).map(|i| i as f64 * 1.0e-12).collect();

    for kind in WaveformKind::ALL {
        let waveform = Waveform::new(kind, 1.0, 1.0e9);
        group.bench_function(BenchmarkId::new(kind.name(), times.len()), |b| {
            b.iter(|| times.iter().map(|&t| waveform.value(t, 1.0e-12)).sum::<f64>())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dipole_fields, bench_waveforms);
criterion_main!(benches);
