use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vented_box::circuits::{solve_with, BoxAcoustics, MeshSystem};
use vented_box::constants::angular_frequency;
use vented_box::reference::{reference_driver, reference_enclosure};
use vented_box::sweep::{frequency_grid, run_sweep, CurveKind};
use vented_box::tuning::estimate_tuning;

fn bench_reference_sweep(c: &mut Criterion) {
    let driver = reference_driver();
    let enclosure = reference_enclosure();
    let mut group = c.benchmark_group("reference_sweep");

    for kind in [CurveKind::Impedance, CurveKind::GroupDelay] {
        group.bench_function(BenchmarkId::new(kind.column(), "10-200Hz"), |b| {
            b.iter(|| run_sweep(10.0, 200.0, 0.5, &driver, &enclosure, black_box(kind)))
        });
    }
    group.finish();
}

fn bench_solve_paths(c: &mut Criterion) {
    let driver = reference_driver();
    let enclosure = reference_enclosure();
    let fb = estimate_tuning(&enclosure).expect("reference geometry");
    let acoustics = BoxAcoustics::new(&enclosure, fb).expect("reference box");
    let freqs = frequency_grid(1.0, 1000.0, 1.0).expect("grid");

    let mut group = c.benchmark_group("solve_paths");
    group.bench_function(BenchmarkId::new("closed_form", freqs.len()), |b| {
        b.iter(|| {
            for &f in &freqs {
                let _ = black_box(solve_with(f, &driver, &enclosure, &acoustics));
            }
        })
    });
    group.bench_function(BenchmarkId::new("mesh_lu", freqs.len()), |b| {
        b.iter(|| {
            for &f in &freqs {
                let system = MeshSystem::assemble(angular_frequency(f), &driver, &acoustics);
                let _ = black_box(system.and_then(|s| s.solve()));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reference_sweep, bench_solve_paths);
criterion_main!(benches);
