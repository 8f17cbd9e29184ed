//! Benchmarks for nodal assembly and the full solve pipeline.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lapnet_core::{CircuitModel, ComponentKind, Waveform};
use lapnet_solver::{NodalSystem, SampleGrid, SolveOptions, solve_circuit};
use lapnet_symbolic::RationalAlgebra;

/// RC ladder: `sections` series resistors, each tap shunted to ground by a capacitor.
fn rc_ladder(sections: usize) -> CircuitModel {
    let mut circuit = CircuitModel::new();
    for i in 0..sections {
        let from = format!("n{}", i);
        let to = format!("n{}", i + 1);
        circuit.add_component(ComponentKind::Resistor, 1.0, from, to.clone());
        circuit.add_component(ComponentKind::Capacitor, 0.1 * (i + 1) as f64, to, "GND");
    }
    circuit.add_source(1.0, 0.0, Waveform::Dc, "n0");
    circuit
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("nodal_build");

    for sections in [1, 2, 4, 8] {
        let circuit = rc_ladder(sections);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &circuit,
            |bencher, circuit| {
                bencher.iter(|| NodalSystem::build(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_ladder");
    let algebra = RationalAlgebra::new();
    let options = SolveOptions::new().with_grid(SampleGrid::default().with_num_points(100));

    for sections in [1, 2, 3, 4] {
        let circuit = rc_ladder(sections);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &circuit,
            |bencher, circuit| {
                bencher.iter(|| solve_circuit(black_box(circuit), &algebra, &options).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_solve);
criterion_main!(benches);
