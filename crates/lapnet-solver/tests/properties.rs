//! End-to-end circuit properties: build, solve, invert and sample.

use std::f64::consts::PI;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lapnet_core::{CircuitModel, Component, ComponentKind, NodeId, Waveform};
use lapnet_solver::{
    Error, NodalSystem, SOURCE_CURRENT, SampleGrid, SolveOptions, solve_circuit,
};
use lapnet_symbolic::{RationalAlgebra, Symbol};

fn solve(circuit: &CircuitModel) -> lapnet_solver::Result<lapnet_solver::CircuitSolution> {
    solve_circuit(circuit, &RationalAlgebra::new(), &SolveOptions::default())
}

/// Solve on a worker thread, failing the test if it does not finish in time.
fn solve_within(
    circuit: &CircuitModel,
    limit: Duration,
) -> lapnet_solver::Result<lapnet_solver::CircuitSolution> {
    let circuit = circuit.clone();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(solve(&circuit));
    });
    rx.recv_timeout(limit)
        .unwrap_or_else(|_| panic!("solve did not finish within {:?}", limit))
}

fn samples(solution: &lapnet_solver::CircuitSolution, node: &str) -> Vec<(f64, f64)> {
    solution
        .node(&NodeId::from(node))
        .and_then(|r| r.samples.as_ref())
        .map(|s| s.points().collect())
        .unwrap_or_default()
}

#[test]
fn test_impedance_independent_of_nodes() {
    for kind in [
        ComponentKind::Resistor,
        ComponentKind::Capacitor,
        ComponentKind::Inductor,
    ] {
        for value in [1e-6, 0.5, 47.0, 1e3] {
            let a = Component::new(kind, value, "x", "y").impedance().unwrap();
            let b = Component::new(kind, value, "GND", "other").impedance().unwrap();
            let c = Component::new(kind, value, "x", "y").impedance().unwrap();
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }
}

#[test]
fn test_single_resistor_dc() {
    for (resistance, amplitude) in [(1.0, 5.0), (220.0, 1.5), (1e4, -3.0)] {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Resistor, resistance, "src", "GND");
        circuit.add_source(amplitude, 0.0, Waveform::Dc, "src");

        let solution = solve(&circuit).unwrap();
        let points = samples(&solution, "src");
        assert_eq!(points.len(), 1000);
        for (t, v) in points {
            assert!(
                (v - amplitude).abs() < 1e-9,
                "R={}: V(src) at t={} = {}, expected {}",
                resistance,
                t,
                v,
                amplitude
            );
        }
    }
}

#[test]
fn test_rc_step_response() {
    let (r, c, v) = (1.0, 0.5, 2.0);
    let tau = r * c;

    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, r, "A", "B");
    circuit.add_component(ComponentKind::Capacitor, c, "B", "GND");
    circuit.add_source(v, 0.0, Waveform::Dc, "A");

    let solution = solve(&circuit).unwrap();
    let points = samples(&solution, "B");
    assert_eq!(points.len(), 1000);

    let (t0, v0) = points[0];
    assert_eq!(t0, 0.0);
    assert!(v0.abs() < 1e-9, "V(B) at t=0 = {}", v0);

    for window in points.windows(2) {
        assert!(
            window[1].1 >= window[0].1 - 1e-12,
            "not monotonic at t={}",
            window[1].0
        );
    }

    for &(t, value) in &points {
        let expected = v * (1.0 - (-t / tau).exp());
        assert!(
            (value - expected).abs() < 1e-9,
            "V(B) at t={} = {}, expected {}",
            t,
            value,
            expected
        );
    }

    let (_, last) = points[points.len() - 1];
    assert!((last - v).abs() < 1e-6, "V(B) at t=10 = {}", last);
}

#[test]
fn test_rl_decay() {
    // Series R-L from a DC source: the inductor voltage decays as V·e^{-tR/L}
    let (r, l, v) = (4.0, 2.0, 3.0);

    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, r, "in", "out");
    circuit.add_component(ComponentKind::Inductor, l, "out", "GND");
    circuit.add_source(v, 0.0, Waveform::Dc, "in");

    let solution = solve(&circuit).unwrap();
    for (t, value) in samples(&solution, "out") {
        let expected = v * (-t * r / l).exp();
        assert!(
            (value - expected).abs() < 1e-9,
            "V(out) at t={} = {}, expected {}",
            t,
            value,
            expected
        );
    }
}

#[test]
fn test_lc_tank_driven_at_resonance() {
    // 1 H in series with 1 F, driven by sin(t): V(m) = 1/(s^2+1)^2, a
    // repeated pole pair, whose inverse grows as (sin t - t cos t)/2.
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Inductor, 1.0, "in", "m");
    circuit.add_component(ComponentKind::Capacitor, 1.0, "m", "GND");
    circuit.add_source(1.0, 1.0 / (2.0 * PI), Waveform::Sine, "in");

    let solution = solve_within(&circuit, Duration::from_secs(10)).unwrap();

    for (t, v) in samples(&solution, "in") {
        assert!((v - t.sin()).abs() < 1e-6, "V(in) at t={} = {}", t, v);
    }

    let points = samples(&solution, "m");
    assert_eq!(points.len(), 1000);
    for (t, v) in points {
        let expected = 0.5 * (t.sin() - t * t.cos());
        assert!(
            (v - expected).abs() < 1e-6,
            "V(m) at t={} = {}, expected {}",
            t,
            v,
            expected
        );
    }
}

#[test]
fn test_parallel_components_kept() {
    // 2Ω over two parallel 2Ω to ground: V(out) = V/3
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 2.0, "in", "out");
    circuit.add_component(ComponentKind::Resistor, 2.0, "out", "GND");
    circuit.add_component(ComponentKind::Resistor, 2.0, "out", "GND");
    circuit.add_source(9.0, 0.0, Waveform::Dc, "in");

    let solution = solve(&circuit).unwrap();
    let v = solution.voltage_at(&NodeId::from("out"), 4.0).unwrap();
    assert!((v - 3.0).abs() < 1e-9, "V(out) = {}", v);
}

#[test]
fn test_sine_source_across_resistor() {
    let (amplitude, frequency) = (3.0, 0.5);

    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 10.0, "GND", "n1");
    circuit.add_source(amplitude, frequency, Waveform::Sine, "n1");

    let solution = solve(&circuit).unwrap();
    let points = samples(&solution, "n1");
    assert!(!points.is_empty());
    for (t, v) in points {
        let expected = amplitude * (2.0 * PI * frequency * t).sin();
        assert!(
            (v - expected).abs() < 1e-9,
            "V(n1) at t={} = {}, expected {}",
            t,
            v,
            expected
        );
    }
}

#[test]
fn test_cosine_source_across_resistor() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "n1", "GND");
    circuit.add_source(2.0, 0.25, Waveform::Cosine, "n1");

    let options = SolveOptions::new().with_grid(SampleGrid::new(0.0, 4.0, 9));
    let solution = solve_circuit(&circuit, &RationalAlgebra::new(), &options).unwrap();
    for (t, v) in samples(&solution, "n1") {
        let expected = 2.0 * (0.5 * PI * t).cos();
        assert!((v - expected).abs() < 1e-9, "V(n1) at t={} = {}", t, v);
    }
}

#[test]
fn test_solve_is_deterministic() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "a", "b");
    circuit.add_component(ComponentKind::Inductor, 0.5, "b", "c");
    circuit.add_component(ComponentKind::Capacitor, 0.2, "c", "GND");
    circuit.add_component(ComponentKind::Resistor, 3.0, "b", "GND");
    circuit.add_source(1.0, 0.3, Waveform::Cosine, "a");

    assert_eq!(
        NodalSystem::build(&circuit).unwrap(),
        NodalSystem::build(&circuit).unwrap()
    );

    let first = solve(&circuit).unwrap();
    let second = solve(&circuit).unwrap();
    assert_eq!(first, second);
    for (x, y) in samples(&first, "c").iter().zip(samples(&second, "c")) {
        assert_eq!(x.1.to_bits(), y.1.to_bits());
    }
}

#[test]
fn test_untouched_node_has_no_unique_solution() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
    circuit.add_source(1.0, 1.0, Waveform::Dc, "lonely");

    assert!(matches!(
        solve(&circuit),
        Err(Error::NoUniqueSolution { .. })
    ));
}

#[test]
fn test_floating_island_has_no_unique_solution() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
    circuit.add_component(ComponentKind::Resistor, 1.0, "x", "y");
    circuit.add_source(1.0, 0.0, Waveform::Dc, "a");

    assert!(matches!(
        solve(&circuit),
        Err(Error::NoUniqueSolution { .. })
    ));
}

#[test]
fn test_zero_capacitor_faults() {
    let cap = Component::new(ComponentKind::Capacitor, 0.0, "a", "GND");
    assert!(matches!(
        cap.impedance(),
        Err(lapnet_core::Error::ZeroImpedanceFault { .. })
    ));

    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "a", "b");
    circuit.add_component(ComponentKind::Capacitor, 0.0, "b", "GND");
    circuit.add_source(1.0, 0.0, Waveform::Dc, "a");
    assert!(matches!(
        solve(&circuit),
        Err(Error::Circuit(lapnet_core::Error::ZeroImpedanceFault { .. }))
    ));
}

#[test]
fn test_no_source_defined() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
    assert_eq!(solve(&circuit), Err(Error::NoSourceDefined));
}

// Exactly one solver entry is never reported. Which one depends on solver
// order; here it is the trailing source-current entry.
#[test]
fn test_one_solver_entry_dropped() {
    let mut circuit = CircuitModel::new();
    circuit.add_component(ComponentKind::Resistor, 1.0, "A", "B");
    circuit.add_component(ComponentKind::Capacitor, 1.0, "B", "GND");
    circuit.add_source(1.0, 0.0, Waveform::Dc, "A");

    let solution = solve(&circuit).unwrap();
    assert_eq!(solution.solved().len(), solution.len() + 1);

    let (dropped, _) = solution.dropped().unwrap();
    assert_eq!(dropped, &Symbol::new(SOURCE_CURRENT));
    assert!(solution.node(&NodeId::from("A")).is_some());
    assert!(solution.node(&NodeId::from("B")).is_some());

    let reported: Vec<&NodeId> = solution.nodes().map(|r| &r.node).collect();
    assert_eq!(reported, vec![&NodeId::from("A"), &NodeId::from("B")]);
}
