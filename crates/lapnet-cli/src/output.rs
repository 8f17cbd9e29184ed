//! Solution, equation and diagram output.

use lapnet_core::Edge;
use lapnet_solver::{CircuitSolution, NodalSystem};
use serde::Serialize;

/// JSON form of a solution: reported node voltages only.
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    pub nodes: Vec<NodeReport>,
}

#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub node: String,
    pub transform: String,
    pub time_domain: Option<String>,
    /// `[time, voltage]` pairs.
    pub samples: Option<Vec<[f64; 2]>>,
}

impl SolutionReport {
    /// Build a report keeping every `every`-th sample (the last one always
    /// kept).
    pub fn new(solution: &CircuitSolution, every: usize) -> Self {
        let nodes = solution
            .nodes()
            .map(|r| NodeReport {
                node: r.node.to_string(),
                transform: r.transform.to_string(),
                time_domain: r.time_domain.as_ref().map(|t| t.to_string()),
                samples: r.samples.as_ref().map(|s| {
                    decimate(s.len(), every)
                        .map(|i| [s.times()[i], s.values()[i]])
                        .collect()
                }),
            })
            .collect();

        Self { nodes }
    }
}

/// Indices `0, every, 2·every, ...` plus the last index.
fn decimate(len: usize, every: usize) -> impl Iterator<Item = usize> {
    let every = every.max(1);
    (0..len).filter(move |&i| i % every == 0 || i + 1 == len)
}

/// Print each node's transform-domain and time-domain voltage.
pub fn print_expressions(solution: &CircuitSolution) {
    println!("Node Voltages:");
    for result in solution.nodes() {
        println!("  V({})(s) = {}", result.node, result.transform);
        match &result.time_domain {
            Some(time) => println!("  v({})(t) = {}", result.node, time),
            None => println!("  v({})(t) = 0", result.node),
        }
    }
    println!();
}

/// Print sampled voltages as a table, one column per non-zero node.
pub fn print_sample_table(solution: &CircuitSolution, every: usize) {
    let series = solution.series();
    if series.is_empty() {
        println!("All node voltages are zero.");
        println!();
        return;
    }

    print!("{:>14}", "Time");
    for (node, _) in &series {
        print!("{:>14}", format!("V({})", node));
    }
    println!();

    let width = 14 * (1 + series.len());
    println!("{}", "-".repeat(width));

    let times = solution.times();
    for i in decimate(times.len(), every) {
        print!("{:>14.6e}", times[i]);
        for (_, samples) in &series {
            let v = samples.values().get(i).copied().unwrap_or(0.0);
            print!("{:>14.6}", v);
        }
        println!();
    }

    println!();
    println!("Sampled {} points.", times.len());
    println!();
}

/// Print the assembled nodal equations.
pub fn print_equations(system: &NodalSystem) {
    println!("Unknowns:");
    for symbol in system.solver_unknowns() {
        println!("  {}", symbol);
    }
    println!();

    println!("Node Voltages:");
    for (node, voltage) in system.voltages() {
        println!("  V({}) = {}", node, voltage);
    }
    println!();

    println!("Equations:");
    for (node, equation) in system.equations() {
        println!("  KCL({}): {}", node, equation);
    }
    println!("  source({}): {}", system.source_node(), system.constraint());
    println!();
}

/// Print the labelled edge list for drawing the circuit.
pub fn print_edges(edges: &[Edge]) {
    println!("{:>10} {:>10}  Label", "From", "To");
    println!("{}", "-".repeat(34));
    for edge in edges {
        println!("{:>10} {:>10}  {}", edge.start, edge.end, edge.label);
    }
    println!();
}
