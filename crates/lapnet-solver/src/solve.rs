//! The solve pipeline: build, solve, drop one entry, invert, sample.

use indexmap::IndexMap;
use lapnet_core::{CircuitModel, NodeId};
use lapnet_symbolic::SymbolicAlgebra;

use crate::error::{Error, Result};
use crate::nodal::NodalSystem;
use crate::options::SolveOptions;
use crate::result::{CircuitSolution, NodeResult, SampledWaveform};

/// Solve `circuit` and convert each reported node voltage to the time domain.
///
/// The nodal system is rebuilt from scratch on every call. The solver's last
/// entry is removed before reporting; see [`CircuitSolution::dropped`].
pub fn solve_circuit(
    circuit: &CircuitModel,
    algebra: &dyn SymbolicAlgebra,
    options: &SolveOptions,
) -> Result<CircuitSolution> {
    if circuit.source().is_none() {
        return Err(Error::NoSourceDefined);
    }

    let system = NodalSystem::build(circuit)?;
    for (node, equation) in system.equations() {
        log::debug!("KCL({}): {}", node, equation);
    }
    log::debug!("constraint: {}", system.constraint());

    let unknowns = system.solver_unknowns();
    let solved = algebra
        .solve_linear_system(&system.solver_equations(), &unknowns)
        .map_err(|e| Error::no_unique(e.to_string()))?;
    if solved.len() != unknowns.len() {
        return Err(Error::no_unique(format!(
            "solver returned {} of {} unknowns",
            solved.len(),
            unknowns.len()
        )));
    }

    let mut retained = solved.clone();
    let dropped = retained.pop();
    if let Some((symbol, expr)) = &dropped {
        log::debug!("dropping solver entry {} = {}", symbol, expr);
    }

    let times = options.grid.times();
    let mut nodes = IndexMap::with_capacity(retained.len());
    for (symbol, transform) in retained {
        let node = system
            .node_of(&symbol)
            .cloned()
            .unwrap_or_else(|| NodeId::new(symbol.name()));

        if transform.is_zero() {
            log::debug!("V({}) = 0, skipping inversion", node);
            nodes.insert(node.clone(), NodeResult::zero(node));
            continue;
        }

        let time_domain =
            algebra
                .invert_transform(&transform)
                .map_err(|e| Error::InversionFailure {
                    node: node.clone(),
                    reason: e.to_string(),
                })?;
        log::info!("V({})(s) = {}", node, transform);
        log::info!("v({})(t) = {}", node, time_domain);

        let values = algebra.evaluate_numeric(&time_domain, &times);
        nodes.insert(
            node.clone(),
            NodeResult {
                node,
                transform,
                time_domain: Some(time_domain),
                samples: Some(SampledWaveform::new(times.clone(), values)),
            },
        );
    }

    Ok(CircuitSolution {
        nodes,
        solved,
        dropped,
        times,
    })
}
