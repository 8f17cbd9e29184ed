//! Nodal (KCL) equation assembly.
//!
//! Every non-ground node gets a voltage symbol `V_<node>`. The source node's
//! voltage is then replaced by the source expression, and one current
//! balance equation is written per non-ground node, the source node
//! included. That node is balanced by the source branch current `I_src`,
//! and a constraint row ties its symbol to the source expression, so the
//! system stays square:
//!
//! ```text
//! unknowns:  V_n1 .. V_nk, I_src
//! rows:      KCL(n1) .. KCL(nk), V_src - E(s) = 0
//! ```

use indexmap::IndexMap;
use lapnet_core::{CircuitModel, NodeId};
use lapnet_symbolic::{Equation, LinearExpr, Symbol};

use crate::error::{Error, Result};

/// Name of the source branch current unknown.
pub const SOURCE_CURRENT: &str = "I_src";

/// The voltage symbol for a node.
pub fn node_symbol(node: &NodeId) -> Symbol {
    Symbol::new(format!("V_{}", node))
}

/// Assembled nodal equations for one circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct NodalSystem {
    /// Free voltage symbol per non-ground node, before substitution.
    symbols: IndexMap<NodeId, Symbol>,
    /// Voltage per non-ground node after source substitution.
    voltages: IndexMap<NodeId, LinearExpr>,
    /// Current balance per non-ground node.
    equations: IndexMap<NodeId, Equation>,
    source_node: NodeId,
    constraint: Equation,
}

impl NodalSystem {
    /// Build the nodal system for `circuit`.
    ///
    /// Fails with [`Error::NoSourceDefined`] without a source, with
    /// [`Error::NoUniqueSolution`] when a node has no incident component or
    /// the source is placed on ground, and with a circuit error when a
    /// component's impedance is degenerate.
    pub fn build(circuit: &CircuitModel) -> Result<Self> {
        let source = circuit.source().ok_or(Error::NoSourceDefined)?;
        if source.start.is_ground() {
            return Err(Error::no_unique("voltage source has both terminals on ground"));
        }

        let mut symbols: IndexMap<NodeId, Symbol> = IndexMap::new();
        for component in circuit.components() {
            for node in [&component.start, &component.end] {
                if !node.is_ground() && !symbols.contains_key(node) {
                    symbols.insert(node.clone(), node_symbol(node));
                }
            }
        }
        let source_symbol = symbols
            .entry(source.start.clone())
            .or_insert_with(|| node_symbol(&source.start))
            .clone();

        let mut voltages: IndexMap<NodeId, LinearExpr> = symbols
            .iter()
            .map(|(node, symbol)| (node.clone(), LinearExpr::symbol(symbol.clone())))
            .collect();

        // The source node is pinned to E(s) + V(end), and end is ground
        let source_voltage =
            LinearExpr::constant(source.expression()?).add(&voltage_of(&voltages, &source.end));
        voltages.insert(source.start.clone(), source_voltage.clone());

        let mut equations = IndexMap::new();
        for node in symbols.keys() {
            let incident = circuit.incident(node);
            if incident.is_empty() {
                return Err(Error::no_unique(format!(
                    "node {} has no incident components",
                    node
                )));
            }

            let here = voltage_of(&voltages, node);
            let mut leaving = LinearExpr::zero();
            for &index in incident {
                let component = &circuit.components()[index];
                let admittance = component.admittance()?;
                if component.is_self_loop() {
                    continue;
                }
                let other = if &component.start == node {
                    &component.end
                } else {
                    &component.start
                };
                let drop = here.sub(&voltage_of(&voltages, other));
                leaving = leaving.add(&drop.scale(&admittance));
            }

            if node == &source.start {
                leaving = leaving.sub(&LinearExpr::symbol(Symbol::new(SOURCE_CURRENT)));
            }
            equations.insert(node.clone(), Equation::new(leaving));
        }

        let constraint =
            Equation::between(&LinearExpr::symbol(source_symbol), &source_voltage);

        log::debug!(
            "nodal system: {} nodes, {} equations, source at {}",
            symbols.len(),
            equations.len() + 1,
            source.start
        );

        Ok(Self {
            symbols,
            voltages,
            equations,
            source_node: source.start.clone(),
            constraint,
        })
    }

    /// Node whose voltage is fixed by the source.
    pub fn source_node(&self) -> &NodeId {
        &self.source_node
    }

    /// Node voltage symbols, in node order.
    pub fn symbols(&self) -> &IndexMap<NodeId, Symbol> {
        &self.symbols
    }

    /// Node voltages after source substitution.
    pub fn voltages(&self) -> &IndexMap<NodeId, LinearExpr> {
        &self.voltages
    }

    /// One current balance equation per non-ground node.
    pub fn equations(&self) -> &IndexMap<NodeId, Equation> {
        &self.equations
    }

    /// `V_source - E(s) = 0`.
    pub fn constraint(&self) -> &Equation {
        &self.constraint
    }

    /// The free node symbols as created before substitution.
    pub fn unknowns(&self) -> Vec<Symbol> {
        self.symbols.values().cloned().collect()
    }

    /// Rows handed to the solver: every KCL equation, then the constraint.
    pub fn solver_equations(&self) -> Vec<Equation> {
        self.equations
            .values()
            .cloned()
            .chain(std::iter::once(self.constraint.clone()))
            .collect()
    }

    /// Unknowns handed to the solver: node symbols, then `I_src`.
    pub fn solver_unknowns(&self) -> Vec<Symbol> {
        let mut unknowns = self.unknowns();
        unknowns.push(Symbol::new(SOURCE_CURRENT));
        unknowns
    }

    /// The node a voltage symbol belongs to.
    pub fn node_of(&self, symbol: &Symbol) -> Option<&NodeId> {
        self.symbols
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(node, _)| node)
    }
}

fn voltage_of(voltages: &IndexMap<NodeId, LinearExpr>, node: &NodeId) -> LinearExpr {
    if node.is_ground() {
        LinearExpr::zero()
    } else {
        voltages.get(node).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapnet_core::{ComponentKind, Waveform};

    fn rc_circuit() -> CircuitModel {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Resistor, 1.0, "a", "b");
        circuit.add_component(ComponentKind::Capacitor, 1.0, "b", "GND");
        circuit.add_source(1.0, 0.0, Waveform::Dc, "a");
        circuit
    }

    #[test]
    fn test_rc_system_shape() {
        let system = NodalSystem::build(&rc_circuit()).unwrap();

        assert_eq!(system.source_node(), &NodeId::from("a"));
        assert_eq!(
            system.unknowns(),
            vec![Symbol::new("V_a"), Symbol::new("V_b")]
        );
        assert_eq!(system.solver_unknowns().len(), 3);
        assert_eq!(system.solver_equations().len(), 3);

        // The source node's voltage is a constant after substitution
        assert!(system.voltages()[&NodeId::from("a")].is_constant());
        assert!(!system.voltages()[&NodeId::from("b")].is_constant());

        // Source current only appears at the source node
        let i_src = Symbol::new(SOURCE_CURRENT);
        assert!(system.equations()[&NodeId::from("a")].lhs().coefficient(&i_src).is_some());
        assert!(system.equations()[&NodeId::from("b")].lhs().coefficient(&i_src).is_none());
    }

    #[test]
    fn test_substituted_symbol_not_in_kcl() {
        let system = NodalSystem::build(&rc_circuit()).unwrap();
        let v_a = Symbol::new("V_a");
        for equation in system.equations().values() {
            assert!(equation.lhs().coefficient(&v_a).is_none());
        }
        assert!(system.constraint().lhs().coefficient(&v_a).is_some());
    }

    #[test]
    fn test_node_of() {
        let system = NodalSystem::build(&rc_circuit()).unwrap();
        assert_eq!(system.node_of(&Symbol::new("V_b")), Some(&NodeId::from("b")));
        assert_eq!(system.node_of(&Symbol::new(SOURCE_CURRENT)), None);
    }

    #[test]
    fn test_self_loop_contributes_nothing() {
        let mut circuit = rc_circuit();
        circuit.add_component(ComponentKind::Inductor, 3.0, "b", "b");
        let with_loop = NodalSystem::build(&circuit).unwrap();
        let without = NodalSystem::build(&rc_circuit()).unwrap();
        assert_eq!(with_loop.equations(), without.equations());
    }

    #[test]
    fn test_deterministic() {
        let circuit = rc_circuit();
        assert_eq!(
            NodalSystem::build(&circuit).unwrap(),
            NodalSystem::build(&circuit).unwrap()
        );
    }

    #[test]
    fn test_missing_source() {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
        assert_eq!(NodalSystem::build(&circuit), Err(Error::NoSourceDefined));
    }

    #[test]
    fn test_untouched_source_node() {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
        circuit.add_source(1.0, 1.0, Waveform::Dc, "floating");
        assert!(matches!(
            NodalSystem::build(&circuit),
            Err(Error::NoUniqueSolution { .. })
        ));
    }

    #[test]
    fn test_source_on_ground() {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Resistor, 1.0, "a", "GND");
        circuit.add_source(1.0, 1.0, Waveform::Dc, "GND");
        assert!(matches!(
            NodalSystem::build(&circuit),
            Err(Error::NoUniqueSolution { .. })
        ));
    }

    #[test]
    fn test_zero_capacitor() {
        let mut circuit = CircuitModel::new();
        circuit.add_component(ComponentKind::Capacitor, 0.0, "a", "GND");
        circuit.add_source(1.0, 1.0, Waveform::Dc, "a");
        assert!(matches!(
            NodalSystem::build(&circuit),
            Err(Error::Circuit(lapnet_core::Error::ZeroImpedanceFault {
                kind: ComponentKind::Capacitor,
                ..
            }))
        ));
    }
}
