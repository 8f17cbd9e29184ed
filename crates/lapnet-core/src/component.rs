//! Passive two-terminal components and their Laplace-domain impedances.

use std::fmt;
use std::str::FromStr;

use lapnet_symbolic::{Polynomial, Rational};

use crate::error::{Error, Result};
use crate::node::NodeId;

/// Kind of passive component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
}

impl ComponentKind {
    /// Unit symbol shown in labels.
    pub fn unit(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "Ω",
            ComponentKind::Capacitor => "F",
            ComponentKind::Inductor => "H",
        }
    }

    /// Single-letter designator (R, C or L).
    pub fn designator(&self) -> char {
        match self {
            ComponentKind::Resistor => 'R',
            ComponentKind::Capacitor => 'C',
            ComponentKind::Inductor => 'L',
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Inductor => "inductor",
        };
        f.write_str(name)
    }
}

impl FromStr for ComponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resistor" | "r" => Ok(ComponentKind::Resistor),
            "capacitor" | "c" => Ok(ComponentKind::Capacitor),
            "inductor" | "l" => Ok(ComponentKind::Inductor),
            _ => Err(Error::UnknownComponentKind(s.to_string())),
        }
    }
}

/// A resistor, capacitor or inductor between two nodes.
///
/// The value is in ohms, farads or henries. Current is taken as flowing
/// from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub value: f64,
    pub start: NodeId,
    pub end: NodeId,
}

impl Component {
    pub fn new(
        kind: ComponentKind,
        value: f64,
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
    ) -> Self {
        Self {
            kind,
            value,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Laplace-domain impedance.
    ///
    /// - Resistor: `R`
    /// - Capacitor: `1/(s·C)`
    /// - Inductor: `s·L`
    ///
    /// Only the kind and value matter; the nodes do not.
    pub fn impedance(&self) -> Result<Rational> {
        if self.value == 0.0 || !self.value.is_finite() {
            return Err(self.degenerate());
        }

        let z = match self.kind {
            ComponentKind::Resistor => Rational::constant(self.value),
            ComponentKind::Capacitor => {
                Rational::new(Polynomial::one(), Polynomial::monomial(self.value, 1))?
            }
            ComponentKind::Inductor => Rational::from_polynomial(Polynomial::monomial(self.value, 1)),
        };
        Ok(z)
    }

    /// Laplace-domain admittance, the reciprocal of [`impedance`](Self::impedance).
    pub fn admittance(&self) -> Result<Rational> {
        self.impedance()?.recip().map_err(|_| self.degenerate())
    }

    /// Diagram label such as `R=100Ω` or `C=0.001F`.
    pub fn label(&self) -> String {
        format!("{}={}{}", self.kind.designator(), self.value, self.kind.unit())
    }

    /// True when both terminals are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }

    fn degenerate(&self) -> Error {
        Error::ZeroImpedanceFault {
            kind: self.kind,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn eval(z: &Rational, s: f64) -> f64 {
        z.eval_complex(Complex64::new(s, 0.0)).re
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("resistor".parse::<ComponentKind>().unwrap(), ComponentKind::Resistor);
        assert_eq!("Capacitor".parse::<ComponentKind>().unwrap(), ComponentKind::Capacitor);
        assert_eq!("L".parse::<ComponentKind>().unwrap(), ComponentKind::Inductor);
        assert!(matches!(
            "diode".parse::<ComponentKind>(),
            Err(Error::UnknownComponentKind(tag)) if tag == "diode"
        ));
    }

    #[test]
    fn test_impedances() {
        let r = Component::new(ComponentKind::Resistor, 100.0, "a", "b");
        let c = Component::new(ComponentKind::Capacitor, 1e-3, "a", "b");
        let l = Component::new(ComponentKind::Inductor, 0.5, "a", "b");

        assert!((eval(&r.impedance().unwrap(), 2.0) - 100.0).abs() < 1e-12);
        // 1/(2 · 1e-3) = 500
        assert!((eval(&c.impedance().unwrap(), 2.0) - 500.0).abs() < 1e-9);
        assert!((eval(&l.impedance().unwrap(), 2.0) - 1.0).abs() < 1e-12);
        // Admittance of the capacitor is s·C
        assert!((eval(&c.admittance().unwrap(), 2.0) - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn test_impedance_ignores_nodes() {
        let a = Component::new(ComponentKind::Inductor, 2.0, "x", "y");
        let b = Component::new(ComponentKind::Inductor, 2.0, "GND", "z");
        assert_eq!(a.impedance().unwrap(), b.impedance().unwrap());
    }

    #[test]
    fn test_zero_value_fault() {
        for kind in [
            ComponentKind::Resistor,
            ComponentKind::Capacitor,
            ComponentKind::Inductor,
        ] {
            let comp = Component::new(kind, 0.0, "a", "GND");
            assert!(matches!(
                comp.impedance(),
                Err(Error::ZeroImpedanceFault { value, .. }) if value == 0.0
            ));
        }

        let nan = Component::new(ComponentKind::Resistor, f64::NAN, "a", "GND");
        assert!(nan.impedance().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Component::new(ComponentKind::Resistor, 100.0, "a", "b").label(), "R=100Ω");
        assert_eq!(Component::new(ComponentKind::Capacitor, 0.001, "a", "b").label(), "C=0.001F");
        assert_eq!(Component::new(ComponentKind::Inductor, 2.5, "a", "b").label(), "L=2.5H");
    }
}
