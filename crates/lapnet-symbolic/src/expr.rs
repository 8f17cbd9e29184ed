//! Symbols, affine expressions and equations over rational coefficients.

use std::fmt;

use indexmap::IndexMap;

use crate::error::Result;
use crate::rational::Rational;

/// A named unknown, e.g. `V_out`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `Σ cᵢ·xᵢ + k`, with rational-function coefficients `cᵢ` and constant `k`.
///
/// Terms keep their insertion order. A term whose coefficient cancels to
/// zero is removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearExpr {
    terms: IndexMap<Symbol, Rational>,
    constant: Rational,
}

impl LinearExpr {
    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A lone symbol with coefficient 1.
    pub fn symbol(symbol: Symbol) -> Self {
        let mut terms = IndexMap::new();
        terms.insert(symbol, Rational::one());
        Self {
            terms,
            constant: Rational::zero(),
        }
    }

    /// A constant with no symbolic terms.
    pub fn constant(value: Rational) -> Self {
        Self {
            terms: IndexMap::new(),
            constant: value,
        }
    }

    /// Coefficient of `symbol`, if present.
    pub fn coefficient(&self, symbol: &Symbol) -> Option<&Rational> {
        self.terms.get(symbol)
    }

    /// The constant term.
    pub fn constant_term(&self) -> &Rational {
        &self.constant
    }

    /// Symbols with a non-zero coefficient, in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.terms.keys()
    }

    /// `(symbol, coefficient)` pairs in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = (&Symbol, &Rational)> {
        self.terms.iter()
    }

    /// Check whether the expression has no symbolic terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check whether the expression is identically zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty() && self.constant.is_zero()
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (symbol, coeff) in &other.terms {
            out.accumulate(symbol, coeff);
        }
        out.constant = &out.constant + &other.constant;
        out
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.scale(&Rational::constant(-1.0)))
    }

    /// Multiply every coefficient and the constant by `factor`.
    pub fn scale(&self, factor: &Rational) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(s, c)| (s.clone(), c * factor))
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Self {
            terms,
            constant: &self.constant * factor,
        }
    }

    /// Divide every coefficient and the constant by `divisor`.
    pub fn div(&self, divisor: &Rational) -> Result<Self> {
        Ok(self.scale(&divisor.recip()?))
    }

    fn accumulate(&mut self, symbol: &Symbol, coeff: &Rational) {
        let sum = match self.terms.get(symbol) {
            Some(existing) => existing + coeff,
            None => coeff.clone(),
        };
        if sum.is_zero() {
            self.terms.shift_remove(symbol);
        } else {
            self.terms.insert(symbol.clone(), sum);
        }
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .terms
            .iter()
            .map(|(symbol, coeff)| {
                if *coeff == Rational::one() {
                    symbol.to_string()
                } else {
                    format!("({coeff})*{symbol}")
                }
            })
            .collect();
        if !self.constant.is_zero() || parts.is_empty() {
            parts.push(format!("({})", self.constant));
        }
        write!(f, "{}", parts.join(" + "))
    }
}

/// An equation `lhs = 0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Equation {
    lhs: LinearExpr,
}

impl Equation {
    /// `lhs = 0`.
    pub fn new(lhs: LinearExpr) -> Self {
        Self { lhs }
    }

    /// `lhs = rhs`, stored as `lhs - rhs = 0`.
    pub fn between(lhs: &LinearExpr, rhs: &LinearExpr) -> Self {
        Self { lhs: lhs.sub(rhs) }
    }

    pub fn lhs(&self) -> &LinearExpr {
        &self.lhs
    }

    /// An equation with no symbolic terms is either trivially satisfied or
    /// contradictory.
    pub fn is_trivial(&self) -> bool {
        self.lhs.is_zero()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = 0", self.lhs)
    }
}
