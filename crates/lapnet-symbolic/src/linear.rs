//! Linear systems whose coefficients are rational functions of `s`.
//!
//! Each equation is cleared of denominators to give a polynomial matrix
//! system `A(s)·x = b(s)`, which is then solved by Cramer's rule with
//! fraction-free (Bareiss) determinants.

use indexmap::IndexMap;

use crate::algebra::Tolerances;
use crate::error::{Error, Result};
use crate::expr::{Equation, Symbol};
use crate::polynomial::{CANCELLATION_EPS, Polynomial};
use crate::rational::Rational;

/// Solve `equations` for `unknowns`.
///
/// The returned map holds one reduced expression per unknown, in the order
/// the unknowns were given.
pub fn solve_linear_system(
    equations: &[Equation],
    unknowns: &[Symbol],
    tol: &Tolerances,
) -> Result<IndexMap<Symbol, Rational>> {
    if equations.len() != unknowns.len() {
        return Err(Error::DimensionMismatch {
            expected: unknowns.len(),
            actual: equations.len(),
        });
    }

    let mut matrix = Vec::with_capacity(equations.len());
    let mut rhs = Vec::with_capacity(equations.len());
    for equation in equations {
        let (row, b) = clear_denominators(equation, unknowns)?;
        matrix.push(row);
        rhs.push(b);
    }

    let det = determinant(&matrix)?;
    if det.is_zero() {
        return Err(Error::Singular);
    }

    let mut solution = IndexMap::with_capacity(unknowns.len());
    for (j, unknown) in unknowns.iter().enumerate() {
        let mut replaced = matrix.clone();
        for (row, b) in replaced.iter_mut().zip(&rhs) {
            row[j] = b.clone();
        }
        let value = Rational::new(determinant(&replaced)?, det.clone())?.reduce(tol);
        solution.insert(unknown.clone(), value);
    }

    Ok(solution)
}

/// Determinant of a square polynomial matrix (fraction-free Bareiss
/// elimination with row pivoting).
pub fn determinant(matrix: &[Vec<Polynomial>]) -> Result<Polynomial> {
    let n = matrix.len();
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: row.len(),
        });
    }
    if n == 0 {
        return Ok(Polynomial::one());
    }

    let mut m = matrix.to_vec();
    let mut negate = false;
    let mut prev = Polynomial::one();

    for k in 0..n {
        // Lowest-degree non-zero pivot keeps the exact divisions small.
        let Some(pivot) = (k..n)
            .filter(|&r| !m[r][k].is_zero())
            .min_by_key(|&r| m[r][k].degree())
        else {
            return Ok(Polynomial::zero());
        };
        if pivot != k {
            m.swap(pivot, k);
            negate = !negate;
        }

        for i in k + 1..n {
            for j in k + 1..n {
                let cross = &(&m[k][k] * &m[i][j]) - &(&m[i][k] * &m[k][j]);
                m[i][j] = cross.div_exact(&prev)?;
            }
            m[i][k] = Polynomial::zero();
        }
        prev = m[k][k].clone();
    }

    Ok(if negate { -&prev } else { prev })
}

/// Multiply an equation through by the product of its distinct
/// denominators, returning the polynomial row and right-hand side.
fn clear_denominators(
    equation: &Equation,
    unknowns: &[Symbol],
) -> Result<(Vec<Polynomial>, Polynomial)> {
    let lhs = equation.lhs();

    let mut denominators: Vec<&Polynomial> = Vec::new();
    let coefficients = lhs.terms().map(|(_, c)| c);
    for coeff in coefficients.chain(std::iter::once(lhs.constant_term())) {
        let den = coeff.denominator();
        if !denominators.iter().any(|seen| same_polynomial(seen, den)) {
            denominators.push(den);
        }
    }

    let multiplier = |den: &Polynomial| {
        denominators
            .iter()
            .filter(|other| !same_polynomial(other, den))
            .fold(Polynomial::one(), |acc, other| &acc * *other)
    };

    let mut row = vec![Polynomial::zero(); unknowns.len()];
    for (symbol, coeff) in lhs.terms() {
        let j = unknowns
            .iter()
            .position(|u| u == symbol)
            .ok_or_else(|| Error::UnknownSymbol(symbol.clone()))?;
        row[j] = coeff.numerator() * &multiplier(coeff.denominator());
    }

    let constant = lhs.constant_term();
    let b = -&(constant.numerator() * &multiplier(constant.denominator()));

    Ok((row, b))
}

fn same_polynomial(a: &Polynomial, b: &Polynomial) -> bool {
    a.coeffs().len() == b.coeffs().len()
        && a.coeffs()
            .iter()
            .zip(b.coeffs())
            .all(|(x, y)| (x - y).abs() <= CANCELLATION_EPS * x.abs().max(y.abs()))
}
