//! Inverse Laplace transform by partial fraction expansion.
//!
//! A strictly proper `N(s)/D(s)` is expanded around the roots of `D`.
//! For a pole `p` of multiplicity `m` the contribution is
//!
//! ```text
//! Σ_{j=0}^{m-1} c_{m-1-j} · t^j / j! · e^{p t}
//! ```
//!
//! where `c_k` are the Taylor coefficients of `(s - p)^m · N(s)/D(s)` at `p`.
//! Conjugate pole pairs are folded into real `cos`/`sin` terms.

use std::fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::algebra::Tolerances;
use crate::error::{Error, Result};
use crate::polynomial::{Polynomial, format_real};
use crate::rational::Rational;

/// One real term `t^power · e^{rate·t} · (cos·cos(ωt) + sin·sin(ωt))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTerm {
    /// Power of `t`.
    pub power: u32,
    /// Exponential rate σ (negative for decaying terms).
    pub rate: f64,
    /// Angular frequency ω (0 for real poles).
    pub omega: f64,
    /// Coefficient of `cos(ωt)`.
    pub cos: f64,
    /// Coefficient of `sin(ωt)`.
    pub sin: f64,
}

impl TimeTerm {
    /// Evaluate at time `t`.
    pub fn eval(&self, t: f64) -> f64 {
        let phase = self.omega * t;
        t.powi(self.power as i32)
            * (self.rate * t).exp()
            * (self.cos * phase.cos() + self.sin * phase.sin())
    }

    fn magnitude(&self) -> f64 {
        self.cos.abs().max(self.sin.abs())
    }

    /// Split into a sign and an unsigned body for display.
    fn signed_body(&self) -> (bool, String) {
        let (negative, scalar, trig) = if self.omega == 0.0 {
            (self.cos < 0.0, self.cos.abs(), None)
        } else if self.sin == 0.0 {
            let w = format_real(self.omega);
            (self.cos < 0.0, self.cos.abs(), Some(format!("cos({w}*t)")))
        } else if self.cos == 0.0 {
            let w = format_real(self.omega);
            (self.sin < 0.0, self.sin.abs(), Some(format!("sin({w}*t)")))
        } else {
            let w = format_real(self.omega);
            let sign = if self.sin < 0.0 { '-' } else { '+' };
            let mixed = format!(
                "({}*cos({w}*t) {sign} {}*sin({w}*t))",
                format_real(self.cos),
                format_real(self.sin.abs())
            );
            (false, 1.0, Some(mixed))
        };

        let mut factors = Vec::new();
        match self.power {
            0 => {}
            1 => factors.push("t".to_string()),
            p => factors.push(format!("t^{p}")),
        }
        if self.rate != 0.0 {
            factors.push(format!("exp({}*t)", format_real(self.rate)));
        }
        factors.extend(trig);

        let scalar = format_real(scalar);
        if factors.is_empty() {
            (negative, scalar)
        } else if scalar == "1" {
            (negative, factors.join("*"))
        } else {
            (negative, format!("{}*{}", scalar, factors.join("*")))
        }
    }
}

/// A closed-form, causal time-domain expression: a sum of [`TimeTerm`]s for
/// `t ≥ 0`, zero before.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeExpr {
    terms: Vec<TimeTerm>,
}

impl TimeExpr {
    /// The zero waveform.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: Vec<TimeTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[TimeTerm] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate at time `t`.
    pub fn eval(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        self.terms.iter().map(|term| term.eval(t)).sum()
    }

    /// Evaluate at each of `points`.
    pub fn sample(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|&t| self.eval(t)).collect()
    }
}

impl fmt::Display for TimeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            let (negative, body) = term.signed_body();
            match (i, negative) {
                (0, true) => write!(f, "-{body}")?,
                (0, false) => write!(f, "{body}")?,
                (_, true) => write!(f, " - {body}")?,
                (_, false) => write!(f, " + {body}")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Pole {
    center: Complex64,
    multiplicity: usize,
}

/// Invert a rational function of `s` into a time-domain expression.
pub fn inverse_laplace(expr: &Rational, tol: &Tolerances) -> Result<TimeExpr> {
    if expr.is_zero() {
        return Ok(TimeExpr::zero());
    }

    let expr = expr.reduce(tol);
    let numerator_degree = expr.numerator().degree().unwrap_or(0);
    let denominator_degree = expr.denominator().degree().unwrap_or(0);
    if numerator_degree >= denominator_degree {
        return Err(Error::ImproperExpression {
            numerator_degree,
            denominator_degree,
        });
    }

    let poles = cluster_poles(expr.denominator().roots()?, tol);
    let mut terms = Vec::new();

    for (idx, pole) in poles.iter().enumerate() {
        // Lower half-plane poles are covered by their conjugates.
        if pole.center.im < 0.0 {
            continue;
        }

        let m = pole.multiplicity;
        let numerator = taylor_coefficients(expr.numerator(), pole.center, m);

        // Taylor series of D(s) / (s - p)^m around p; D is monic.
        let mut remainder = vec![Complex64::zero(); m];
        remainder[0] = Complex64::one();
        for (other_idx, other) in poles.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            for _ in 0..other.multiplicity {
                remainder = mul_linear_series(&remainder, pole.center - other.center);
            }
        }
        if remainder[0].norm() == 0.0 {
            return Err(Error::NoClosedForm(format!(
                "coincident poles near {}",
                pole.center
            )));
        }

        let series = divide_series(&numerator, &remainder);
        let mut factorial = 1.0;
        for power in 0..m {
            if power > 0 {
                factorial *= power as f64;
            }
            let coeff = series[m - 1 - power] / factorial;
            if !coeff.re.is_finite() || !coeff.im.is_finite() {
                return Err(Error::NoClosedForm(format!(
                    "non-finite residue at pole {}",
                    pole.center
                )));
            }

            let term = if pole.center.im == 0.0 {
                TimeTerm {
                    power: power as u32,
                    rate: pole.center.re,
                    omega: 0.0,
                    cos: coeff.re,
                    sin: 0.0,
                }
            } else {
                TimeTerm {
                    power: power as u32,
                    rate: pole.center.re,
                    omega: pole.center.im,
                    cos: 2.0 * coeff.re,
                    sin: -2.0 * coeff.im,
                }
            };
            terms.push(term);
        }
    }

    let largest = terms.iter().fold(0.0, |acc: f64, t| acc.max(t.magnitude()));
    terms.retain(|t| t.magnitude() > tol.negligible * largest);
    terms.sort_by(|a, b| {
        a.omega
            .total_cmp(&b.omega)
            .then(b.rate.total_cmp(&a.rate))
            .then(a.power.cmp(&b.power))
    });

    Ok(TimeExpr { terms })
}

/// Group roots that coincide within `tol.pole_cluster` into repeated poles.
fn cluster_poles(roots: Vec<Complex64>, tol: &Tolerances) -> Vec<Pole> {
    let mut clusters: Vec<(Complex64, usize)> = Vec::new();
    for root in roots {
        let existing = clusters.iter_mut().find(|(sum, count)| {
            let center = *sum / *count as f64;
            (root - center).norm() <= tol.pole_cluster * center.norm().max(1.0)
        });
        match existing {
            Some((sum, count)) => {
                *sum += root;
                *count += 1;
            }
            None => clusters.push((root, 1)),
        }
    }

    clusters
        .into_iter()
        .map(|(sum, count)| {
            let mut center = sum / count as f64;
            if center.im.abs() <= tol.imaginary * center.norm().max(1.0) {
                center.im = 0.0;
            }
            Pole {
                center,
                multiplicity: count,
            }
        })
        .collect()
}

/// First `count` Taylor coefficients of `poly` around `at`, by repeated
/// synthetic division by `(s - at)`.
fn taylor_coefficients(poly: &Polynomial, at: Complex64, count: usize) -> Vec<Complex64> {
    let zero = Complex64::zero();
    let mut current: Vec<Complex64> = poly
        .coeffs()
        .iter()
        .map(|&c| Complex64::new(c, 0.0))
        .collect();
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        let Some((&top, rest)) = current.split_last() else {
            out.push(zero);
            continue;
        };
        let mut quotient = vec![zero; rest.len()];
        let mut acc = top;
        for i in (0..rest.len()).rev() {
            quotient[i] = acc;
            acc = acc * at + rest[i];
        }
        out.push(acc);
        current = quotient;
    }

    out
}

/// Multiply a truncated series in `x = s - p` by `(a + x)`.
fn mul_linear_series(series: &[Complex64], a: Complex64) -> Vec<Complex64> {
    (0..series.len())
        .map(|k| {
            let shifted = if k > 0 { series[k - 1] } else { Complex64::zero() };
            a * series[k] + shifted
        })
        .collect()
}

/// Truncated series quotient `num / den`, with `den[0] != 0`.
fn divide_series(num: &[Complex64], den: &[Complex64]) -> Vec<Complex64> {
    let mut out: Vec<Complex64> = Vec::with_capacity(num.len());
    for k in 0..num.len() {
        let mut acc = num[k];
        for i in 1..=k.min(den.len() - 1) {
            acc -= den[i] * out[k - i];
        }
        out.push(acc / den[0]);
    }
    out
}
