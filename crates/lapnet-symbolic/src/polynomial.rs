//! Real-coefficient polynomials in the transform variable `s`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{DMatrix, Schur};
use num_complex::Complex64;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Relative threshold below which a coefficient of a sum or difference is
/// flushed to exact zero.
///
/// Applied per coefficient against the larger of the two operands, so small
/// but genuine coefficients survive while cancellation noise does not.
pub const CANCELLATION_EPS: f64 = 1e-12;

/// Maximum Newton steps used to polish eigenvalue roots.
const POLISH_STEPS: usize = 3;

/// Euclidean remainders below this fraction of the dividend are zero.
const GCD_EPS: f64 = 1e-9;

/// Schur iterations allowed per companion-matrix row.
const SCHUR_ITERATIONS_PER_ROW: usize = 200;

/// A polynomial with real coefficients, stored in ascending powers of `s`.
///
/// Trailing (highest-order) zero coefficients are never stored, so the zero
/// polynomial has no coefficients at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// A constant polynomial.
    pub fn constant(value: f64) -> Self {
        Self::from_coeffs(vec![value])
    }

    /// The transform variable `s`.
    pub fn s() -> Self {
        Self::monomial(1.0, 1)
    }

    /// `coeff * s^degree`.
    pub fn monomial(coeff: f64, degree: usize) -> Self {
        let mut coeffs = vec![0.0; degree + 1];
        coeffs[degree] = coeff;
        Self::from_coeffs(coeffs)
    }

    /// Build from ascending coefficients, dropping trailing zeros.
    pub fn from_coeffs(mut coeffs: Vec<f64>) -> Self {
        while coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Build `leading * Π (s - r)` from a set of roots.
    ///
    /// Complex roots are expected in conjugate pairs; the imaginary parts of
    /// the expanded coefficients are discarded.
    pub fn from_roots(roots: &[Complex64], leading: f64) -> Self {
        let mut acc = vec![Complex64::new(leading, 0.0)];
        for &root in roots {
            let mut next = vec![Complex64::zero(); acc.len() + 1];
            for (i, &c) in acc.iter().enumerate() {
                next[i + 1] += c;
                next[i] -= c * root;
            }
            acc = next;
        }
        Self::from_coeffs(acc.into_iter().map(|c| c.re).collect())
    }

    /// Ascending coefficients.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Check whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Leading coefficient (0 for the zero polynomial).
    pub fn leading(&self) -> f64 {
        self.coeffs.last().copied().unwrap_or(0.0)
    }

    /// Largest coefficient magnitude.
    pub fn norm(&self) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, c| acc.max(c.abs()))
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// First derivative with respect to `s`.
    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| c * power as f64)
                .collect(),
        )
    }

    /// Evaluate at a real point (Horner).
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate at a complex point (Horner).
    pub fn eval_complex(&self, z: Complex64) -> Complex64 {
        self.coeffs
            .iter()
            .rev()
            .fold(Complex64::zero(), |acc, &c| acc * z + c)
    }

    /// Polynomial long division, returning `(quotient, remainder)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        let divisor_degree = divisor.degree().ok_or(Error::DivisionByZero)?;
        let Some(degree) = self.degree() else {
            return Ok((Self::zero(), Self::zero()));
        };
        if degree < divisor_degree {
            return Ok((Self::zero(), self.clone()));
        }

        let lead = divisor.leading();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0.0; degree - divisor_degree + 1];
        for k in (0..quot.len()).rev() {
            let q = rem[k + divisor_degree] / lead;
            quot[k] = q;
            for (j, &d) in divisor.coeffs.iter().enumerate() {
                rem[k + j] -= q * d;
            }
            rem[k + divisor_degree] = 0.0;
        }
        rem.truncate(divisor_degree);

        Ok((Self::from_coeffs(quot), Self::from_coeffs(rem)))
    }

    /// Quotient of a division known to be exact; the remainder is discarded.
    pub fn div_exact(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(quot, _)| quot)
    }

    /// The same polynomial scaled to a leading coefficient of 1.
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.scale(1.0 / self.leading())
    }

    /// Monic greatest common divisor by the Euclidean algorithm.
    ///
    /// A remainder whose largest coefficient is below `1e-9` of the
    /// dividend's counts as zero, so near-common factors are merged.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.monic();
        let mut b = other.monic();
        while !b.is_zero() {
            let Ok((_, rem)) = a.div_rem(&b) else {
                break;
            };
            let rem = if rem.norm() <= GCD_EPS * a.norm() {
                Self::zero()
            } else {
                rem.monic()
            };
            a = b;
            b = rem;
        }
        a
    }

    /// All complex roots, with multiplicity.
    ///
    /// Roots at the origin are split off exactly. Repeated factors are
    /// separated through `gcd(p, p')` so each root-finding step sees only
    /// simple roots. Degrees one and two are solved in closed form; higher
    /// degrees use the eigenvalues of the companion matrix, polished with a
    /// few Newton steps.
    ///
    /// Fails with [`Error::NoClosedForm`] when the eigenvalue iteration does
    /// not converge.
    pub fn roots(&self) -> Result<Vec<Complex64>> {
        if self.degree().is_none() {
            return Ok(Vec::new());
        }

        let at_origin = self.coeffs.iter().take_while(|c| **c == 0.0).count();
        let reduced = Self::from_coeffs(self.coeffs[at_origin..].to_vec());
        let mut roots = vec![Complex64::zero(); at_origin];
        roots.extend(reduced.nonzero_roots()?);
        Ok(roots)
    }

    // Roots of a polynomial with a nonzero constant term.
    fn nonzero_roots(&self) -> Result<Vec<Complex64>> {
        let c = &self.coeffs;
        match c.len().saturating_sub(1) {
            0 => return Ok(Vec::new()),
            1 => return Ok(vec![Complex64::new(-c[0] / c[1], 0.0)]),
            2 => return Ok(quadratic_roots(c[2], c[1], c[0]).to_vec()),
            _ => {}
        }

        let slope = self.derivative();
        let common = self.gcd(&slope);
        if common.degree().is_some_and(|d| d > 0) {
            // p = (p / g) * g, with p / g square-free.
            let square_free = self.div_exact(&common)?;
            let mut roots = square_free.nonzero_roots()?;
            roots.extend(common.nonzero_roots()?);
            return Ok(roots);
        }

        let n = c.len() - 1;
        let lead = c[n];
        let mut companion = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            if i > 0 {
                companion[(i, i - 1)] = 1.0;
            }
            companion[(i, n - 1)] = -c[i] / lead;
        }

        let schur = Schur::try_new(companion, f64::EPSILON, SCHUR_ITERATIONS_PER_ROW * n)
            .ok_or_else(|| {
                Error::NoClosedForm(format!("root finding did not converge for {}", self))
            })?;
        Ok(schur
            .complex_eigenvalues()
            .iter()
            .map(|&z| polish_root(self, &slope, z))
            .collect())
    }
}

/// Roots of `a s^2 + b s + c` with `a != 0` and `c != 0`.
fn quadratic_roots(a: f64, b: f64, c: f64) -> [Complex64; 2] {
    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        let sign = if b >= 0.0 { 1.0 } else { -1.0 };
        let q = -0.5 * (b + sign * disc.sqrt());
        let r1 = q / a;
        let r2 = if q != 0.0 { c / q } else { r1 };
        [Complex64::new(r1, 0.0), Complex64::new(r2, 0.0)]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a).abs();
        [Complex64::new(re, im), Complex64::new(re, -im)]
    }
}

fn polish_root(poly: &Polynomial, slope: &Polynomial, mut z: Complex64) -> Complex64 {
    let mut residual = poly.eval_complex(z).norm();
    for _ in 0..POLISH_STEPS {
        let d = slope.eval_complex(z);
        if d.norm() == 0.0 {
            break;
        }
        let candidate = z - poly.eval_complex(z) / d;
        let candidate_residual = poly.eval_complex(candidate).norm();
        if !(candidate_residual < residual) {
            break;
        }
        z = candidate;
        residual = candidate_residual;
    }
    z
}

fn combine(a: &Polynomial, b: &Polynomial, sign: f64) -> Polynomial {
    let len = a.coeffs.len().max(b.coeffs.len());
    let coeffs = (0..len)
        .map(|i| {
            let x = a.coeffs.get(i).copied().unwrap_or(0.0);
            let y = sign * b.coeffs.get(i).copied().unwrap_or(0.0);
            let sum = x + y;
            if sum.abs() <= CANCELLATION_EPS * x.abs().max(y.abs()) {
                0.0
            } else {
                sum
            }
        })
        .collect();
    Polynomial::from_coeffs(coeffs)
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        combine(self, rhs, 1.0)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        combine(self, rhs, -1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial::from_coeffs(coeffs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

/// Format a real coefficient for display, printing near-integers exactly.
pub(crate) fn format_real(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() <= 1e-9 * value.abs().max(1.0) {
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{}", rounded);
    }

    let magnitude = value.abs();
    if (1e-4..1e6).contains(&magnitude) {
        let text = format!("{:.9}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{:.6e}", value)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (power, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0.0 {
                continue;
            }
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", if c < 0.0 { '-' } else { '+' })?;
            }
            first = false;

            let coeff = format_real(c.abs());
            if power == 0 {
                write!(f, "{coeff}")?;
                continue;
            }
            if coeff != "1" {
                write!(f, "{coeff}*")?;
            }
            write!(f, "s")?;
            if power > 1 {
                write!(f, "^{power}")?;
            }
        }
        Ok(())
    }
}
