//! Rational functions of `s`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::algebra::Tolerances;
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;

/// A ratio of two real polynomials in `s`.
///
/// The denominator is kept monic and never zero. The zero function is stored
/// as `0 / 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rational {
    num: Polynomial,
    den: Polynomial,
}

impl Rational {
    /// Build `num / den`, normalizing the denominator to be monic.
    pub fn new(num: Polynomial, den: Polynomial) -> Result<Self> {
        if den.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if num.is_zero() {
            return Ok(Self::zero());
        }
        let lead = den.leading();
        Ok(Self {
            num: num.scale(1.0 / lead),
            den: den.scale(1.0 / lead),
        })
    }

    /// The zero function.
    pub fn zero() -> Self {
        Self {
            num: Polynomial::zero(),
            den: Polynomial::one(),
        }
    }

    /// The constant 1.
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// A constant function.
    pub fn constant(value: f64) -> Self {
        Self::from_polynomial(Polynomial::constant(value))
    }

    /// The transform variable `s`.
    pub fn s() -> Self {
        Self::from_polynomial(Polynomial::s())
    }

    /// A polynomial viewed as a rational function.
    pub fn from_polynomial(num: Polynomial) -> Self {
        Self {
            num,
            den: Polynomial::one(),
        }
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.num
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.den
    }

    /// Check whether this is the literal zero.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Check whether the denominator is the constant 1.
    pub fn is_polynomial(&self) -> bool {
        self.den.degree() == Some(0)
    }

    /// Reciprocal, failing for the zero function.
    pub fn recip(&self) -> Result<Self> {
        Self::new(self.den.clone(), self.num.clone())
    }

    /// Divide by another rational function.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.recip()?)
    }

    /// Evaluate at a complex point.
    pub fn eval_complex(&self, z: Complex64) -> Complex64 {
        self.num.eval_complex(z) / self.den.eval_complex(z)
    }

    /// Cancel numerator and denominator roots that coincide within
    /// `tol.root_match`.
    ///
    /// Returns an unchanged copy when nothing cancels, so well-formed
    /// expressions are not perturbed by a root round trip. Root-finding
    /// failures are left for [`crate::inverse_laplace`] to report.
    pub fn reduce(&self, tol: &Tolerances) -> Self {
        if self.is_zero() || self.is_polynomial() || self.num.degree() == Some(0) {
            return self.clone();
        }

        let (Ok(zeros), Ok(mut poles)) = (self.num.roots(), self.den.roots()) else {
            return self.clone();
        };
        let mut kept_zeros = Vec::with_capacity(zeros.len());
        let mut cancelled = false;

        for zero in zeros {
            let nearest = poles
                .iter()
                .enumerate()
                .map(|(i, p)| (i, (p - zero).norm()))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            match nearest {
                Some((i, dist)) if dist <= tol.root_match * zero.norm().max(1.0) => {
                    poles.swap_remove(i);
                    cancelled = true;
                }
                _ => kept_zeros.push(zero),
            }
        }

        if !cancelled {
            return self.clone();
        }

        Self {
            num: Polynomial::from_roots(&kept_zeros, self.num.leading()),
            den: Polynomial::from_roots(&poles, 1.0),
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Polynomial> for Rational {
    fn from(num: Polynomial) -> Self {
        Self::from_polynomial(num)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        if self.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return self.clone();
        }
        if self.den == rhs.den {
            return Rational {
                num: &self.num + &rhs.num,
                den: self.den.clone(),
            }
            .normalized();
        }
        Rational {
            num: &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            den: &self.den * &rhs.den,
        }
        .normalized()
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self + &(-rhs)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        if self.is_zero() || rhs.is_zero() {
            return Rational::zero();
        }
        Rational {
            num: &self.num * &rhs.num,
            den: &self.den * &rhs.den,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl Rational {
    // A sum can cancel to zero; keep the `0 / 1` representation.
    fn normalized(self) -> Self {
        if self.num.is_zero() { Self::zero() } else { self }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_polynomial() {
            return write!(f, "{}", self.num.scale(1.0 / self.den.leading()));
        }
        write!(f, "{}/{}", grouped(&self.num), grouped(&self.den))
    }
}

fn grouped(poly: &Polynomial) -> String {
    if poly.coeffs().iter().filter(|c| **c != 0.0).count() > 1 {
        format!("({poly})")
    } else {
        poly.to_string()
    }
}
