//! Polynomials over GF(p^n).
//!
//! Coefficients are stored from lowest to highest degree and normalized so
//! the last coefficient is nonzero (or the vector is empty for the zero
//! polynomial). Polynomials are value-like: every operation returns a
//! fresh, trimmed polynomial. A polynomial borrows the field its
//! coefficients live in; binary operations require both operands to share
//! that field.

use super::extension::{ExtElem, ExtField};

/// A polynomial with coefficients in GF(p^n).
#[derive(Debug, Clone)]
pub struct Poly<'f> {
    field: &'f ExtField,
    coeffs: Vec<ExtElem>,
}

fn find_degree(coeffs: &[ExtElem]) -> Option<usize> {
    coeffs.iter().rposition(|c| !c.is_zero())
}

impl<'f> Poly<'f> {
    /// Build a polynomial from ascending-degree coefficients, trimming
    /// trailing zeros.
    pub fn new(field: &'f ExtField, mut coeffs: Vec<ExtElem>) -> Self {
        let len = find_degree(&coeffs).map_or(0, |d| d + 1);
        coeffs.truncate(len);
        Self { field, coeffs }
    }

    /// The zero polynomial.
    pub fn zero(field: &'f ExtField) -> Self {
        Self {
            field,
            coeffs: Vec::new(),
        }
    }

    /// The constant polynomial one.
    pub fn one(field: &'f ExtField) -> Self {
        Self {
            field,
            coeffs: vec![field.one()],
        }
    }

    /// coeff * x^degree.
    pub fn monomial(field: &'f ExtField, degree: usize, coeff: ExtElem) -> Self {
        if coeff.is_zero() {
            return Self::zero(field);
        }
        let mut coeffs = vec![field.zero(); degree + 1];
        coeffs[degree] = coeff;
        Self { field, coeffs }
    }

    /// The field the coefficients live in.
    pub fn field(&self) -> &'f ExtField {
        self.field
    }

    /// Ascending-degree coefficients with no trailing zeros.
    pub fn coefficients(&self) -> &[ExtElem] {
        &self.coeffs
    }

    /// The coefficient of x^i (zero beyond the stored length).
    pub fn coeff(&self, i: usize) -> ExtElem {
        self.coeffs.get(i).copied().unwrap_or(ExtElem::ZERO)
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    fn assert_same_field(&self, other: &Poly<'f>) {
        assert!(
            std::ptr::eq(self.field, other.field),
            "polynomials must be over the same field"
        );
    }

    /// Elementwise sum; the shorter operand is extended with zeros.
    pub fn add(&self, other: &Poly<'f>) -> Poly<'f> {
        self.assert_same_field(other);
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.field.add(self.coeff(i), other.coeff(i)))
            .collect();
        Poly::new(self.field, coeffs)
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &Poly<'f>) -> Poly<'f> {
        self.assert_same_field(other);
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.field.sub(self.coeff(i), other.coeff(i)))
            .collect();
        Poly::new(self.field, coeffs)
    }

    /// Product by convolution.
    pub fn mul(&self, other: &Poly<'f>) -> Poly<'f> {
        self.assert_same_field(other);
        if self.is_zero() || other.is_zero() {
            return Poly::zero(self.field);
        }
        let mut coeffs = vec![self.field.zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = self.field.add(coeffs[i + j], self.field.mul(a, b));
            }
        }
        Poly::new(self.field, coeffs)
    }

    /// Multiply every coefficient by a scalar.
    pub fn scalar_mul(&self, scalar: ExtElem) -> Poly<'f> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| self.field.mul(scalar, c))
            .collect();
        Poly::new(self.field, coeffs)
    }

    /// Formal derivative. The coefficient of x^(i-1) is a_i summed with
    /// itself i times, so multiples of the characteristic vanish.
    pub fn formal_derivative(&self) -> Poly<'f> {
        if self.coeffs.len() <= 1 {
            return Poly::zero(self.field);
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, &c) in self.coeffs.iter().enumerate().skip(1) {
            let mut acc = self.field.zero();
            for _ in 0..i {
                acc = self.field.add(acc, c);
            }
            coeffs.push(acc);
        }
        Poly::new(self.field, coeffs)
    }

    /// Schoolbook long division over a mutable working remainder whose
    /// degree is tracked manually. Returns (quotient, remainder) with
    /// `self = divisor * quotient + remainder` and
    /// `deg(remainder) < deg(divisor)`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial, or if an iteration
    /// fails to lower the remainder degree.
    pub fn divide(&self, divisor: &Poly<'f>) -> (Poly<'f>, Poly<'f>) {
        self.assert_same_field(divisor);
        let divisor_deg = divisor.degree().expect("division by zero polynomial");

        let dividend_deg = match self.degree() {
            Some(d) if d >= divisor_deg => d,
            _ => return (Poly::zero(self.field), self.clone()),
        };

        let field = self.field;
        let mut rem = self.coeffs.clone();
        let mut quot = vec![field.zero(); dividend_deg - divisor_deg + 1];
        let lead = divisor.coeffs[divisor_deg];

        let mut rem_deg = Some(dividend_deg);
        while let Some(d) = rem_deg {
            if d < divisor_deg {
                break;
            }
            let qc = field.div(rem[d], lead);
            let qi = d - divisor_deg;
            quot[qi] = qc;
            for (i, &dc) in divisor.coeffs.iter().enumerate() {
                rem[qi + i] = field.sub(rem[qi + i], field.mul(qc, dc));
            }

            let next = find_degree(&rem);
            assert!(
                next.map_or(true, |nd| nd < d),
                "remainder degree did not decrease"
            );
            rem_deg = next;
        }

        (Poly::new(field, quot), Poly::new(field, rem))
    }

    /// Evaluate at a point by Horner's method from the highest
    /// coefficient down.
    pub fn evaluate(&self, x: ExtElem) -> ExtElem {
        let mut result = self.field.zero();
        for &c in self.coeffs.iter().rev() {
            result = self.field.add(self.field.mul(result, x), c);
        }
        result
    }
}
