//! Extension fields GF(p^n).
//!
//! A field is built as GF(p)[x] modulo a monic irreducible polynomial m(x)
//! of degree n. Construction searches for a primitive element (a generator
//! of the multiplicative group) and tabulates its powers, giving every
//! element two representations:
//!
//! - polynomial form: a length-n vector of GF(p) coefficients, used by
//!   addition and subtraction
//! - log form: an exponent k with the element equal to alpha^k, used by
//!   multiplication and division
//!
//! Elements are compact log handles ([`ExtElem`]); they are only meaningful
//! relative to the field that created them, and operations are methods on
//! the field context. Mixing handles across fields is a structural mistake.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::poly;
use super::prime::PrimeField;
use crate::error::{Error, Result};

/// An element of GF(p^n): zero, or a power of the primitive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtElem(Option<u32>);

impl ExtElem {
    /// The zero element (in any field).
    pub const ZERO: ExtElem = ExtElem(None);

    /// Whether this is the zero element.
    pub fn is_zero(self) -> bool {
        self.0.is_none()
    }

    /// The exponent k with self = alpha^k, or `None` for zero.
    pub fn log(self) -> Option<u32> {
        self.0
    }
}

/// The extension field GF(p^n).
#[derive(Debug, Clone)]
pub struct ExtField {
    base: PrimeField,
    degree: usize,
    order: usize,
    irreducible: Vec<u16>,
    power_to_poly: Vec<Vec<u16>>,
    poly_to_power: HashMap<Vec<u16>, u32>,
    zero_coeffs: Vec<u16>,
}

impl ExtField {
    /// Build GF(p^n) from the base prime, the extension degree, and the
    /// coefficients (ascending, monic) of an irreducible polynomial of
    /// degree exactly n.
    pub fn new(p: u16, n: usize, irreducible: &[i64]) -> Result<Self> {
        if n < 1 {
            return Err(Error::invalid_params("n must be at least 1"));
        }
        if irreducible.len() != n + 1 {
            return Err(Error::invalid_params(
                "irreducible polynomial must have degree n (need n+1 coefficients)",
            ));
        }
        if irreducible[n] != 1 {
            return Err(Error::invalid_params(
                "irreducible polynomial must be monic",
            ));
        }
        let base = PrimeField::new(p)?;
        let order = (0..n).try_fold(1usize, |acc, _| acc.checked_mul(usize::from(p)));
        let Some(order) = order else {
            return Err(Error::invalid_params("field order p^n overflows"));
        };
        // The lookup tables hold q-1 length-n vectors; refuse orders that
        // could not be tabulated anyway.
        if order > 1 << 26 {
            return Err(Error::invalid_params("field order p^n too large to tabulate"));
        }

        let m: Vec<u16> = irreducible.iter().map(|&c| base.element(c)).collect();
        let mut field = Self {
            base,
            degree: n,
            order,
            irreducible: m,
            power_to_poly: Vec::with_capacity(order.saturating_sub(1)),
            poly_to_power: HashMap::with_capacity(order.saturating_sub(1)),
            zero_coeffs: vec![0; n],
        };

        let primitive = field.find_primitive()?;
        field.build_tables(&primitive)?;
        Ok(field)
    }

    /// Build the QR-standard field GF(256) with m(x) = x^8+x^4+x^3+x^2+1.
    pub fn qr_gf256() -> Result<Self> {
        Self::new(2, 8, &[1, 0, 1, 1, 1, 0, 0, 0, 1])
    }

    /// Reduce a GF(p)[x] product of degree up to 2(n-1) modulo m(x) and
    /// pad to exactly n coefficients.
    fn reduce(&self, product: &[u16]) -> Vec<u16> {
        let (_, rem) = poly::divide(&self.base, product, &self.irreducible);
        let mut out = rem;
        out.resize(self.degree, 0);
        out
    }

    /// Multiplicative order of a nonzero polynomial element, or `None` if
    /// no power of it reaches one within the group bound.
    fn order_of(&self, elem: &[u16]) -> Option<usize> {
        let mut one = vec![0u16; self.degree];
        one[0] = 1;
        let mut current = elem.to_vec();
        current.resize(self.degree, 0);
        for order in 1..=self.order {
            if current == one {
                return Some(order);
            }
            current = self.reduce(&poly::mul(&self.base, &current, elem));
        }
        None
    }

    /// Search for a generator of the multiplicative group.
    ///
    /// Degree-1 fields use a fixed candidate (1 for p = 2, else 2). Higher
    /// degrees try x itself first, then every c0 + c1*x.
    fn find_primitive(&self) -> Result<Vec<u16>> {
        let p = self.base.modulus();
        if self.degree == 1 {
            return Ok(vec![if p == 2 { 1 } else { 2 }]);
        }

        let target = self.order - 1;
        let mut alpha = vec![0u16; self.degree];
        alpha[1] = 1;
        if self.order_of(&alpha) == Some(target) {
            return Ok(alpha);
        }
        for c0 in 0..p {
            for c1 in 0..p {
                if (c0, c1) == (0, 1) || (c0, c1) == (0, 0) {
                    continue;
                }
                let mut candidate = vec![0u16; self.degree];
                candidate[0] = c0;
                candidate[1] = c1;
                if self.order_of(&candidate) == Some(target) {
                    return Ok(candidate);
                }
            }
        }
        Err(Error::NoPrimitiveFound {
            p,
            n: self.degree,
        })
    }

    /// Tabulate alpha^0 .. alpha^(q-2) and the inverse mapping, verifying
    /// that the powers cycle back to one and enumerate the whole group.
    fn build_tables(&mut self, primitive: &[u16]) -> Result<()> {
        let mut current = vec![0u16; self.degree];
        current[0] = 1;
        for power in 0..self.order - 1 {
            self.power_to_poly.push(current.clone());
            self.poly_to_power.insert(current.clone(), power as u32);
            current = self.reduce(&poly::mul(&self.base, &current, primitive));
        }

        // A shorter cycle or duplicate entries mean the candidate did not
        // generate the group (or the modulus is reducible).
        if current != self.power_to_poly[0]
            || self.poly_to_power.len() != self.power_to_poly.len()
        {
            return Err(Error::NoPrimitiveFound {
                p: self.base.modulus(),
                n: self.degree,
            });
        }
        Ok(())
    }

    /// The base field GF(p).
    pub fn base(&self) -> &PrimeField {
        &self.base
    }

    /// The characteristic p.
    pub fn characteristic(&self) -> u16 {
        self.base.modulus()
    }

    /// The extension degree n.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The number of elements q = p^n.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The zero element.
    pub fn zero(&self) -> ExtElem {
        ExtElem(None)
    }

    /// The multiplicative identity alpha^0.
    pub fn one(&self) -> ExtElem {
        ExtElem(Some(0))
    }

    /// The primitive element alpha.
    pub fn primitive(&self) -> ExtElem {
        ExtElem(Some(1 % (self.order as u32 - 1)))
    }

    /// Element from an integer index, reduced canonically into `[0, q)`:
    /// 0 is zero, 1 is one, and i > 1 is alpha^(i-1).
    pub fn element(&self, v: i64) -> ExtElem {
        let q = self.order as i64;
        let v = ((v % q) + q) % q;
        if v == 0 {
            ExtElem(None)
        } else {
            ExtElem(Some((v - 1) as u32))
        }
    }

    /// The inverse of [`ExtField::element`]: 0 for zero, log + 1 otherwise.
    pub fn index_of(&self, e: ExtElem) -> usize {
        match e.0 {
            None => 0,
            Some(k) => k as usize + 1,
        }
    }

    /// All q elements, zero first, then ascending powers of alpha.
    pub fn elements(&self) -> impl Iterator<Item = ExtElem> + '_ {
        (0..self.order as i64).map(|i| self.element(i))
    }

    /// Polynomial-form coefficients of an element, lowest degree first,
    /// always of length n.
    pub fn coefficients(&self, e: ExtElem) -> &[u16] {
        match e.0 {
            None => &self.zero_coeffs,
            Some(k) => &self.power_to_poly[k as usize],
        }
    }

    fn from_coeffs(&self, coeffs: &[u16]) -> ExtElem {
        if coeffs.iter().all(|&c| c == 0) {
            return ExtElem(None);
        }
        let power = self.poly_to_power[coeffs];
        ExtElem(Some(power))
    }

    /// Coefficient-wise addition through the polynomial representations.
    pub fn add(&self, a: ExtElem, b: ExtElem) -> ExtElem {
        let (ca, cb) = (self.coefficients(a), self.coefficients(b));
        let sum: Vec<u16> = ca
            .iter()
            .zip(cb)
            .map(|(&x, &y)| self.base.add(x, y))
            .collect();
        self.from_coeffs(&sum)
    }

    /// Coefficient-wise subtraction through the polynomial representations.
    pub fn sub(&self, a: ExtElem, b: ExtElem) -> ExtElem {
        let (ca, cb) = (self.coefficients(a), self.coefficients(b));
        let diff: Vec<u16> = ca
            .iter()
            .zip(cb)
            .map(|(&x, &y)| self.base.sub(x, y))
            .collect();
        self.from_coeffs(&diff)
    }

    /// Additive inverse.
    pub fn neg(&self, a: ExtElem) -> ExtElem {
        self.sub(self.zero(), a)
    }

    /// Multiplication through the log representation.
    pub fn mul(&self, a: ExtElem, b: ExtElem) -> ExtElem {
        match (a.0, b.0) {
            (Some(ka), Some(kb)) => {
                let q1 = self.order as u32 - 1;
                ExtElem(Some((ka + kb) % q1))
            }
            _ => ExtElem(None),
        }
    }

    /// Division through the log representation.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn div(&self, a: ExtElem, b: ExtElem) -> ExtElem {
        let kb = b.0.expect("division by zero field element");
        match a.0 {
            None => ExtElem(None),
            Some(ka) => {
                let q1 = self.order as u32 - 1;
                ExtElem(Some((ka + q1 - kb % q1) % q1))
            }
        }
    }

    /// Multiplicative inverse of a nonzero element.
    pub fn inv(&self, a: ExtElem) -> ExtElem {
        self.div(self.one(), a)
    }

    /// alpha^k for any integer exponent (negative exponents wrap).
    pub fn alpha_pow(&self, k: i64) -> ExtElem {
        let q1 = self.order as i64 - 1;
        ExtElem(Some(((k % q1 + q1) % q1) as u32))
    }

    /// External string form: `"0"` for zero, otherwise the coefficient
    /// values concatenated from highest to lowest index.
    pub fn display(&self, e: ExtElem) -> String {
        if e.is_zero() {
            return "0".to_string();
        }
        let coeffs = self.coefficients(e);
        let mut out = String::with_capacity(coeffs.len());
        for &c in coeffs.iter().rev() {
            let _ = write!(out, "{}", c);
        }
        out
    }
}
