use crate::error::{Error, Result};

/// The prime field GF(p).
///
/// Elements are plain `u16` values in `[0, p)`; all operations are methods
/// on the field context and return normalized values. The modulus must be
/// prime for division to be well-defined; the constructor only checks the
/// cheap shape constraints (p > 1, p below 2^15).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    p: u16,
}

impl PrimeField {
    /// Create GF(p).
    pub fn new(p: u16) -> Result<Self> {
        if p <= 1 {
            return Err(Error::invalid_params("p must be a prime greater than 1"));
        }
        if p > (1 << 15) {
            return Err(Error::invalid_params("p must fit in 15 bits"));
        }
        Ok(Self { p })
    }

    /// The modulus p.
    pub fn modulus(&self) -> u16 {
        self.p
    }

    /// Reduce an arbitrary integer into `[0, p)`.
    ///
    /// `((v mod p) + p) mod p` is well-defined for negative values.
    pub fn element(&self, v: i64) -> u16 {
        let p = i64::from(self.p);
        ((v % p + p) % p) as u16
    }

    /// (a + b) mod p.
    pub fn add(&self, a: u16, b: u16) -> u16 {
        ((u32::from(a) + u32::from(b)) % u32::from(self.p)) as u16
    }

    /// (a - b) mod p, normalized into `[0, p)`.
    pub fn sub(&self, a: u16, b: u16) -> u16 {
        let p = u32::from(self.p);
        ((u32::from(a) + p - u32::from(b)) % p) as u16
    }

    /// (a * b) mod p. The intermediate product is widened to 32 bits.
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        ((u32::from(a) * u32::from(b)) % u32::from(self.p)) as u16
    }

    /// Multiplicative inverse via the extended Euclidean algorithm,
    /// normalized into `[1, p)`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is zero.
    pub fn inv(&self, a: u16) -> u16 {
        assert!(a != 0, "inverse of zero in GF({})", self.p);
        let (mut old_r, mut r) = (i64::from(a), i64::from(self.p));
        let (mut old_s, mut s) = (1i64, 0i64);
        while r != 0 {
            let q = old_r / r;
            (old_r, r) = (r, old_r - q * r);
            (old_s, s) = (s, old_s - q * s);
        }
        self.element(old_s)
    }

    /// a * inv(b) mod p.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn div(&self, a: u16, b: u16) -> u16 {
        assert!(b != 0, "division by zero in GF({})", self.p);
        self.mul(a, self.inv(b))
    }
}
