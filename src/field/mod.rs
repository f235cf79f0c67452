//! Finite field arithmetic
//!
//! This module builds the algebraic stack the Reed-Solomon decoder runs on:
//! - Prime fields GF(p) with elements in `[0, p)`
//! - Polynomial arithmetic over GF(p), used to construct extensions
//! - Extension fields GF(p^n) as GF(p)[x] modulo an irreducible polynomial,
//!   with power/polynomial lookup tables built from a primitive element
//! - Polynomial arithmetic over GF(p^n)

/// Extension fields GF(p^n) with log/polynomial dual representation
pub mod extension;
/// Polynomials over GF(p) (construction-time helper arithmetic)
pub mod poly;
/// Polynomials over GF(p^n)
pub mod poly_ext;
/// Prime fields GF(p)
pub mod prime;

pub use extension::{ExtElem, ExtField};
pub use poly_ext::Poly;
pub use prime::PrimeField;
