//! galois-qr - QR code decoding from first principles
//!
//! A pure Rust QR decoding engine built on a from-scratch finite field
//! stack: prime fields GF(p), extension fields GF(p^n) constructed from an
//! irreducible polynomial, polynomial arithmetic over both, and the full
//! Reed-Solomon decoding pipeline (syndromes, Berlekamp-Massey, Chien
//! search, Forney) wired into QR codeword extraction and byte-mode data
//! decoding.
//!
//! The input is a sampled square bit matrix (image loading and geometric
//! detection are someone else's problem); the output is the decoded
//! message plus per-block error correction statistics.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code decoding (format info, codeword extraction, error correction,
/// data decoding)
pub mod decoder;
/// Error types
pub mod error;
/// Finite field arithmetic (GF(p), GF(p^n), polynomials)
pub mod field;
/// Core data structures (BitMatrix, Version, ECLevel, MaskPattern)
pub mod models;
/// Reed-Solomon decoding stages
pub mod rs;

pub(crate) mod debug;

pub use decoder::codewords::{read_qr_data, QrData};
pub use decoder::error_correction::{BlockResult, CorrectionOutcome, ErrorCorrector};
pub use decoder::qr_decoder::{DecodeResult, Decoder};
pub use error::{Error, Result};
pub use field::{ExtElem, ExtField, Poly, PrimeField};
pub use models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Decode a QR bit matrix with a freshly constructed decoder.
///
/// Convenience wrapper for one-shot callers; reuse a [`Decoder`] when
/// decoding many matrices, since it owns the GF(256) tables.
pub fn decode(matrix: &BitMatrix) -> Result<DecodeResult> {
    Decoder::new()?.decode_matrix(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage() {
        let matrix = BitMatrix::new(21);
        assert!(decode(&matrix).is_err());
    }
}
