//! Reed-Solomon decoding pipeline
//!
//! The stages run in order: syndrome computation detects errors,
//! Berlekamp-Massey synthesizes the error locator polynomial, Chien search
//! finds the error positions, Forney's algorithm computes the error
//! magnitudes, and the corrections are applied and verified. All stages
//! are generic over an extension field GF(p^n).
//!
//! Received codewords use the QR orientation: `received[0]` holds the
//! highest-degree coefficient. Syndrome computation and verification use
//! that orientation; Chien search reports positions in the standard
//! convention (position i corresponds to x^i), and callers bridge the two
//! with `block_length - 1 - position`.

/// Berlekamp-Massey error locator synthesis
pub mod berlekamp;
/// Chien search for error positions
pub mod chien;
/// Applying and verifying corrections
pub mod correction;
/// Forney error magnitude computation
pub mod forney;
/// Syndrome computation
pub mod syndrome;

pub use berlekamp::berlekamp_massey;
pub use chien::chien_search;
pub use correction::{apply_corrections, extract_message, verify_correction};
pub use forney::{compute_omega, error_magnitudes};
pub use syndrome::{has_errors, syndromes};
