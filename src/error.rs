//! Error types for the galois-qr library.

use thiserror::Error;

/// The main error type for decoding failures and invalid constructions.
///
/// Invariant violations that indicate programmer error (division by zero in
/// a field, polynomial division by the zero polynomial, mixing polynomials
/// from different fields, mismatched correction vectors) panic instead of
/// returning one of these variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Field construction was given unusable parameters.
    #[error("invalid field parameters: {reason}")]
    InvalidFieldParameters {
        /// What was wrong with the parameters.
        reason: String,
    },

    /// No generator of the multiplicative group was found. This usually
    /// means the modulus polynomial is not irreducible.
    #[error("no primitive element found for GF({p}^{n})")]
    NoPrimitiveFound {
        /// Base prime.
        p: u16,
        /// Extension degree.
        n: usize,
    },

    /// Neither copy of the 15-bit format word decoded.
    #[error("format information unreadable in both copies")]
    FormatInfoUnreadable,

    /// More error positions were located than the code can correct.
    #[error("too many errors: found {found}, can correct {correctable}")]
    TooManyErrors {
        /// Number of error positions reported.
        found: usize,
        /// Correction capacity of the block.
        correctable: usize,
    },

    /// Syndromes of the corrected codeword are not all zero, or the error
    /// locator turned out to be inconsistent with the located positions.
    #[error("correction verification failed")]
    VerificationFailed,

    /// The data stream starts with a mode this decoder does not handle.
    #[error("unsupported mode indicator {mode:#06b}")]
    UnsupportedMode {
        /// The 4-bit mode indicator value.
        mode: u8,
    },

    /// A bit-level read ran past the end of the data bytes.
    #[error("bit stream exhausted: requested {requested} bits, {available} available")]
    BitStreamExhausted {
        /// Bits requested by the read.
        requested: usize,
        /// Bits that were left in the stream.
        available: usize,
    },
}

/// A specialized `Result` type for galois-qr operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create an `InvalidFieldParameters` error.
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidFieldParameters {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_params("p must be greater than 1");
        assert!(err.to_string().contains("p must be greater than 1"));

        let err = Error::NoPrimitiveFound { p: 2, n: 8 };
        assert!(err.to_string().contains("GF(2^8)"));

        let err = Error::TooManyErrors {
            found: 5,
            correctable: 3,
        };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }
}
