//! Decode pipeline orchestration: codeword reader, error corrector, and
//! data decoder wired together.

use crate::debug::trace;
use crate::decoder::codewords::{read_qr_data, QrData};
use crate::decoder::data_decoder::decode_data;
use crate::decoder::error_correction::{BlockResult, ErrorCorrector};
use crate::error::Result;
use crate::models::BitMatrix;

/// Result of decoding a QR code, with error correction statistics.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The decoded message (empty when correction failed).
    pub message: String,
    /// Whether every Reed-Solomon block corrected successfully.
    pub correction_successful: bool,
    /// Total symbol errors corrected across all blocks.
    pub num_errors_corrected: usize,
    /// Error positions from all blocks, in block order.
    pub error_positions: Vec<usize>,
    /// Per-block correction details.
    pub block_results: Vec<BlockResult>,
}

/// The complete QR decoding pipeline.
///
/// Construction builds the GF(256) field; the decoder is then reusable
/// across matrices.
pub struct Decoder {
    corrector: ErrorCorrector,
}

impl Decoder {
    /// Build a decoder, constructing the field tables.
    pub fn new() -> Result<Self> {
        Ok(Self {
            corrector: ErrorCorrector::new()?,
        })
    }

    /// Decode a sampled bit matrix end to end.
    ///
    /// Unreadable format information, an unsupported data mode, and a
    /// truncated bit stream are hard errors. A block that fails error
    /// correction is not: the result comes back with
    /// `correction_successful = false` and full per-block diagnostics so
    /// the caller can report which blocks died.
    pub fn decode_matrix(&self, matrix: &BitMatrix) -> Result<DecodeResult> {
        let qr_data = read_qr_data(matrix)?;
        self.decode(&qr_data)
    }

    /// Decode already-extracted codewords.
    pub fn decode(&self, qr_data: &QrData) -> Result<DecodeResult> {
        trace!(
            "decode: version {} level {} total {} codewords",
            qr_data.version.number(),
            qr_data.ec_level.letter(),
            qr_data.raw_codewords.len()
        );

        let outcome =
            self.corrector
                .correct(&qr_data.raw_codewords, qr_data.version, qr_data.ec_level);

        let num_errors_corrected = outcome.blocks.iter().map(|b| b.errors_found).sum();
        let error_positions = outcome
            .blocks
            .iter()
            .flat_map(|b| b.error_positions.iter().copied())
            .collect();

        let Some(data) = outcome.data else {
            return Ok(DecodeResult {
                message: String::new(),
                correction_successful: false,
                num_errors_corrected: 0,
                error_positions,
                block_results: outcome.blocks,
            });
        };

        let message = decode_data(&data, qr_data.version)?;
        trace!("decode: message {:?}", message);

        Ok(DecodeResult {
            message,
            correction_successful: true,
            num_errors_corrected,
            error_positions,
            block_results: outcome.blocks,
        })
    }

    /// The error corrector, exposing the field and byte mapping.
    pub fn corrector(&self) -> &ErrorCorrector {
        &self.corrector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_blank_matrix_fails_format_read() {
        let decoder = Decoder::new().unwrap();
        let matrix = BitMatrix::new(21);
        assert_eq!(
            decoder.decode_matrix(&matrix).unwrap_err(),
            Error::FormatInfoUnreadable
        );
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        let decoder = Decoder::new().unwrap();
        let matrix = BitMatrix::new(20);
        assert!(matches!(
            decoder.decode_matrix(&matrix),
            Err(Error::InvalidFieldParameters { .. })
        ));
    }
}
