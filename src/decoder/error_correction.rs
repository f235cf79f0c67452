//! Reed-Solomon error correction over the interleaved QR codeword stream.

use rayon::prelude::*;

use crate::debug::trace;
use crate::decoder::version::{block_data_lengths, ec_block_info, EcBlockInfo};
use crate::error::{Error, Result};
use crate::field::{ExtElem, ExtField};
use crate::models::{ECLevel, Version};
use crate::rs;

/// Per-block correction diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    /// Which block this is (0-based, schedule order).
    pub block_index: usize,
    /// Data codewords in this block.
    pub num_data_codewords: usize,
    /// EC codewords in this block.
    pub num_ec_codewords: usize,
    /// Errors detected in this block.
    pub errors_found: usize,
    /// Standard-convention positions of the detected errors.
    pub error_positions: Vec<usize>,
    /// Whether correction succeeded for this block.
    pub correction_succeeded: bool,
}

/// Outcome of correcting a whole codeword stream: the de-interleaved,
/// corrected data bytes (absent when any block failed) and the per-block
/// diagnostics.
#[derive(Debug, Clone)]
pub struct CorrectionOutcome {
    /// Corrected data codewords in logical order, or `None` on failure.
    pub data: Option<Vec<u8>>,
    /// One entry per block, in block-index order.
    pub blocks: Vec<BlockResult>,
}

/// Reed-Solomon error corrector for QR codes.
///
/// Owns the GF(256) field built from the QR modulus x^8+x^4+x^3+x^2+1,
/// the cached powers alpha^0..alpha^7 for the byte mapping, and the
/// reverse element-to-byte table.
pub struct ErrorCorrector {
    field: ExtField,
    alpha_powers: [ExtElem; 8],
    byte_of_log: Vec<u8>,
}

impl ErrorCorrector {
    /// Build the corrector, constructing GF(256) from scratch.
    pub fn new() -> Result<Self> {
        let field = ExtField::qr_gf256()?;
        let alpha = field.primitive();
        let mut alpha_powers = [field.one(); 8];
        for i in 1..8 {
            alpha_powers[i] = field.mul(alpha_powers[i - 1], alpha);
        }

        let mut corrector = Self {
            field,
            alpha_powers,
            byte_of_log: Vec::new(),
        };

        // Invert the byte mapping once: every nonzero element has a
        // unique preimage among 1..=255.
        let mut byte_of_log = vec![0u8; 255];
        for b in 1..=255u8 {
            let elem = corrector.byte_to_element(b);
            let log = elem.log().expect("nonzero byte mapped to zero") as usize;
            byte_of_log[log] = b;
        }
        corrector.byte_of_log = byte_of_log;
        Ok(corrector)
    }

    /// The GF(256) field used for correction.
    pub fn field(&self) -> &ExtField {
        &self.field
    }

    /// QR byte mapping: bit i of the byte contributes alpha^i.
    pub fn byte_to_element(&self, b: u8) -> ExtElem {
        let mut result = self.field.zero();
        for (i, &power) in self.alpha_powers.iter().enumerate() {
            if b & (1 << i) != 0 {
                result = self.field.add(result, power);
            }
        }
        result
    }

    /// Inverse of [`ErrorCorrector::byte_to_element`].
    pub fn element_to_byte(&self, elem: ExtElem) -> u8 {
        match elem.log() {
            None => 0,
            Some(log) => self.byte_of_log[log as usize],
        }
    }

    /// De-interleave the raw codeword stream, correct every block
    /// independently, and re-interleave the corrected data codewords.
    ///
    /// Blocks are pure functions of their input, so they run in parallel;
    /// results are collected in block-index order. One failed block does
    /// not stop the others from being processed.
    pub fn correct(&self, raw_codewords: &[u8], version: Version, ec_level: ECLevel) -> CorrectionOutcome {
        let info = ec_block_info(version, ec_level);
        let blocks = self.deinterleave(raw_codewords, info);

        let results: Vec<(Option<Vec<u8>>, BlockResult)> = blocks
            .par_iter()
            .enumerate()
            .map(|(index, block)| self.correct_block(block, info.ecc_per_block, index))
            .collect();

        let mut corrected_blocks = Vec::with_capacity(results.len());
        let mut block_results = Vec::with_capacity(results.len());
        let mut all_succeeded = true;
        for (data, result) in results {
            trace!(
                "block {}: {} errors at {:?}, success={}",
                result.block_index,
                result.errors_found,
                result.error_positions,
                result.correction_succeeded
            );
            all_succeeded &= result.correction_succeeded;
            corrected_blocks.push(data.unwrap_or_default());
            block_results.push(result);
        }

        let data = all_succeeded.then(|| Self::reinterleave(&corrected_blocks));
        CorrectionOutcome {
            data,
            blocks: block_results,
        }
    }

    /// Split the interleaved stream into per-block buffers.
    ///
    /// Data codewords are dealt round-robin over the blocks (short blocks
    /// drop out once full), then the EC codewords the same way.
    fn deinterleave(&self, raw_codewords: &[u8], info: EcBlockInfo) -> Vec<Vec<u8>> {
        let ec_total = info.num_blocks * info.ecc_per_block;
        let data_total = raw_codewords.len() - ec_total;
        let data_lengths = block_data_lengths(info, data_total);

        let mut blocks: Vec<Vec<u8>> = data_lengths
            .iter()
            .map(|&len| Vec::with_capacity(len + info.ecc_per_block))
            .collect();

        let mut raw = raw_codewords.iter().copied();
        let max_data = data_lengths.iter().copied().max().unwrap_or(0);
        for i in 0..max_data {
            for (block, &len) in blocks.iter_mut().zip(&data_lengths) {
                if i < len {
                    block.push(raw.next().expect("raw codewords exhausted"));
                }
            }
        }
        for _ in 0..info.ecc_per_block {
            for block in blocks.iter_mut() {
                block.push(raw.next().expect("raw codewords exhausted"));
            }
        }
        blocks
    }

    /// Column-major merge of the corrected data blocks, stopping per
    /// block as it runs out.
    fn reinterleave(blocks: &[Vec<u8>]) -> Vec<u8> {
        let total: usize = blocks.iter().map(Vec::len).sum();
        let max_len = blocks.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(total);
        for i in 0..max_len {
            for block in blocks {
                if let Some(&b) = block.get(i) {
                    data.push(b);
                }
            }
        }
        data
    }

    /// Run the full RS pipeline on a single block and return the
    /// corrected data bytes plus diagnostics.
    fn correct_block(
        &self,
        block: &[u8],
        num_ec: usize,
        block_index: usize,
    ) -> (Option<Vec<u8>>, BlockResult) {
        let num_data = block.len() - num_ec;
        let block_length = block.len();
        let mut result = BlockResult {
            block_index,
            num_data_codewords: num_data,
            num_ec_codewords: num_ec,
            errors_found: 0,
            error_positions: Vec::new(),
            correction_succeeded: false,
        };

        let received: Vec<ExtElem> = block.iter().map(|&b| self.byte_to_element(b)).collect();
        let syndromes = rs::syndromes(&self.field, &received, num_ec, self.field.primitive());

        if !rs::has_errors(&syndromes) {
            result.correction_succeeded = true;
            return (Some(block[..num_data].to_vec()), result);
        }

        match self.locate_and_fix(&received, &syndromes, num_ec, block_length, &mut result) {
            Ok(corrected) => {
                result.correction_succeeded = true;
                let data = corrected[..num_data]
                    .iter()
                    .map(|&e| self.element_to_byte(e))
                    .collect();
                (Some(data), result)
            }
            Err(_) => (None, result),
        }
    }

    fn locate_and_fix(
        &self,
        received: &[ExtElem],
        syndromes: &[ExtElem],
        num_ec: usize,
        block_length: usize,
        result: &mut BlockResult,
    ) -> Result<Vec<ExtElem>> {
        let lambda = rs::berlekamp_massey(&self.field, syndromes);
        let standard_positions = rs::chien_search(&lambda, block_length);

        result.errors_found = standard_positions.len();
        result.error_positions = standard_positions.clone();

        let correctable = num_ec / 2;
        if standard_positions.len() > correctable {
            return Err(Error::TooManyErrors {
                found: standard_positions.len(),
                correctable,
            });
        }

        let omega = rs::compute_omega(syndromes, &lambda);
        let magnitudes = rs::error_magnitudes(&lambda, &omega, &standard_positions)?;

        // Standard position p addresses x^p; the received vector stores
        // the highest degree first, so it lives at block_length - 1 - p.
        let qr_positions: Vec<usize> = standard_positions
            .iter()
            .map(|&p| block_length - 1 - p)
            .collect();

        let corrected = rs::apply_corrections(&self.field, received, &qr_positions, &magnitudes);
        let (_, valid) = rs::verify_correction(&self.field, &corrected, num_ec);
        if !valid {
            return Err(Error::VerificationFailed);
        }
        Ok(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    // Systematic RS encoder in the QR orientation, for building test
    // blocks: appends num_ec parity bytes to data.
    fn rs_encode(ec: &ErrorCorrector, data: &[u8], num_ec: usize) -> Vec<u8> {
        use crate::field::Poly;
        let f = ec.field();
        let mut generator = Poly::one(f);
        for i in 0..num_ec {
            let root = Poly::new(f, vec![f.neg(f.alpha_pow(i as i64)), f.one()]);
            generator = generator.mul(&root);
        }
        // message polynomial: data[0] is the highest-degree coefficient
        let n = data.len() + num_ec;
        let mut coeffs = vec![f.zero(); n];
        for (i, &b) in data.iter().enumerate() {
            coeffs[n - 1 - i] = ec.byte_to_element(b);
        }
        let message = Poly::new(f, coeffs);
        let (_, remainder) = message.divide(&generator);
        let codeword = message.sub(&remainder);

        (0..n)
            .map(|i| ec.element_to_byte(codeword.coeff(n - 1 - i)))
            .collect()
    }

    #[test]
    fn test_byte_element_mapping() {
        let ec = ErrorCorrector::new().unwrap();
        let f = ec.field();
        assert_eq!(ec.byte_to_element(0x01), f.one());
        assert_eq!(ec.byte_to_element(0x02), f.primitive());
        assert!(ec.byte_to_element(0x00).is_zero());
        assert_eq!(ec.byte_to_element(0x20), f.alpha_pow(5));
        for b in 0..=255u8 {
            assert_eq!(ec.element_to_byte(ec.byte_to_element(b)), b);
        }
    }

    #[test]
    fn test_encoded_block_has_zero_syndromes() {
        let ec = ErrorCorrector::new().unwrap();
        let codeword = rs_encode(&ec, b"hello rs world", 8);
        let received: Vec<ExtElem> =
            codeword.iter().map(|&b| ec.byte_to_element(b)).collect();
        let s = rs::syndromes(ec.field(), &received, 8, ec.field().primitive());
        assert!(!rs::has_errors(&s));
    }

    #[test]
    fn test_single_block_corrects_flips() {
        let ec = ErrorCorrector::new().unwrap();
        let data = b"0123456789abcdefghi"; // 19 bytes, like version 1-L
        let codeword = rs_encode(&ec, data, 7);
        for pos in [0usize, 5, 12, 25] {
            let mut corrupted = codeword.clone();
            corrupted[pos] ^= 0xFF;
            let (fixed, result) = ec.correct_block(&corrupted, 7, 0);
            assert!(result.correction_succeeded, "pos {}", pos);
            assert_eq!(result.errors_found, 1);
            assert_eq!(fixed.unwrap(), data.to_vec(), "pos {}", pos);
        }
    }

    #[test]
    fn test_block_at_capacity() {
        let ec = ErrorCorrector::new().unwrap();
        let data = b"capacity test block";
        let codeword = rs_encode(&ec, data, 10);
        let mut corrupted = codeword.clone();
        for (i, pos) in [2usize, 9, 14, 20, 27].iter().enumerate() {
            corrupted[*pos] ^= 0x11 + i as u8;
        }
        let (fixed, result) = ec.correct_block(&corrupted, 10, 0);
        assert!(result.correction_succeeded);
        assert_eq!(result.errors_found, 5);
        assert_eq!(fixed.unwrap(), data.to_vec());
    }

    #[test]
    fn test_block_beyond_capacity_fails() {
        let ec = ErrorCorrector::new().unwrap();
        let data = b"too many errors here";
        let codeword = rs_encode(&ec, data, 6);
        let mut corrupted = codeword.clone();
        for pos in [1usize, 4, 8, 13, 17, 21] {
            corrupted[pos] ^= 0xA5;
        }
        let (fixed, result) = ec.correct_block(&corrupted, 6, 0);
        assert!(!result.correction_succeeded);
        assert!(fixed.is_none());
    }

    #[test]
    fn test_deinterleave_reinterleave_v5h() {
        // Version 5-H: 4 blocks, data lengths 11+11+12+12, 22 EC each
        let ec = ErrorCorrector::new().unwrap();
        let info = ec_block_info(v(5), ECLevel::H);
        let total = 46 + info.num_blocks * info.ecc_per_block;
        let raw: Vec<u8> = (0..total).map(|i| i as u8).collect();
        let blocks = ec.deinterleave(&raw, info);

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].len(), 11 + 22);
        assert_eq!(blocks[3].len(), 12 + 22);
        // first interleaving round deals one byte per block
        assert_eq!(blocks[0][0], 0);
        assert_eq!(blocks[1][0], 1);
        assert_eq!(blocks[2][0], 2);
        assert_eq!(blocks[3][0], 3);
        // the long blocks take the two bytes after the short ones finish
        assert_eq!(blocks[2][11], 44);
        assert_eq!(blocks[3][11], 45);
        // EC section starts right after the data
        assert_eq!(blocks[0][11], 46);

        // reinterleaving the data sections restores logical order
        let data_blocks: Vec<Vec<u8>> = blocks
            .iter()
            .zip(block_data_lengths(info, 46))
            .map(|(b, len)| b[..len].to_vec())
            .collect();
        let merged = ErrorCorrector::reinterleave(&data_blocks);
        assert_eq!(merged, (0..46).collect::<Vec<u8>>());
    }

    #[test]
    fn test_correct_multiblock_stream() {
        // Build a 2-block interleaved stream by hand (version 6-L:
        // 2 blocks x 68 data, 18 EC each)
        let ec = ErrorCorrector::new().unwrap();
        let info = ec_block_info(v(6), ECLevel::L);
        assert_eq!((info.num_blocks, info.ecc_per_block), (2, 18));

        let data_a: Vec<u8> = (0..68).map(|i| i as u8).collect();
        let data_b: Vec<u8> = (0..68).map(|i| (200 - i) as u8).collect();
        let block_a = rs_encode(&ec, &data_a, 18);
        let block_b = rs_encode(&ec, &data_b, 18);

        let mut raw = Vec::new();
        for i in 0..86 {
            raw.push(block_a[i]);
            raw.push(block_b[i]);
        }
        raw[10] ^= 0xFF; // block A
        raw[21] ^= 0x42; // block B

        let outcome = ec.correct(&raw, v(6), ECLevel::L);
        assert_eq!(outcome.blocks.len(), 2);
        assert!(outcome.blocks.iter().all(|b| b.correction_succeeded));
        assert_eq!(
            outcome.blocks.iter().map(|b| b.errors_found).sum::<usize>(),
            2
        );
        let mut expected = Vec::new();
        for i in 0..68 {
            expected.push(data_a[i]);
            expected.push(data_b[i]);
        }
        assert_eq!(outcome.data.unwrap(), expected);
    }

    #[test]
    fn test_failed_block_reports_others() {
        let ec = ErrorCorrector::new().unwrap();
        let data_a: Vec<u8> = vec![7; 68];
        let data_b: Vec<u8> = vec![9; 68];
        let block_a = rs_encode(&ec, &data_a, 18);
        let block_b = rs_encode(&ec, &data_b, 18);
        let mut raw = Vec::new();
        for i in 0..86 {
            raw.push(block_a[i]);
            raw.push(block_b[i]);
        }
        // destroy block B beyond capacity, leave block A clean
        for i in 0..20 {
            raw[2 * i + 1] ^= 0x5A;
        }
        let outcome = ec.correct(&raw, v(6), ECLevel::L);
        assert!(outcome.data.is_none());
        assert!(outcome.blocks[0].correction_succeeded);
        assert!(!outcome.blocks[1].correction_succeeded);
    }
}
