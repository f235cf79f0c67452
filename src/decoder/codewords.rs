//! Codeword extraction from the sampled bit matrix.

use crate::debug::trace;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::unmask::unmask;
use crate::decoder::version::ec_block_info;
use crate::error::Result;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Everything read off a QR bit matrix before error correction.
#[derive(Debug, Clone)]
pub struct QrData {
    /// Symbol version derived from the matrix side length.
    pub version: Version,
    /// Error correction level from the format information.
    pub ec_level: ECLevel,
    /// Data mask from the format information.
    pub mask: MaskPattern,
    /// All codewords in read order (still interleaved).
    pub raw_codewords: Vec<u8>,
    /// Leading (total - EC) codewords of the raw stream.
    pub data_codewords: Vec<u8>,
    /// Trailing EC codewords of the raw stream.
    pub ec_codewords: Vec<u8>,
}

/// Read format information, unmask, and extract the interleaved
/// codewords from a sampled matrix.
pub fn read_qr_data(matrix: &BitMatrix) -> Result<QrData> {
    let version = Version::from_dimension(matrix.side())?;
    let format = FormatInfo::read(matrix)?;
    trace!(
        "reader: version {} level {} mask {}",
        version.number(),
        format.ec_level.letter(),
        format.mask.number()
    );

    let func = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    unmask(&mut unmasked, format.mask, &func);

    let raw_codewords = read_codewords(&unmasked, &func);
    let info = ec_block_info(version, format.ec_level);
    let ec_total = info.num_blocks * info.ecc_per_block;
    let data_total = raw_codewords.len() - ec_total;

    Ok(QrData {
        version,
        ec_level: format.ec_level,
        mask: format.mask,
        data_codewords: raw_codewords[..data_total].to_vec(),
        ec_codewords: raw_codewords[data_total..].to_vec(),
        raw_codewords,
    })
}

/// Zigzag codeword read over an unmasked matrix.
///
/// Column pairs are traversed right to left, skipping the vertical timing
/// column 6. The first pair is read upward and the direction alternates.
/// Within a row the right column of the pair comes first, bits fill bytes
/// MSB first, and function modules are skipped. Exactly the per-version
/// codeword total is produced.
pub fn read_codewords(matrix: &BitMatrix, func: &FunctionMask) -> Vec<u8> {
    let dimension = matrix.side();
    let total = func.total_codewords();
    let mut codewords = Vec::with_capacity(total);
    let mut current = 0u8;
    let mut bits_read = 0;
    let mut upward = true;

    let mut col = dimension as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        for counter in 0..dimension {
            let row = if upward {
                dimension - 1 - counter
            } else {
                counter
            };
            for offset in 0..2 {
                let c = (col as usize) - offset;
                if func.is_function(row, c) {
                    continue;
                }
                current = (current << 1) | matrix.get(row, c) as u8;
                bits_read += 1;
                if bits_read == 8 {
                    codewords.push(current);
                    current = 0;
                    bits_read = 0;
                    if codewords.len() >= total {
                        return codewords;
                    }
                }
            }
        }
        upward = !upward;
        col -= 2;
    }

    // with a valid dimension the loop above always fills the total
    assert_eq!(codewords.len(), total, "codeword read came up short");
    codewords
}
