use crate::error::{Error, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Decoded format information: error correction level and data mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level of the symbol.
    pub ec_level: ECLevel,
    /// Data mask applied to the data modules.
    pub mask: MaskPattern,
}

const FORMAT_MASK: u16 = 0x5412;
const FORMAT_GENERATOR: u16 = 0x537;

impl FormatInfo {
    /// Read and decode the format information from a sampled matrix.
    ///
    /// The primary copy sits around the top-left finder; the backup copy
    /// is split between the top-right and bottom-left finders. The
    /// primary copy wins when it decodes; otherwise the backup is tried.
    pub fn read(matrix: &BitMatrix) -> Result<Self> {
        let primary = Self::read_primary_bits(matrix);
        if let Some(info) = Self::decode(primary) {
            return Ok(info);
        }
        let backup = Self::read_backup_bits(matrix);
        Self::decode(backup).ok_or(Error::FormatInfoUnreadable)
    }

    /// Primary copy: (row 8, cols 0..5), (row 8, col 7), (8, 8), (7, 8),
    /// then (rows 5..0, col 8).
    fn read_primary_bits(matrix: &BitMatrix) -> u16 {
        let mut bits = 0u16;
        for col in 0..6 {
            bits = (bits << 1) | matrix.get(8, col) as u16;
        }
        bits = (bits << 1) | matrix.get(8, 7) as u16;
        bits = (bits << 1) | matrix.get(8, 8) as u16;
        bits = (bits << 1) | matrix.get(7, 8) as u16;
        for row in (0..6).rev() {
            bits = (bits << 1) | matrix.get(row, 8) as u16;
        }
        bits
    }

    /// Backup copy: (rows D-1..D-7, col 8), then (row 8, cols D-8..D-1).
    fn read_backup_bits(matrix: &BitMatrix) -> u16 {
        let d = matrix.side();
        let mut bits = 0u16;
        for row in (d - 7..d).rev() {
            bits = (bits << 1) | matrix.get(row, 8) as u16;
        }
        for col in d - 8..d {
            bits = (bits << 1) | matrix.get(8, col) as u16;
        }
        bits
    }

    /// The masked 15-bit format word for an (EC level, mask) pair:
    /// 5 data bits, 10 BCH check bits from generator 0x537, XOR 0x5412.
    pub fn encode(ec_level: ECLevel, mask: MaskPattern) -> u16 {
        let data = (u16::from(ec_level.format_bits()) << 3) | u16::from(mask.number());
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ (((rem >> 9) & 1) * FORMAT_GENERATOR);
        }
        ((data << 10) | (rem & 0x3FF)) ^ FORMAT_MASK
    }

    /// Match a received word against all 32 format candidates, accepting
    /// the closest within Hamming distance 3.
    fn decode(received: u16) -> Option<Self> {
        let mut best: Option<(Self, u32)> = None;
        for ec_bits in 0..4u8 {
            for mask_bits in 0..8u8 {
                let ec_level = ECLevel::from_format_bits(ec_bits);
                let mask = MaskPattern::new(mask_bits);
                let candidate = Self::encode(ec_level, mask);
                let dist = u32::from(candidate ^ received).count_ones();
                if dist <= 3 && best.map_or(true, |(_, bd)| dist < bd) {
                    best = Some((Self { ec_level, mask }, dist));
                }
            }
        }
        best.map(|(info, _)| info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_format(matrix: &mut BitMatrix, word: u16) {
        let d = matrix.side();
        let bit = |i: usize| (word >> (14 - i)) & 1 == 1;
        // primary copy, mirroring the read order
        let mut i = 0;
        for col in 0..6 {
            matrix.set(8, col, bit(i));
            i += 1;
        }
        matrix.set(8, 7, bit(i));
        i += 1;
        matrix.set(8, 8, bit(i));
        i += 1;
        matrix.set(7, 8, bit(i));
        i += 1;
        for row in (0..6).rev() {
            matrix.set(row, 8, bit(i));
            i += 1;
        }
        // backup copy
        let mut i = 0;
        for row in (d - 7..d).rev() {
            matrix.set(row, 8, bit(i));
            i += 1;
        }
        for col in d - 8..d {
            matrix.set(8, col, bit(i));
            i += 1;
        }
    }

    #[test]
    fn test_known_encoding() {
        // ISO reference value: level M (00), mask 5 -> 0x40CE after masking
        let word = FormatInfo::encode(ECLevel::M, MaskPattern::new(5));
        assert_eq!(word, 0x40CE);
    }

    #[test]
    fn test_roundtrip_all_combinations() {
        for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for m in 0..8 {
                let mut matrix = BitMatrix::new(21);
                write_format(&mut matrix, FormatInfo::encode(level, MaskPattern::new(m)));
                let info = FormatInfo::read(&matrix).unwrap();
                assert_eq!(info.ec_level, level);
                assert_eq!(info.mask.number(), m);
            }
        }
    }

    #[test]
    fn test_three_bit_damage_recovered() {
        let word = FormatInfo::encode(ECLevel::L, MaskPattern::new(2));
        let mut matrix = BitMatrix::new(21);
        write_format(&mut matrix, word ^ 0b101_0000_0000_0001);
        let info = FormatInfo::read(&matrix).unwrap();
        assert_eq!(info.ec_level, ECLevel::L);
        assert_eq!(info.mask.number(), 2);
    }

    #[test]
    fn test_backup_copy_used_when_primary_destroyed() {
        let word = FormatInfo::encode(ECLevel::Q, MaskPattern::new(6));
        let mut matrix = BitMatrix::new(25);
        write_format(&mut matrix, word);
        // wreck the primary copy beyond the distance bound
        for col in 0..6 {
            matrix.toggle(8, col);
        }
        matrix.toggle(8, 7);
        let info = FormatInfo::read(&matrix).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask.number(), 6);
    }

    #[test]
    fn test_unreadable_when_both_copies_bad() {
        // an all-dark matrix is 15 ones in both copies; distance to every
        // candidate exceeds the bound
        let mut matrix = BitMatrix::new(21);
        for r in 0..21 {
            for c in 0..21 {
                matrix.set(r, c, true);
            }
        }
        assert_eq!(
            FormatInfo::read(&matrix),
            Err(Error::FormatInfoUnreadable)
        );
    }
}
