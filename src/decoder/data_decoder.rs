//! Bit-level parsing of corrected data codewords.

use crate::error::{Error, Result};
use crate::models::Version;

/// MSB-first bit reader over a byte slice.
///
/// QR data segments are packed at the bit level; reads of 1 to 32 bits
/// cross byte boundaries and fail once the bytes run out.
pub struct BitStream<'a> {
    bytes: &'a [u8],
    byte_offset: usize,
    bit_offset: usize,
}

impl<'a> BitStream<'a> {
    /// Wrap a byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    /// Bits left to read.
    pub fn available(&self) -> usize {
        (self.bytes.len() - self.byte_offset) * 8 - self.bit_offset
    }

    /// Read `n` bits (1..=32), most significant first within each byte.
    pub fn read_bits(&mut self, n: usize) -> Result<u32> {
        assert!(n >= 1 && n <= 32, "bit read size {} out of range 1..=32", n);
        if n > self.available() {
            return Err(Error::BitStreamExhausted {
                requested: n,
                available: self.available(),
            });
        }
        let mut value = 0u32;
        for _ in 0..n {
            let byte = self.bytes[self.byte_offset];
            let bit = (byte >> (7 - self.bit_offset)) & 1;
            value = (value << 1) | u32::from(bit);
            self.bit_offset += 1;
            if self.bit_offset == 8 {
                self.bit_offset = 0;
                self.byte_offset += 1;
            }
        }
        Ok(value)
    }
}

/// Mode indicator values from the segment header.
mod mode {
    pub const TERMINATOR: u32 = 0b0000;
    pub const NUMERIC: u32 = 0b0001;
    pub const ALPHANUMERIC: u32 = 0b0010;
    pub const BYTE: u32 = 0b0100;
    pub const KANJI: u32 = 0b1000;
}

/// Decode the corrected data codewords into a message string.
///
/// Reads the 4-bit mode indicator and handles byte mode (a character
/// count of 8 bits for versions 1-9, 16 bits for 10-40, followed by that
/// many bytes interpreted as UTF-8) and the terminator, which yields an
/// empty message. Numeric, alphanumeric and kanji segments are rejected
/// as unsupported.
pub fn decode_data(data: &[u8], version: Version) -> Result<String> {
    let mut bits = BitStream::new(data);
    let indicator = bits.read_bits(4)?;
    match indicator {
        mode::BYTE => decode_byte_segment(&mut bits, version),
        mode::TERMINATOR => Ok(String::new()),
        mode::NUMERIC | mode::ALPHANUMERIC | mode::KANJI => Err(Error::UnsupportedMode {
            mode: indicator as u8,
        }),
        other => Err(Error::UnsupportedMode { mode: other as u8 }),
    }
}

fn decode_byte_segment(bits: &mut BitStream<'_>, version: Version) -> Result<String> {
    let count = bits.read_bits(version.byte_mode_count_bits())? as usize;
    let mut bytes = Vec::with_capacity(count);
    for _ in 0..count {
        bytes.push(bits.read_bits(8)? as u8);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
