//! End-to-end pipeline tests over golden bit matrices.
//!
//! The fixtures are sampled module grids (one string per row, '1' = dark)
//! paired with their known codeword streams and payloads.

use galois_qr::{read_qr_data, BitMatrix, Decoder, ECLevel, Error};

/// Version 1-L symbol carrying "Hello, QR Code!" in byte mode, mask 2.
const HELLO_V1L: [&str; 21] = [
    "111111100010101111111",
    "100000101110101000001",
    "101110100011101011101",
    "101110101100101011101",
    "101110100100001011101",
    "100000101000101000001",
    "111111101010101111111",
    "000000000101100000000",
    "111110111001110101010",
    "110101000000000001101",
    "110000100011110001110",
    "010001011010110101100",
    "110011101001110100001",
    "000000001100000111000",
    "111111101111101100110",
    "100000100101000101111",
    "101110101101001010011",
    "101110101100000111000",
    "101110101011100100100",
    "100000101111010011100",
    "111111101010100010010",
];

/// The interleaved codeword stream of [`HELLO_V1L`]: 19 data + 7 EC.
const HELLO_V1L_CODEWORDS: [u8; 26] = [
    0x40, 0xF4, 0x86, 0x56, 0xC6, 0xC6, 0xF2, 0xC2, 0x05, 0x15, 0x22, 0x04, 0x36, 0xF6, 0x46,
    0x52, 0x10, 0xEC, 0x11, 0x7D, 0x20, 0x3B, 0xB0, 0x8B, 0xA8, 0xAE,
];

/// Version 1-M symbol carrying "4376471154038" in numeric mode, mask 7
/// (generated by an unrelated QR encoder).
const NUMERIC_V1M: [&str; 21] = [
    "111111100000101111111",
    "100000100100001000001",
    "101110100011001011101",
    "101110100010001011101",
    "101110100111101011101",
    "100000101010001000001",
    "111111101010101111111",
    "000000000100000000000",
    "100101101111110100000",
    "111010011001010101100",
    "100101111011001110001",
    "001010010000111110000",
    "001000110101011101100",
    "000000001010011110110",
    "111111100011101011110",
    "100000101000001100001",
    "101110100110111001011",
    "101110101010011110011",
    "101110100111011101001",
    "100000100111100110010",
    "111111101110010111000",
];

fn matrix_from(rows: &[&str]) -> BitMatrix {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|line| line.chars().map(|c| c == '1').collect())
        .collect();
    BitMatrix::from_rows(&rows).expect("fixture must be square")
}

#[test]
fn test_clean_decode() {
    let matrix = matrix_from(&HELLO_V1L);
    let decoder = Decoder::new().unwrap();
    let result = decoder.decode_matrix(&matrix).unwrap();

    assert_eq!(result.message, "Hello, QR Code!");
    assert!(result.correction_successful);
    assert_eq!(result.num_errors_corrected, 0);
    assert!(result.error_positions.is_empty());
    assert_eq!(result.block_results.len(), 1);
}

#[test]
fn test_reader_output() {
    let matrix = matrix_from(&HELLO_V1L);
    let qr_data = read_qr_data(&matrix).unwrap();

    assert_eq!(qr_data.version.number(), 1);
    assert_eq!(qr_data.ec_level, ECLevel::L);
    assert_eq!(qr_data.mask.number(), 2);
    assert_eq!(qr_data.raw_codewords, HELLO_V1L_CODEWORDS);
    assert_eq!(qr_data.data_codewords, HELLO_V1L_CODEWORDS[..19]);
    assert_eq!(qr_data.ec_codewords, HELLO_V1L_CODEWORDS[19..]);
}

#[test]
fn test_corrupted_codeword_still_decodes() {
    let matrix = matrix_from(&HELLO_V1L);
    let decoder = Decoder::new().unwrap();
    let mut qr_data = read_qr_data(&matrix).unwrap();
    qr_data.raw_codewords[5] ^= 0xFF;

    let result = decoder.decode(&qr_data).unwrap();
    assert_eq!(result.message, "Hello, QR Code!");
    assert!(result.correction_successful);
    assert!(result.num_errors_corrected >= 1);
}

#[test]
fn test_every_single_byte_flip_recovers() {
    let matrix = matrix_from(&HELLO_V1L);
    let decoder = Decoder::new().unwrap();
    let qr_data = read_qr_data(&matrix).unwrap();

    for i in 0..qr_data.raw_codewords.len() {
        let mut corrupted = qr_data.clone();
        corrupted.raw_codewords[i] ^= 0xFF;
        let result = decoder.decode(&corrupted).unwrap();
        assert_eq!(result.message, "Hello, QR Code!", "byte {}", i);
        assert_eq!(result.num_errors_corrected, 1, "byte {}", i);
    }
}

#[test]
fn test_damaged_modules_still_decode() {
    // flip a handful of data modules directly in the matrix; they land in
    // at most three codewords, within 1-L capacity
    let mut matrix = matrix_from(&HELLO_V1L);
    matrix.toggle(20, 10);
    matrix.toggle(19, 10);
    matrix.toggle(18, 10);

    let decoder = Decoder::new().unwrap();
    let result = decoder.decode_matrix(&matrix).unwrap();
    assert_eq!(result.message, "Hello, QR Code!");
    assert!(result.num_errors_corrected >= 1);
}

#[test]
fn test_beyond_capacity_fails_loudly() {
    let matrix = matrix_from(&HELLO_V1L);
    let decoder = Decoder::new().unwrap();
    let qr_data = read_qr_data(&matrix).unwrap();

    // 1-L corrects at most 3 symbols; corrupt 6
    let mut corrupted = qr_data.clone();
    for i in 0..6 {
        corrupted.raw_codewords[i] ^= 0xFF;
    }
    let result = decoder.decode(&corrupted).unwrap();
    assert!(!result.correction_successful);
    assert!(result.message.is_empty());
    assert_eq!(result.block_results.len(), 1);
    assert!(!result.block_results[0].correction_succeeded);

    // scattered over-capacity damage fails too
    let mut corrupted = qr_data;
    for pos in [0usize, 3, 7, 11, 19] {
        corrupted.raw_codewords[pos] ^= 0x55;
    }
    let result = decoder.decode(&corrupted).unwrap();
    assert!(!result.correction_successful);
}

#[test]
fn test_at_capacity_recovers() {
    let matrix = matrix_from(&HELLO_V1L);
    let decoder = Decoder::new().unwrap();
    let mut qr_data = read_qr_data(&matrix).unwrap();
    for pos in [2usize, 13, 24] {
        qr_data.raw_codewords[pos] ^= 0x3C;
    }
    let result = decoder.decode(&qr_data).unwrap();
    assert!(result.correction_successful);
    assert_eq!(result.message, "Hello, QR Code!");
    assert_eq!(result.num_errors_corrected, 3);
}

#[test]
fn test_foreign_encoder_matrix_reads_cleanly() {
    // generated by a different implementation; exercises format reading
    // (level M, mask 7) and correction against an external bit layout
    let matrix = matrix_from(&NUMERIC_V1M);
    let qr_data = read_qr_data(&matrix).unwrap();
    assert_eq!(qr_data.version.number(), 1);
    assert_eq!(qr_data.ec_level, ECLevel::M);
    assert_eq!(qr_data.mask.number(), 7);

    let decoder = Decoder::new().unwrap();
    // the payload is numeric mode, which the data decoder rejects, but
    // error correction must pass with zero errors first
    let err = decoder.decode(&qr_data).unwrap_err();
    assert_eq!(err, Error::UnsupportedMode { mode: 0b0001 });
}

#[test]
fn test_foreign_encoder_corrects_damage() {
    let matrix = matrix_from(&NUMERIC_V1M);
    let decoder = Decoder::new().unwrap();
    let mut qr_data = read_qr_data(&matrix).unwrap();
    let original = qr_data.raw_codewords.clone();
    // 1-M has 10 EC codewords; 4 flips are within capacity
    for pos in [1usize, 8, 15, 22] {
        qr_data.raw_codewords[pos] ^= 0x99;
    }
    let outcome = decoder
        .corrector()
        .correct(&qr_data.raw_codewords, qr_data.version, qr_data.ec_level);
    assert_eq!(outcome.blocks[0].errors_found, 4);
    let data = outcome.data.unwrap();
    assert_eq!(data, original[..16]);
}
