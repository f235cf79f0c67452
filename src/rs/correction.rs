//! Applying corrections and verifying the result.

use crate::field::{ExtElem, ExtField};
use crate::rs::syndrome::syndromes;

/// Subtract each error magnitude from the received symbol at its
/// position: `corrected[j] = received[j] - Y_j`. In characteristic 2 the
/// subtraction is the same as addition.
///
/// Positions and magnitudes must already be in the same convention as the
/// received vector.
///
/// # Panics
///
/// Panics if the position and magnitude counts differ, or if a position
/// is out of range. Both indicate a broken invariant upstream.
pub fn apply_corrections(
    field: &ExtField,
    received: &[ExtElem],
    positions: &[usize],
    magnitudes: &[ExtElem],
) -> Vec<ExtElem> {
    assert_eq!(
        positions.len(),
        magnitudes.len(),
        "position count must match magnitude count"
    );
    let mut corrected = received.to_vec();
    for (&pos, &y) in positions.iter().zip(magnitudes) {
        assert!(
            pos < received.len(),
            "error position {} out of bounds for codeword of length {}",
            pos,
            received.len()
        );
        corrected[pos] = field.sub(corrected[pos], y);
    }
    corrected
}

/// Recompute the syndromes of a codeword and report whether they all
/// vanish. Uses the same QR orientation as [`syndromes`].
pub fn verify_correction(
    field: &ExtField,
    codeword: &[ExtElem],
    num_syndromes: usize,
) -> (Vec<ExtElem>, bool) {
    let s = syndromes(field, codeword, num_syndromes, field.primitive());
    let valid = s.iter().all(|e| e.is_zero());
    (s, valid)
}

/// Extract the message symbols from a systematically encoded codeword.
///
/// With parity at the beginning the message is the tail; otherwise it is
/// the head.
///
/// # Panics
///
/// Panics if `message_length` is zero or exceeds the codeword length.
pub fn extract_message(
    codeword: &[ExtElem],
    message_length: usize,
    parity_at_beginning: bool,
) -> Vec<ExtElem> {
    assert!(
        message_length > 0 && message_length <= codeword.len(),
        "invalid message length {} for codeword length {}",
        message_length,
        codeword.len()
    );
    if parity_at_beginning {
        codeword[codeword.len() - message_length..].to_vec()
    } else {
        codeword[..message_length].to_vec()
    }
}
