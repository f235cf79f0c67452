//! Syndrome computation for Reed-Solomon codewords.

use crate::field::{ExtElem, ExtField};

/// Compute the syndromes S_i = r(root^i) for i = 0 .. num_ec_symbols-1.
///
/// The received vector uses the QR orientation: `received[0]` is the
/// coefficient of the highest power. The Horner loop therefore folds from
/// the front of the slice. The evaluation point advances by one
/// multiplication with `root` per syndrome.
///
/// All syndromes are zero exactly when the received vector is a codeword
/// of the Reed-Solomon code generated by `root^0 .. root^(2t-1)`.
pub fn syndromes(
    field: &ExtField,
    received: &[ExtElem],
    num_ec_symbols: usize,
    root: ExtElem,
) -> Vec<ExtElem> {
    let mut out = Vec::with_capacity(num_ec_symbols);
    let mut point = field.one();
    for _ in 0..num_ec_symbols {
        let mut s = field.zero();
        for &r in received {
            s = field.add(field.mul(s, point), r);
        }
        out.push(s);
        point = field.mul(point, root);
    }
    out
}

/// True if any syndrome is nonzero.
pub fn has_errors(syndromes: &[ExtElem]) -> bool {
    syndromes.iter().any(|s| !s.is_zero())
}
