//! Chien search for error locator roots.

use crate::field::Poly;

/// Find every standard position j in `[0, codeword_length)` with
/// Lambda(alpha^(-j)) = 0.
///
/// Positions use the standard convention: position j corresponds to the
/// x^j coefficient of the error polynomial, so the error locator for j is
/// alpha^j and the locator polynomial vanishes at its inverse. Exponents
/// are reduced modulo q-1 before evaluation.
pub fn chien_search(lambda: &Poly<'_>, codeword_length: usize) -> Vec<usize> {
    let field = lambda.field();
    let mut positions = Vec::new();
    for j in 0..codeword_length {
        let point = field.alpha_pow(-(j as i64));
        if lambda.evaluate(point).is_zero() {
            positions.push(j);
        }
    }
    positions
}
