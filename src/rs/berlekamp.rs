//! Berlekamp-Massey error locator synthesis.

use crate::field::{ExtElem, ExtField, Poly};

/// Compute the minimal-degree error locator polynomial Lambda(x) with
/// Lambda(0) = 1 from a syndrome sequence of length 2t.
///
/// Iteratively maintains the current locator Lambda, the previous locator
/// B, the current LFSR length L, the shift m since B was saved, and the
/// discrepancy b at that point. At each step the discrepancy of the next
/// syndrome against the current locator decides whether Lambda is kept,
/// updated in place, or swapped with a length change.
///
/// The result has its roots at the inverses of the error locators: for
/// every error at standard position j, Lambda(alpha^(-j)) = 0.
pub fn berlekamp_massey<'f>(field: &'f ExtField, syndromes: &[ExtElem]) -> Poly<'f> {
    let mut lambda = Poly::one(field);
    let mut prev = Poly::one(field);
    let mut len = 0usize;
    let mut shift = 1usize;
    let mut prev_discrepancy = field.one();

    for n in 0..syndromes.len() {
        let mut discrepancy = syndromes[n];
        for i in 1..=len {
            discrepancy = field.add(
                discrepancy,
                field.mul(lambda.coeff(i), syndromes[n - i]),
            );
        }

        if discrepancy.is_zero() {
            shift += 1;
        } else {
            let scale = field.div(discrepancy, prev_discrepancy);
            let correction = Poly::monomial(field, shift, scale).mul(&prev);
            if 2 * len <= n {
                let swapped = lambda.clone();
                lambda = lambda.sub(&correction);
                len = n + 1 - len;
                prev = swapped;
                prev_discrepancy = discrepancy;
                shift = 1;
            } else {
                lambda = lambda.sub(&correction);
                shift += 1;
            }
        }
    }

    lambda
}
