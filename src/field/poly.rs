//! Polynomials over GF(p).
//!
//! Coefficients are stored from lowest to highest degree, e.g. `[c0, c1, c2]`
//! is c0 + c1*x + c2*x^2. These free functions provide exactly what the
//! extension-field construction needs: convolution and long division.

use super::prime::PrimeField;

/// Degree of a coefficient slice, or `None` for the zero polynomial.
pub fn degree(coeffs: &[u16]) -> Option<usize> {
    coeffs.iter().rposition(|&c| c != 0)
}

/// Drop trailing zero coefficients.
pub fn trim(coeffs: &[u16]) -> Vec<u16> {
    match degree(coeffs) {
        Some(d) => coeffs[..=d].to_vec(),
        None => Vec::new(),
    }
}

/// Multiply two polynomials over GF(p) by convolution.
pub fn mul(field: &PrimeField, a: &[u16], b: &[u16]) -> Vec<u16> {
    if degree(a).is_none() || degree(b).is_none() {
        return Vec::new();
    }
    let mut out = vec![0u16; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = field.add(out[i + j], field.mul(x, y));
        }
    }
    out
}

/// Schoolbook long division: returns (quotient, remainder) with
/// `dividend = divisor * quotient + remainder` and
/// `deg(remainder) < deg(divisor)`.
///
/// The remainder buffer is mutated in place and its degree tracked
/// manually; each step must strictly lower it.
///
/// # Panics
///
/// Panics if `divisor` is the zero polynomial, or if an iteration fails
/// to reduce the remainder degree (a bug, not an input condition).
pub fn divide(field: &PrimeField, dividend: &[u16], divisor: &[u16]) -> (Vec<u16>, Vec<u16>) {
    let divisor_deg = degree(divisor).expect("division by zero polynomial");
    let mut rem = dividend.to_vec();
    let dividend_deg = match degree(&rem) {
        Some(d) if d >= divisor_deg => d,
        _ => return (Vec::new(), trim(&rem)),
    };

    let mut quot = vec![0u16; dividend_deg - divisor_deg + 1];
    let lead = divisor[divisor_deg];

    let mut rem_deg = Some(dividend_deg);
    while let Some(d) = rem_deg {
        if d < divisor_deg {
            break;
        }
        let qc = field.div(rem[d], lead);
        let qi = d - divisor_deg;
        quot[qi] = qc;
        for i in 0..=divisor_deg {
            rem[qi + i] = field.sub(rem[qi + i], field.mul(qc, divisor[i]));
        }

        let next = degree(&rem);
        assert!(
            next.map_or(true, |nd| nd < d),
            "remainder degree did not decrease"
        );
        rem_deg = next;
    }
    (quot, trim(&rem))
}
