//! Forney error magnitude computation.

use crate::error::{Error, Result};
use crate::field::{ExtElem, Poly};

/// Compute the error evaluator polynomial Omega(x) = [S(x) * Lambda(x)]
/// truncated below degree nu, where nu = deg(Lambda) and S(x) is the
/// syndrome polynomial S_0 + S_1 x + ...
///
/// The key equation S(x) * Lambda(x) = Omega(x) (mod x^(2t)) guarantees
/// the dropped coefficients are zero for a consistent locator.
pub fn compute_omega<'f>(syndromes: &[ExtElem], lambda: &Poly<'f>) -> Poly<'f> {
    let field = lambda.field();
    let nu = match lambda.degree() {
        Some(d) if d > 0 => d,
        _ => return Poly::zero(field),
    };
    let s_poly = Poly::new(field, syndromes.to_vec());
    let product = s_poly.mul(lambda);
    let truncated: Vec<ExtElem> = (0..nu).map(|i| product.coeff(i)).collect();
    Poly::new(field, truncated)
}

/// Compute the error magnitude at each located position.
///
/// For a standard position j, the error locator is X = alpha^j and the
/// magnitude is
///
/// ```text
/// Y = -X * Omega(X^-1) / Lambda'(X^-1)
/// ```
///
/// where Lambda' is the formal derivative. In characteristic 2 the
/// negation is the identity. Magnitudes come back in the same order as
/// `positions`.
///
/// A zero derivative at a reported root means the locator is inconsistent
/// with the positions (possible when the error count exceeds capacity);
/// that surfaces as [`Error::VerificationFailed`] rather than a panic.
pub fn error_magnitudes(
    lambda: &Poly<'_>,
    omega: &Poly<'_>,
    positions: &[usize],
) -> Result<Vec<ExtElem>> {
    let field = lambda.field();
    let derivative = lambda.formal_derivative();
    let mut magnitudes = Vec::with_capacity(positions.len());

    for &j in positions {
        let locator = field.alpha_pow(j as i64);
        let locator_inv = field.alpha_pow(-(j as i64));
        let denom = derivative.evaluate(locator_inv);
        if denom.is_zero() {
            return Err(Error::VerificationFailed);
        }
        let ratio = field.div(omega.evaluate(locator_inv), denom);
        magnitudes.push(field.neg(field.mul(locator, ratio)));
    }
    Ok(magnitudes)
}
