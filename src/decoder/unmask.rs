use crate::decoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Remove the data mask by toggling every data module the pattern covers.
/// Function modules are untouched.
pub fn unmask(matrix: &mut BitMatrix, mask: MaskPattern, func: &FunctionMask) {
    let side = matrix.side();
    for row in 0..side {
        for col in 0..side {
            if !func.is_function(row, col) && mask.is_masked(row, col) {
                matrix.toggle(row, col);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_unmask_toggles_only_masked_data_modules() {
        let func = FunctionMask::new(Version::new(1).unwrap());
        let mut matrix = BitMatrix::new(21);
        matrix.set(10, 10, true);
        matrix.set(10, 11, false);

        unmask(&mut matrix, MaskPattern::new(0), &func);

        // (10, 10): (10 + 10) % 2 == 0, toggled
        assert!(!matrix.get(10, 10));
        // (10, 11): not masked, unchanged
        assert!(!matrix.get(10, 11));
        // function module under the mask predicate stays put
        assert!(!matrix.get(0, 0));
    }

    #[test]
    fn test_unmask_is_involution() {
        let func = FunctionMask::new(Version::new(1).unwrap());
        let mut matrix = BitMatrix::new(21);
        matrix.set(9, 14, true);
        matrix.set(12, 17, true);
        let original = matrix.clone();

        unmask(&mut matrix, MaskPattern::new(3), &func);
        unmask(&mut matrix, MaskPattern::new(3), &func);
        assert_eq!(matrix, original);
    }
}
