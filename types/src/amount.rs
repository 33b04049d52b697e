//! Integer amount arithmetic.
//!
//! Amounts are raw `u128` units of whatever asset they denominate. All
//! fractional arithmetic floors and reports overflow as `None`.

/// Basis points in one whole (100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// `floor(amount * bps / 10_000)`.
pub fn apply_bps(amount: u128, bps: u32) -> Option<u128> {
    mul_div_floor(amount, bps as u128, BPS_DENOMINATOR)
}

/// `floor(a * b / denominator)`, or `None` on overflow or a zero denominator.
///
/// Falls back to splitting `a` by the denominator when `a * b` does not fit,
/// so large pools with small ratios still compute exactly.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    match a.checked_mul(b) {
        Some(product) => Some(product / denominator),
        None => {
            // a = q*d + r  =>  a*b/d = q*b + r*b/d
            let q = a / denominator;
            let r = a % denominator;
            let whole = q.checked_mul(b)?;
            let part = r.checked_mul(b)? / denominator;
            whole.checked_add(part)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bps_floors() {
        assert_eq!(apply_bps(1_000, 100), Some(10));
        assert_eq!(apply_bps(99, 100), Some(0));
        assert_eq!(apply_bps(u128::MAX, 10_000), Some(u128::MAX));
    }

    #[test]
    fn zero_denominator_is_none() {
        assert_eq!(mul_div_floor(1, 1, 0), None);
    }

    #[test]
    fn large_operands_use_split_path() {
        let a = u128::MAX / 2;
        assert_eq!(mul_div_floor(a, 4, 8), Some(a / 2));
    }

    #[test]
    fn unrepresentable_result_is_none() {
        assert_eq!(mul_div_floor(u128::MAX, 3, 2), None);
    }
}
