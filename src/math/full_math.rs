use crate::error::MathError;
use alloy_primitives::aliases::U512;
use alloy_primitives::U256;

#[inline]
pub(crate) fn widen(x: U256) -> U512 {
    let limbs = x.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

#[inline]
pub(crate) fn narrow(x: U512) -> Result<U256, MathError> {
    let limbs = x.as_limbs();
    if limbs[4] | limbs[5] | limbs[6] | limbs[7] != 0 {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `floor(a * b / denominator)` with the 512-bit intermediate
/// product carried in full precision.
///
/// This underpins every price/liquidity formula in the crate; callers name
/// the rounding direction explicitly by picking this or one of the two
/// variants below.
#[inline]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// Like [`mul_div`], but rounds toward positive infinity when the division
/// leaves a remainder.
#[inline]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = (widen(a) * widen(b)).div_rem(widen(denominator));
    if remainder.is_zero() {
        narrow(quotient)
    } else {
        narrow(quotient + U512::ONE)
    }
}

/// Like [`mul_div`], but truncates toward zero. Over the unsigned magnitudes
/// used in this crate truncation and floor coincide; the distinct name keeps
/// each call site tied to the rounding direction its formula mandates.
#[inline]
pub fn mul_div_rounding_down(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    mul_div(a, b, denominator)
}

/// Full-width variant for operands that may not fit 256 bits (quadratic
/// coefficients, liquidity shifted by 96). Floor division; errors if the
/// product overflows 512 bits.
#[inline]
pub(crate) fn mul_div_512(a: U512, b: U512, denominator: U512) -> Result<U512, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = a.checked_mul(b).ok_or(MathError::Overflow)?;
    Ok(product / denominator)
}

/// Returns the smaller root `floor((b - sqrt(b^2 - a*c)) / a)` of
/// `a*x^2 - 2*b*x + c = 0`.
///
/// Callers guarantee `b > 0` and `b^2 >= a*c`; a discriminant underflow
/// therefore means the inputs violated the reserve bound and is reported as
/// such rather than asserted away.
pub(crate) fn get_smaller_root_of_quad_eqn(
    a: U512,
    b: U512,
    c: U512,
) -> Result<U256, MathError> {
    if a.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let b_squared = b.checked_mul(b).ok_or(MathError::Overflow)?;
    let ac = a.checked_mul(c).ok_or(MathError::Overflow)?;
    let discriminant = b_squared
        .checked_sub(ac)
        .ok_or(MathError::InsufficientReserves)?;
    // root(2) is the floor integer square root
    let sqrt = discriminant.root(2);
    narrow((b - sqrt) / a)
}

/// Encodes `floor(sqrt(amount1 / amount0) * 2^96)`, the Q64.96 sqrt price
/// of a pool holding the given raw reserves.
pub fn encode_sqrt_ratio_x96(amount1: U256, amount0: U256) -> Result<U256, MathError> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let ratio = (widen(amount1) << 192usize) / widen(amount0);
    narrow(ratio.root(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;
    use std::str::FromStr;

    // ------------------------- mul_div -------------------------

    #[test]
    fn mul_div_floors() {
        // 7 * 10 / 8 = 8.75 -> 8
        let result = mul_div(U256::from(7u8), U256::from(10u8), U256::from(8u8)).unwrap();
        assert_eq!(result, U256::from(8u8));
    }

    #[test]
    fn mul_div_exact() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn mul_div_full_precision_product() {
        // (2^256 - 1)^2 / (2^256 - 1) = 2^256 - 1: the product needs 512 bits
        let result = mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap();
        assert_eq!(result, U256::MAX);
    }

    #[test]
    fn mul_div_quotient_overflow() {
        // (2^256 - 1) * 2 / 1 does not fit 256 bits
        let result = mul_div(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    // ------------------------- mul_div_rounding_up -------------------------

    #[test]
    fn mul_div_rounding_up_non_exact() {
        // 7 * 10 / 3 = 23.33.. -> 24
        let result =
            mul_div_rounding_up(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap();
        assert_eq!(result, U256::from(24u8));
    }

    #[test]
    fn mul_div_rounding_up_exact_stays_put() {
        let result =
            mul_div_rounding_up(U256::from(20u8), U256::from(10u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_rounding_up_propagates_quotient_overflow() {
        // MAX^2 / (MAX - 1) = MAX + 1 + eps, which cannot fit 256 bits
        let result = mul_div_rounding_up(U256::MAX, U256::MAX, U256::MAX - U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    // ------------------------- mul_div_rounding_down -------------------------

    #[test]
    fn mul_div_rounding_down_truncates() {
        // over unsigned operands truncation equals the floor result
        let result =
            mul_div_rounding_down(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap();
        assert_eq!(result, U256::from(23u8));
        assert_eq!(
            result,
            mul_div(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap()
        );
    }

    // ------------------------- quadratic root -------------------------

    #[test]
    fn smaller_root_of_simple_quadratic() {
        // x^2 - 2*5x + 24 = 0 -> roots 4 and 6, smaller is 4 (a = 1, b = 5, c = 24)
        let root = get_smaller_root_of_quad_eqn(
            U512::from(1u8),
            U512::from(5u8),
            U512::from(24u8),
        )
        .unwrap();
        assert_eq!(root, U256::from(4u8));
    }

    #[test]
    fn smaller_root_floors_irrational_results() {
        // 2x^2 - 2*7x + 3 = 0 -> smaller root (7 - sqrt(43)) / 2 = 0.22.. -> 0
        let root = get_smaller_root_of_quad_eqn(
            U512::from(2u8),
            U512::from(7u8),
            U512::from(3u8),
        )
        .unwrap();
        assert_eq!(root, U256::ZERO);
    }

    #[test]
    fn smaller_root_negative_discriminant_is_insufficient_reserves() {
        let result = get_smaller_root_of_quad_eqn(
            U512::from(10u8),
            U512::from(2u8),
            U512::from(100u8),
        );
        assert!(matches!(result, Err(MathError::InsufficientReserves)));
    }

    // ------------------------- encode_sqrt_ratio_x96 -------------------------

    #[test]
    fn encode_sqrt_ratio_one_to_one() {
        assert_eq!(encode_sqrt_ratio_x96(U256::ONE, U256::ONE).unwrap(), Q96);
    }

    #[test]
    fn encode_sqrt_ratio_known_values() {
        // values cross-checked against the reference SDK
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(100u8), U256::from(1u8)).unwrap(),
            U256::from_str("792281625142643375935439503360").unwrap()
        );
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(1u8), U256::from(100u8)).unwrap(),
            U256::from_str("7922816251426433759354395033").unwrap()
        );
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(111u8), U256::from(333u16)).unwrap(),
            U256::from_str("45742400955009932534161870629").unwrap()
        );
    }

    #[test]
    fn encode_sqrt_ratio_rejects_zero_reserve() {
        let result = encode_sqrt_ratio_x96(U256::ONE, U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }
}
