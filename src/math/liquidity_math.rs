use crate::error::MathError;
use alloy_primitives::U256;

/// Applies a liquidity delta to the running active liquidity.
///
/// Underflow means the tick set handed to the pool was inconsistent with its
/// base liquidity; the caller treats it as a precondition violation.
pub fn apply_liquidity_delta(
    liquidity: U256,
    liquidity_delta: U256,
    is_add_liquidity: bool,
) -> Result<U256, MathError> {
    if is_add_liquidity {
        liquidity
            .checked_add(liquidity_delta)
            .ok_or(MathError::Overflow)
    } else {
        liquidity
            .checked_sub(liquidity_delta)
            .ok_or(MathError::Underflow)
    }
}
