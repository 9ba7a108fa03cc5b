use crate::error::MathError;
use crate::fee::{FeeAmount, FEE_UNITS, TWO_FEE_UNITS};
use crate::math::full_math::{
    get_smaller_root_of_quad_eqn, mul_div, mul_div_512, mul_div_rounding_up, narrow, widen,
};
use crate::Q96;
use alloy_primitives::{I256, U256};

/// One kernel invocation: how much of the specified side was consumed, what
/// the opposite side returned, the fee converted into reinvestment
/// liquidity, and where the sqrt price ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    /// Signed amount of the specified side consumed by this step (positive
    /// for exact input, negative for exact output).
    pub used_amount: I256,
    /// Signed amount of the opposite side (negative when paid out to the
    /// caller, positive when owed by the caller).
    pub returned_amount: I256,
    /// Liquidity minted from the step's fee, to be added to the pool's
    /// reinvestment liquidity.
    pub delta_l: U256,
    /// The sqrt price after the step.
    pub next_sqrt_p: U256,
}

#[inline]
fn to_signed(x: U256) -> Result<I256, MathError> {
    I256::try_from(x).map_err(|_| MathError::Overflow)
}

/// Computes the input/output amounts, collected fee, and resulting sqrt
/// price for a single swap step under `liquidity` (base plus reinvestment).
///
/// `specified_amount` is the remaining budget: positive for exact input,
/// negative for exact output, matching `is_exact_input`. `is_token0` says
/// which side of the pair the specified amount is denominated in.
pub fn compute_swap_step(
    liquidity: U256,
    current_sqrt_p: U256,
    target_sqrt_p: U256,
    fee: FeeAmount,
    specified_amount: I256,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<SwapStep, MathError> {
    // tick movements can make the target coincide with the current price,
    // e.g. when a price limit sits exactly on an initialised tick
    if current_sqrt_p == target_sqrt_p {
        return Ok(SwapStep {
            used_amount: I256::ZERO,
            returned_amount: I256::ZERO,
            delta_l: U256::ZERO,
            next_sqrt_p: current_sqrt_p,
        });
    }

    let mut used_amount = calc_reach_amount(
        liquidity,
        current_sqrt_p,
        target_sqrt_p,
        fee,
        is_exact_input,
        is_token0,
    )?;

    // either the specified budget runs out before the target price, or the
    // target is reached and the remainder carries to the next step
    let mut target_reached = true;
    if (is_exact_input && used_amount > specified_amount)
        || (!is_exact_input && used_amount <= specified_amount)
    {
        used_amount = specified_amount;
        target_reached = false;
    }

    let abs_delta = used_amount.unsigned_abs();
    let fee_units = U256::from(fee.units());

    let (delta_l, next_sqrt_p) = if target_reached {
        let delta_l = calc_incremental_liquidity(
            abs_delta,
            liquidity,
            current_sqrt_p,
            target_sqrt_p,
            is_exact_input,
            is_token0,
        )?;
        (delta_l, target_sqrt_p)
    } else {
        let delta_l = estimate_incremental_liquidity(
            abs_delta,
            liquidity,
            current_sqrt_p,
            fee_units,
            is_exact_input,
            is_token0,
        )?;
        let next_sqrt_p = calc_final_price(
            abs_delta,
            liquidity,
            delta_l,
            current_sqrt_p,
            is_exact_input,
            is_token0,
        )?;
        (delta_l, next_sqrt_p)
    };

    let returned_amount = calc_returned_amount(
        liquidity,
        current_sqrt_p,
        next_sqrt_p,
        delta_l,
        is_exact_input,
        is_token0,
    )?;

    Ok(SwapStep {
        used_amount,
        returned_amount,
        delta_l,
        next_sqrt_p,
    })
}

/// The exact specified-side amount that moves the sqrt price all the way
/// from `current_sqrt_p` to `target_sqrt_p`.
///
/// Every division rounds down: exact input should need as little as
/// possible to move ticks, exact output should hand out as little as
/// possible. Negated for exact output.
fn calc_reach_amount(
    liquidity: U256,
    current_sqrt_p: U256,
    target_sqrt_p: U256,
    fee: FeeAmount,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<I256, MathError> {
    let abs_price_diff = if current_sqrt_p >= target_sqrt_p {
        current_sqrt_p - target_sqrt_p
    } else {
        target_sqrt_p - current_sqrt_p
    };
    let fee_units = U256::from(fee.units());

    // the denominators below cannot go negative while the per-step price
    // excursion stays inside the MAX_TICK_DISTANCE envelope
    if is_exact_input {
        if is_token0 {
            // amount0 = 2F * liquidity * absPriceDiff
            //         / (currentSqrtP * (2F * targetSqrtP - fee * currentSqrtP)) << 96
            let denominator = (TWO_FEE_UNITS * target_sqrt_p)
                .checked_sub(fee_units * current_sqrt_p)
                .ok_or(MathError::Underflow)?;
            let numerator = mul_div(liquidity, TWO_FEE_UNITS * abs_price_diff, denominator)?;
            to_signed(mul_div(numerator, Q96, current_sqrt_p)?)
        } else {
            // amount1 = 2F * liquidity * absPriceDiff * currentSqrtP
            //         / (2F * currentSqrtP - fee * targetSqrtP) >> 96
            let denominator = (TWO_FEE_UNITS * current_sqrt_p)
                .checked_sub(fee_units * target_sqrt_p)
                .ok_or(MathError::Underflow)?;
            let numerator = mul_div(liquidity, TWO_FEE_UNITS * abs_price_diff, denominator)?;
            to_signed(mul_div(numerator, current_sqrt_p, Q96)?)
        }
    } else if is_token0 {
        let denominator = (TWO_FEE_UNITS * current_sqrt_p)
            .checked_sub(fee_units * target_sqrt_p)
            .ok_or(MathError::Underflow)?;
        let numerator = denominator
            .checked_sub(fee_units * current_sqrt_p)
            .ok_or(MathError::Underflow)?;
        let numerator = narrow(mul_div_512(
            widen(liquidity) << 96,
            widen(numerator),
            widen(denominator),
        )?)?;
        let reach = mul_div(numerator, abs_price_diff, current_sqrt_p)? / target_sqrt_p;
        Ok(-to_signed(reach)?)
    } else {
        let denominator = (TWO_FEE_UNITS * target_sqrt_p)
            .checked_sub(fee_units * current_sqrt_p)
            .ok_or(MathError::Underflow)?;
        let numerator = denominator
            .checked_sub(fee_units * target_sqrt_p)
            .ok_or(MathError::Underflow)?;
        let numerator = mul_div(liquidity, numerator, denominator)?;
        let reach = mul_div(numerator, abs_price_diff, Q96)?;
        Ok(-to_signed(reach)?)
    }
}

/// Reinvestment liquidity for a partial step: the target tick is not
/// reached, so the fee is estimated from the consumed amount alone.
fn estimate_incremental_liquidity(
    abs_delta: U256,
    liquidity: U256,
    current_sqrt_p: U256,
    fee_units: U256,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<U256, MathError> {
    if is_exact_input {
        if is_token0 {
            // deltaL = currentSqrtP * absDelta * fee / (2F << 96)
            narrow(mul_div_512(
                widen(current_sqrt_p),
                widen(abs_delta) * widen(fee_units),
                widen(TWO_FEE_UNITS) << 96,
            )?)
        } else {
            // deltaL = absDelta * fee / (2F * currentSqrtP), rounded down so
            // the derived nextSqrtP rounds up
            narrow(mul_div_512(
                widen(Q96),
                widen(abs_delta) * widen(fee_units),
                widen(TWO_FEE_UNITS) * widen(current_sqrt_p),
            )?)
        }
    } else {
        // deltaL is the smaller root of fee * x^2 - 2b * x + c = 0
        let a = widen(fee_units);
        let b_base = (widen(FEE_UNITS) - widen(fee_units)) * widen(liquidity);
        let scaled_delta = widen(FEE_UNITS) * widen(abs_delta);
        let c_base = (widen(fee_units) * widen(liquidity))
            .checked_mul(widen(abs_delta))
            .ok_or(MathError::Overflow)?;

        let (b_cut, c) = if is_token0 {
            (
                mul_div_512(scaled_delta, widen(current_sqrt_p), widen(Q96))?,
                mul_div_512(c_base, widen(current_sqrt_p), widen(Q96))?,
            )
        } else {
            (
                mul_div_512(scaled_delta, widen(Q96), widen(current_sqrt_p))?,
                mul_div_512(c_base, widen(Q96), widen(current_sqrt_p))?,
            )
        };
        let b = b_base
            .checked_sub(b_cut)
            .ok_or(MathError::InsufficientReserves)?;

        get_smaller_root_of_quad_eqn(a, b, c)
    }
}

/// Reinvestment liquidity for a full step where the target price is
/// reached; derived from the known price pair, kept minimal.
fn calc_incremental_liquidity(
    abs_delta: U256,
    liquidity: U256,
    current_sqrt_p: U256,
    next_sqrt_p: U256,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<U256, MathError> {
    let tmp1 = if is_token0 {
        mul_div(liquidity, Q96, current_sqrt_p)?
    } else {
        mul_div(liquidity, current_sqrt_p, Q96)?
    };

    // when liquidity or absDelta is small, rounding can leave the projected
    // balance short of what is already there; the delta floors at zero
    let tmp2 = if is_exact_input {
        tmp1.checked_add(abs_delta).ok_or(MathError::Overflow)?
    } else {
        match tmp1.checked_sub(abs_delta) {
            Some(value) => value,
            None => return Ok(U256::ZERO),
        }
    };

    let tmp3 = if is_token0 {
        mul_div(next_sqrt_p, tmp2, Q96)?
    } else {
        mul_div(tmp2, Q96, next_sqrt_p)?
    };

    Ok(if tmp3 > liquidity {
        tmp3 - liquidity
    } else {
        U256::ZERO
    })
}

/// The sqrt price a partial step lands on, given the consumed amount and
/// the reinvestment liquidity it generated.
///
/// Rounds toward the caller paying more / receiving less: up for exact
/// input on token0, down otherwise, mirrored for token1.
fn calc_final_price(
    abs_delta: U256,
    liquidity: U256,
    delta_l: U256,
    current_sqrt_p: U256,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<U256, MathError> {
    let final_price = if is_token0 {
        let tmp = mul_div(abs_delta, current_sqrt_p, Q96)?;
        let liquidity_after = liquidity.checked_add(delta_l).ok_or(MathError::Overflow)?;
        if is_exact_input {
            let denominator = liquidity.checked_add(tmp).ok_or(MathError::Overflow)?;
            mul_div_rounding_up(liquidity_after, current_sqrt_p, denominator)?
        } else {
            let denominator = liquidity
                .checked_sub(tmp)
                .ok_or(MathError::InsufficientReserves)?;
            mul_div(liquidity_after, current_sqrt_p, denominator)?
        }
    } else {
        let tmp = mul_div(abs_delta, Q96, current_sqrt_p)?;
        let liquidity_after = liquidity.checked_add(delta_l).ok_or(MathError::Overflow)?;
        if is_exact_input {
            let numerator = liquidity.checked_add(tmp).ok_or(MathError::Overflow)?;
            mul_div(numerator, current_sqrt_p, liquidity_after)?
        } else {
            let numerator = liquidity
                .checked_sub(tmp)
                .ok_or(MathError::InsufficientReserves)?;
            mul_div_rounding_up(numerator, current_sqrt_p, liquidity_after)?
        }
    };

    // rounding artifact: a price of 1 collapses to 0
    if is_exact_input && final_price == U256::ONE {
        return Ok(U256::ZERO);
    }
    Ok(final_price)
}

/// The opposite-side amount for a step. Rounds so the pool keeps the
/// benefit: output to the caller rounds toward zero magnitude, input owed
/// by the caller rounds up.
fn calc_returned_amount(
    liquidity: U256,
    current_sqrt_p: U256,
    next_sqrt_p: U256,
    delta_l: U256,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<I256, MathError> {
    let returned_amount = if is_token0 {
        let reinvest_part = to_signed(mul_div_rounding_up(delta_l, next_sqrt_p, Q96)?)?;
        if is_exact_input {
            // returned = deltaL * nextSqrtP - liquidity * (currentSqrtP - nextSqrtP)
            let diff = current_sqrt_p
                .checked_sub(next_sqrt_p)
                .ok_or(MathError::Underflow)?;
            reinvest_part - to_signed(mul_div(liquidity, diff, Q96)?)?
        } else {
            // returned = deltaL * nextSqrtP + liquidity * (nextSqrtP - currentSqrtP)
            let diff = next_sqrt_p
                .checked_sub(current_sqrt_p)
                .ok_or(MathError::Underflow)?;
            reinvest_part + to_signed(mul_div_rounding_up(liquidity, diff, Q96)?)?
        }
    } else {
        // returned = (liquidity + deltaL) / nextSqrtP - liquidity / currentSqrtP
        let liquidity_after = liquidity.checked_add(delta_l).ok_or(MathError::Overflow)?;
        let after = to_signed(mul_div_rounding_up(liquidity_after, Q96, next_sqrt_p)?)?;
        let before = to_signed(mul_div_rounding_up(liquidity, Q96, current_sqrt_p)?)?;
        after - before
    };

    // rounding artifact mirror of calc_final_price
    if is_exact_input && returned_amount == I256::ONE {
        return Ok(I256::ZERO);
    }
    Ok(returned_amount)
}
