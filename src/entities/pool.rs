use crate::entities::currency_amount::CurrencyAmount;
use crate::entities::price::Price;
use crate::entities::tick_list::{LinkedListData, TickData, TickList};
use crate::entities::token::Token;
use crate::error::{Error, MathError, PoolError};
use crate::fee::{FeeAmount, FEE_MAX};
use crate::hash::FastMap;
use crate::math::full_math::widen;
use crate::math::liquidity_math::apply_liquidity_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::{MAX_TICK_DISTANCE, Q192};
use alloy_primitives::{I256, U256};

// running state of one swap invocation
struct SwapData {
    // the remaining specified amount (input or output side)
    specified_amount: I256,
    // the accumulated opposite-side amount
    returned_amount: I256,
    // current sqrt(price), Q64.96
    sqrt_p: U256,
    // the tick associated with the current price
    current_tick: i32,
    // the next initialized tick in the swap direction
    next_tick: i32,
    // sqrt price of the (possibly distance-capped) next tick
    next_sqrt_p: U256,
    // cached base pool liquidity, without reinvestment
    base_l: U256,
    // cached reinvestment liquidity
    reinvest_l: U256,
    // sqrt price at the start of the current iteration
    start_sqrt_p: U256,
}

// what the driver loop hands back for snapshot packaging
struct SwapOutcome {
    returned_amount: I256,
    base_l: U256,
    reinvest_l: U256,
    sqrt_p: U256,
    current_tick: i32,
    next_tick: i32,
}

/// An immutable snapshot of a concentrated-liquidity pool with reinvested
/// fee liquidity.
///
/// Swaps never mutate the snapshot they run against; the quote entry points
/// return the post-swap pool alongside the quoted amount and the caller
/// decides whether to adopt it.
#[derive(Debug, Clone)]
pub struct Pool {
    token0: Token,
    token1: Token,
    fee: FeeAmount,
    sqrt_p: U256,
    base_l: U256,
    reinvest_l: U256,
    current_tick: i32,
    nearest_current_tick: i32,
    ticks: FastMap<i32, TickData>,
    initialized_ticks: FastMap<i32, LinkedListData>,
}

impl Pool {
    /// Builds a validated pool snapshot.
    ///
    /// Tokens are stored sorted; `sqrt_ratio_x96` must lie within the price
    /// bracket of `current_tick`; `tick_list` is the validated initialized
    /// tick set (or `None` for a pool with no initialized ticks).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        base_l: U256,
        reinvest_l: U256,
        current_tick: i32,
        tick_list: Option<&TickList>,
    ) -> Result<Self, Error> {
        if fee.units() >= FEE_MAX {
            return Err(PoolError::FeeTooHigh.into());
        }

        let a_first = token_a.sorts_before(&token_b)?;
        let (token0, token1) = if a_first {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let bracket_lower = get_sqrt_ratio_at_tick(current_tick)?;
        let bracket_upper = get_sqrt_ratio_at_tick(current_tick + 1)?;
        if sqrt_ratio_x96 < bracket_lower || sqrt_ratio_x96 > bracket_upper {
            return Err(PoolError::InvalidSqrtRatioX96.into());
        }

        let (nearest_current_tick, ticks, initialized_ticks) = match tick_list {
            Some(list) => {
                let (data, nav) = list.build_maps();
                (list.nearest_current_tick(current_tick), data, nav)
            }
            None => {
                let (data, nav) = TickList::default().build_maps();
                (MIN_TICK, data, nav)
            }
        };

        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_p: sqrt_ratio_x96,
            base_l,
            reinvest_l,
            current_tick,
            nearest_current_tick,
            ticks,
            initialized_ticks,
        })
    }

    pub fn token0(&self) -> &Token {
        &self.token0
    }

    pub fn token1(&self) -> &Token {
        &self.token1
    }

    pub fn fee(&self) -> FeeAmount {
        self.fee
    }

    pub fn sqrt_p(&self) -> U256 {
        self.sqrt_p
    }

    pub fn base_l(&self) -> U256 {
        self.base_l
    }

    pub fn reinvest_l(&self) -> U256 {
        self.reinvest_l
    }

    pub fn current_tick(&self) -> i32 {
        self.current_tick
    }

    pub fn nearest_current_tick(&self) -> i32 {
        self.nearest_current_tick
    }

    /// Whether the token is one of the pool's pair.
    pub fn involves_token(&self, token: &Token) -> bool {
        token == &self.token0 || token == &self.token1
    }

    /// The chain both tokens live on.
    pub fn chain_id(&self) -> u64 {
        self.token0.chain_id()
    }

    /// Mid price of token0 denominated in token1: `sqrt_p^2 / 2^192`.
    pub fn token0_price(&self) -> Price {
        Price::new(
            self.token0.clone(),
            self.token1.clone(),
            widen(Q192),
            widen(self.sqrt_p) * widen(self.sqrt_p),
        )
    }

    /// Mid price of token1 denominated in token0: `2^192 / sqrt_p^2`.
    pub fn token1_price(&self) -> Price {
        Price::new(
            self.token1.clone(),
            self.token0.clone(),
            widen(self.sqrt_p) * widen(self.sqrt_p),
            widen(Q192),
        )
    }

    /// The mid price of `token` in terms of the other token of the pair.
    pub fn price_of(&self, token: &Token) -> Result<Price, Error> {
        if !self.involves_token(token) {
            return Err(PoolError::TokenNotInvolved.into());
        }
        Ok(if token == &self.token0 {
            self.token0_price()
        } else {
            self.token1_price()
        })
    }

    /// Quotes the output for an exact input amount and returns the post-swap
    /// pool snapshot.
    pub fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
        limit_sqrt_p: Option<U256>,
    ) -> Result<(CurrencyAmount, Pool), Error> {
        if !self.involves_token(input_amount.currency()) {
            return Err(PoolError::TokenNotInvolved.into());
        }

        let zero_for_one = input_amount.currency() == &self.token0;
        let specified =
            I256::try_from(input_amount.quotient()).map_err(|_| MathError::Overflow)?;
        let outcome = self.swap(zero_for_one, specified, limit_sqrt_p)?;

        let output_token = if zero_for_one {
            self.token1.clone()
        } else {
            self.token0.clone()
        };
        // the driver reports output as a negative returned amount
        let output = CurrencyAmount::from_raw_amount(
            output_token,
            (-outcome.returned_amount).unsigned_abs(),
        );
        let new_pool = self.update_pool_data(&outcome);

        Ok((output, new_pool))
    }

    /// Quotes the input required for an exact output amount and returns the
    /// post-swap pool snapshot.
    pub fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
        limit_sqrt_p: Option<U256>,
    ) -> Result<(CurrencyAmount, Pool), Error> {
        if !self.involves_token(output_amount.currency()) {
            return Err(PoolError::TokenNotInvolved.into());
        }

        let zero_for_one = output_amount.currency() == &self.token1;
        let specified =
            -I256::try_from(output_amount.quotient()).map_err(|_| MathError::Overflow)?;
        let outcome = self.swap(zero_for_one, specified, limit_sqrt_p)?;

        let input_token = if zero_for_one {
            self.token0.clone()
        } else {
            self.token1.clone()
        };
        let input =
            CurrencyAmount::from_raw_amount(input_token, outcome.returned_amount.unsigned_abs());
        let new_pool = self.update_pool_data(&outcome);

        Ok((input, new_pool))
    }

    // navigation helpers over the initialized-tick chain; the sentinels are
    // always present, so the fallbacks only matter for corrupted maps
    fn next_initialized(&self, tick: i32) -> i32 {
        self.initialized_ticks
            .get(&tick)
            .map_or(MAX_TICK, |entry| entry.next)
    }

    fn previous_initialized(&self, tick: i32) -> i32 {
        self.initialized_ticks
            .get(&tick)
            .map_or(MIN_TICK, |entry| entry.previous)
    }

    fn get_initial_swap_data(&self, will_up_tick: bool) -> SwapData {
        let next_tick = if will_up_tick {
            self.next_initialized(self.nearest_current_tick)
        } else {
            self.nearest_current_tick
        };

        SwapData {
            specified_amount: I256::ZERO,
            returned_amount: I256::ZERO,
            sqrt_p: self.sqrt_p,
            current_tick: self.current_tick,
            next_tick,
            next_sqrt_p: U256::ZERO,
            base_l: self.base_l,
            reinvest_l: self.reinvest_l,
            start_sqrt_p: U256::ZERO,
        }
    }

    fn swap(
        &self,
        is_token0: bool,
        swap_qty: I256,
        limit_sqrt_p: Option<U256>,
    ) -> Result<SwapOutcome, Error> {
        let is_exact_input = swap_qty.is_positive();
        let will_up_tick = is_exact_input != is_token0;

        let mut swap_data = self.get_initial_swap_data(will_up_tick);
        swap_data.specified_amount = swap_qty;

        // default bounds cover callers that do not care about a limit
        let limit_sqrt_p = match limit_sqrt_p {
            Some(limit) => limit,
            None if will_up_tick => MAX_SQRT_RATIO - U256::ONE,
            None => MIN_SQRT_RATIO + U256::ONE,
        };

        if will_up_tick {
            if limit_sqrt_p < self.sqrt_p || limit_sqrt_p > MAX_SQRT_RATIO {
                return Err(PoolError::BadLimitSqrtP.into());
            }
        } else if limit_sqrt_p > self.sqrt_p || limit_sqrt_p < MIN_SQRT_RATIO {
            return Err(PoolError::BadLimitSqrtP.into());
        }

        while !swap_data.specified_amount.is_zero() && swap_data.sqrt_p != limit_sqrt_p {
            // the kernel's overflow analysis assumes the per-step price diff
            // is capped to ~5%, while the gap between initialized ticks is
            // not; the distance cap restores that assumption
            let mut temp_next_tick = swap_data.next_tick;
            if will_up_tick && temp_next_tick > swap_data.current_tick + MAX_TICK_DISTANCE {
                temp_next_tick = swap_data.current_tick + MAX_TICK_DISTANCE;
            } else if !will_up_tick && temp_next_tick < swap_data.current_tick - MAX_TICK_DISTANCE {
                temp_next_tick = swap_data.current_tick - MAX_TICK_DISTANCE;
            }

            swap_data.start_sqrt_p = swap_data.sqrt_p;
            swap_data.next_sqrt_p = get_sqrt_ratio_at_tick(temp_next_tick)?;

            // the step must not overshoot the caller's limit
            let target_sqrt_p = if will_up_tick == (swap_data.next_sqrt_p > limit_sqrt_p) {
                limit_sqrt_p
            } else {
                swap_data.next_sqrt_p
            };

            let total_liquidity = swap_data
                .base_l
                .checked_add(swap_data.reinvest_l)
                .ok_or(MathError::Overflow)?;
            let step = compute_swap_step(
                total_liquidity,
                swap_data.sqrt_p,
                target_sqrt_p,
                self.fee,
                swap_data.specified_amount,
                is_exact_input,
                is_token0,
            )?;

            swap_data.specified_amount -= step.used_amount;
            swap_data.returned_amount += step.returned_amount;
            swap_data.reinvest_l = swap_data
                .reinvest_l
                .checked_add(step.delta_l)
                .ok_or(MathError::Overflow)?;
            swap_data.sqrt_p = step.next_sqrt_p;

            if swap_data.sqrt_p != swap_data.next_sqrt_p {
                // limit hit or budget exhausted short of the tick
                if swap_data.sqrt_p != swap_data.start_sqrt_p {
                    swap_data.current_tick = get_tick_at_sqrt_ratio(swap_data.sqrt_p)?;
                }
                break;
            }

            swap_data.current_tick = if will_up_tick {
                temp_next_tick
            } else {
                temp_next_tick - 1
            };

            // the cap was hit short of a real initialized tick: keep going
            // without touching liquidity
            if temp_next_tick != swap_data.next_tick {
                continue;
            }

            let (base_l, next_tick) =
                self.update_liquidity_and_cross_tick(swap_data.next_tick, swap_data.base_l, will_up_tick)?;
            swap_data.base_l = base_l;
            swap_data.next_tick = next_tick;
        }

        Ok(SwapOutcome {
            returned_amount: swap_data.returned_amount,
            base_l: swap_data.base_l,
            reinvest_l: swap_data.reinvest_l,
            sqrt_p: swap_data.sqrt_p,
            current_tick: swap_data.current_tick,
            next_tick: swap_data.next_tick,
        })
    }

    fn update_liquidity_and_cross_tick(
        &self,
        next_tick: i32,
        current_liquidity: U256,
        will_up_tick: bool,
    ) -> Result<(U256, i32), Error> {
        let mut liquidity_net = self
            .ticks
            .get(&next_tick)
            .map_or(I256::ZERO, |data| data.liquidity_net);

        let new_next_tick = if will_up_tick {
            self.next_initialized(next_tick)
        } else {
            liquidity_net = -liquidity_net;
            self.previous_initialized(next_tick)
        };

        let new_liquidity = apply_liquidity_delta(
            current_liquidity,
            liquidity_net.unsigned_abs(),
            !liquidity_net.is_negative(),
        )?;

        Ok((new_liquidity, new_next_tick))
    }

    // packages the loop's final state as a fresh snapshot; the on-chain
    // counterpart mutates storage here instead
    fn update_pool_data(&self, outcome: &SwapOutcome) -> Pool {
        let nearest_current_tick = if outcome.next_tick > outcome.current_tick {
            self.previous_initialized(outcome.next_tick)
        } else {
            outcome.next_tick
        };

        Pool {
            token0: self.token0.clone(),
            token1: self.token1.clone(),
            fee: self.fee,
            sqrt_p: outcome.sqrt_p,
            base_l: outcome.base_l,
            reinvest_l: outcome.reinvest_l,
            current_tick: outcome.current_tick,
            nearest_current_tick,
            ticks: self.ticks.clone(),
            initialized_ticks: self.initialized_ticks.clone(),
        }
    }
}
