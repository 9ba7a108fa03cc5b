use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("math error - overflow")]
    Overflow,
    #[error("math error - underflow")]
    Underflow,
    #[error("math error - division by zero")]
    DivisionByZero,
    #[error("math error - requested amount exceeds pool reserves")]
    InsufficientReserves,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TickMathError {
    #[error("tick math error - tick outside supported range")]
    TickOutOfRange,
    #[error("tick math error - sqrt ratio outside supported range")]
    SqrtRatioOutOfRange,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TickListError {
    #[error("tick list error - tick spacing must be greater than 0")]
    ZeroTickSpacing,
    #[error("tick list error - tick index is not a multiple of the tick spacing")]
    InvalidTickSpacing,
    #[error("tick list error - net liquidity deltas must sum to zero")]
    ZeroNet,
    #[error("tick list error - ticks must be sorted by index")]
    Unsorted,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("currency error - tokens share the same address")]
    SameAddress,
    #[error("currency error - tokens are on different chains")]
    DifferentChain,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool error - fee too high")]
    FeeTooHigh,
    #[error("pool error - invalid sqrtRatioX96")]
    InvalidSqrtRatioX96,
    #[error("pool error - token not involved in pool")]
    TokenNotInvolved,
    #[error("pool error - bad limitSqrtP")]
    BadLimitSqrtP,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    TickMath(#[from] TickMathError),

    #[error(transparent)]
    TickList(#[from] TickListError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}
