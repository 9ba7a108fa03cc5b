use crate::entities::token::Token;
use alloy_primitives::aliases::U512;

/// The price of `base` denominated in `quote`, stored as the raw fraction
/// `numerator / denominator`.
///
/// Held in 512 bits because pool prices are derived from the square of a
/// Q64.96 sqrt price, which can exceed 256 bits near the top of the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base: Token,
    quote: Token,
    denominator: U512,
    numerator: U512,
}

impl Price {
    pub fn new(base: Token, quote: Token, denominator: U512, numerator: U512) -> Self {
        Self {
            base,
            quote,
            denominator,
            numerator,
        }
    }

    pub fn base(&self) -> &Token {
        &self.base
    }

    pub fn quote(&self) -> &Token {
        &self.quote
    }

    pub fn numerator(&self) -> U512 {
        self.numerator
    }

    pub fn denominator(&self) -> U512 {
        self.denominator
    }

    /// The reciprocal price, quoting `base` per unit of `quote`.
    pub fn invert(&self) -> Price {
        Price {
            base: self.quote.clone(),
            quote: self.base.clone(),
            denominator: self.numerator,
            numerator: self.denominator,
        }
    }
}
