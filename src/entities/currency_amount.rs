use crate::entities::token::Token;
use alloy_primitives::U256;

/// A raw token quantity tagged with the token it is denominated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    currency: Token,
    quotient: U256,
}

impl CurrencyAmount {
    pub fn from_raw_amount(currency: Token, quotient: U256) -> Self {
        Self { currency, quotient }
    }

    pub fn currency(&self) -> &Token {
        &self.currency
    }

    pub fn quotient(&self) -> U256 {
        self.quotient
    }
}
