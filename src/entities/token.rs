use crate::error::CurrencyError;
use alloy_primitives::Address;

/// A token identified by chain and contract address, with display metadata.
///
/// Equality and ordering only look at the chain id and address; decimals and
/// symbol are carried for consumers but never influence pool math.
#[derive(Debug, Clone)]
pub struct Token {
    chain_id: u64,
    address: Address,
    decimals: u8,
    symbol: String,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.into(),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether this token sorts before `other` under the canonical
    /// by-address ordering pools use for their token0/token1 slots.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, CurrencyError> {
        if self.chain_id != other.chain_id {
            return Err(CurrencyError::DifferentChain);
        }
        if self.address == other.address {
            return Err(CurrencyError::SameAddress);
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}
