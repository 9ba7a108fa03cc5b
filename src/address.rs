use crate::entities::token::Token;
use crate::error::CurrencyError;
use crate::fee::FeeAmount;
use alloy_primitives::{address, b256, keccak256, Address, B256, U256};

/// The factory this deployment's pools are derived from.
pub const FACTORY_ADDRESS: Address = address!("0xdEd9a1b7C954f0B2A431e9E0C1DaB3C24605A4e9");

/// Hash of the pool creation code, fixed per deployment.
pub const POOL_INIT_CODE_HASH: B256 =
    b256!("0xe34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54");

/// Derives the CREATE2 address of the pool for a token pair and fee tier.
///
/// `init_code_hash_override` substitutes [`POOL_INIT_CODE_HASH`] for forks
/// deployed with different creation code.
pub fn compute_pool_address(
    factory: Address,
    token_a: &Token,
    token_b: &Token,
    fee: FeeAmount,
    init_code_hash_override: Option<B256>,
) -> Result<Address, CurrencyError> {
    let (token0, token1) = if token_a.sorts_before(token_b)? {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    // abi.encode(token0, token1, fee): three left-padded 32-byte words
    let mut salt_preimage = [0u8; 96];
    salt_preimage[12..32].copy_from_slice(token0.address().as_slice());
    salt_preimage[44..64].copy_from_slice(token1.address().as_slice());
    salt_preimage[64..96].copy_from_slice(&U256::from(fee.units()).to_be_bytes::<32>());
    let salt = keccak256(salt_preimage);

    let init_code_hash = init_code_hash_override.unwrap_or(POOL_INIT_CODE_HASH);
    Ok(factory.create2(salt, init_code_hash))
}
