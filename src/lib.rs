use alloy_primitives::U256;

pub mod address;
pub mod entities;
pub mod error;
pub mod fee;
mod hash;
pub mod math;

pub use entities::currency_amount::CurrencyAmount;
pub use entities::pool::Pool;
pub use entities::tick_list::{Tick, TickList};
pub use entities::token::Token;
pub use fee::FeeAmount;
pub use hash::FastMap;

pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Hard cap on how many ticks a single swap step may travel. Keeps the
/// per-step price excursion inside the ~5% envelope the kernel's overflow
/// analysis assumes.
pub const MAX_TICK_DISTANCE: i32 = 480;
