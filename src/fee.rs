use alloy_primitives::U256;

/// Fee charged on every swap, denominated in hundredths of a basis point
/// (a fee of 1000 is 1%).
pub const FEE_UNITS: U256 = U256::from_limbs([100_000, 0, 0, 0]);
pub const TWO_FEE_UNITS: U256 = U256::from_limbs([200_000, 0, 0, 0]);

/// Sentinel cap; pools reject any tier at or above it.
pub const FEE_MAX: u32 = 100_000;

/// The factory-enabled fee tiers, in hundredths of a basis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FeeAmount {
    Fee0008 = 8,
    Fee001 = 10,
    Fee002 = 20,
    Fee004 = 40,
    Fee01 = 100,
    Fee025 = 250,
    Fee03 = 300,
    Fee1 = 1000,
    Fee2 = 2000,
    Fee5 = 5000,
    /// Sentinel equal to [`FEE_MAX`]; pool construction rejects it.
    FeeMax = 100_000,
}

impl FeeAmount {
    /// Fee value in hundredths of a basis point.
    pub const fn units(self) -> u32 {
        self as u32
    }

    /// The factory tick spacing for this tier. The `FeeMax` sentinel has no
    /// spacing; pools reject it before the spacing is ever consulted.
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeAmount::Fee0008 => 1,
            FeeAmount::Fee001 => 1,
            FeeAmount::Fee002 => 2,
            FeeAmount::Fee004 => 8,
            FeeAmount::Fee01 => 10,
            FeeAmount::Fee025 => 25,
            FeeAmount::Fee03 => 60,
            FeeAmount::Fee1 => 200,
            FeeAmount::Fee2 => 100,
            FeeAmount::Fee5 => 100,
            FeeAmount::FeeMax => 0,
        }
    }
}
