use crate::error::TickMathError;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// sqrt ratio at MIN_TICK, the smallest value `get_sqrt_ratio_at_tick` can return.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// sqrt ratio at MAX_TICK, the largest value `get_sqrt_ratio_at_tick` can return.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

// Q128.128 multipliers for sqrt(1.0001^-(2^(k+1))), k = 0..=18; bit 0 is
// seeded from SQRT_RATIO_NEG_1 before the loop starts.
const SQRT_RATIO_NEG_1: U256 = U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0]);
const ONE_X128: U256 = U256::from_limbs([0, 0, 1, 0]);

const TICK_MULTIPLIERS: [[u64; 2]; 19] = [
    [6459403834229662010, 18444899583751176498],
    [17226890335427755468, 18443055278223354162],
    [2032852871939366096, 18439367220385604838],
    [14545316742740207172, 18431993317065449817],
    [5129152022828963008, 18417254355718160513],
    [4894419605888772193, 18387811781193591352],
    [1280255884321894483, 18329067761203520168],
    [15924666964335305636, 18212142134806087854],
    [8010504389359918676, 17980523815641551639],
    [10668036004952895731, 17526086738831147013],
    [4878133418470705625, 16651378430235024244],
    [9537173718739605541, 15030750278693429944],
    [9972618978014552549, 12247334978882834399],
    [10428997489610666743, 8131365268884726200],
    [9305304367709015974, 3584323654723342297],
    [14301143598189091785, 696457651847595233],
    [7393154844743099908, 26294789957452057],
    [2209338891292245656, 37481735321082],
    [10518117631919034274, 76158723],
];

/// Returns the Q64.96 sqrt price at a tick index, i.e.
/// `floor(sqrt(1.0001^tick) * 2^96)`, for ticks in `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, TickMathError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK as u32 {
        return Err(TickMathError::TickOutOfRange);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        SQRT_RATIO_NEG_1
    } else {
        ONE_X128
    };

    for (k, limbs) in TICK_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (2u32 << k) != 0 {
            ratio = ratio.wrapping_mul(U256::from_limbs([limbs[0], limbs[1], 0, 0])) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result round-trips through
    // get_tick_at_sqrt_ratio
    let cut_off = (ratio.as_limbs()[0] & 0xFFFF_FFFF) != 0;
    Ok((ratio >> 32) + U256::from(cut_off as u64))
}

/// Returns the unique tick `t` with
/// `get_sqrt_ratio_at_tick(t) <= sqrt_p < get_sqrt_ratio_at_tick(t + 1)`,
/// for sqrt prices in `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn get_tick_at_sqrt_ratio(sqrt_p_x96: U256) -> Result<i32, TickMathError> {
    if sqrt_p_x96 < MIN_SQRT_RATIO || sqrt_p_x96 >= MAX_SQRT_RATIO {
        return Err(TickMathError::SqrtRatioOutOfRange);
    }

    // move to Q128.128 and normalize the mantissa to [2^127, 2^128)
    let ratio = sqrt_p_x96 << 32usize;
    let msb = (ratio.bit_len() - 1) as u32;

    let mut r = if msb >= 128 {
        ratio >> (msb - 127) as usize
    } else {
        ratio << (127 - msb) as usize
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u64))) << 64;

    for shift in (50..=63).rev() {
        r = r.wrapping_mul(r) >> 127;
        let f = (r >> 128usize).to::<u64>();
        log_2 |= I256::from_raw(U256::from(f) << shift);
        r >>= f as usize;
    }

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = ((log_sqrt10001 - TICK_LOW) >> 128usize).low_i32();
    let tick_high = ((log_sqrt10001 + TICK_HIGH) >> 128usize).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_p_x96 {
        tick_high
    } else {
        tick_low
    })
}

/// Rounds a tick to the nearest initializable index for the given spacing,
/// clamped so the result stays inside `[MIN_TICK, MAX_TICK]`.
///
/// Spacing must be positive; the fee-tier table only hands out positive
/// spacings.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> i32 {
    let mut rounded = (2 * tick + tick_spacing).div_euclid(2 * tick_spacing) * tick_spacing;
    if rounded < MIN_TICK {
        rounded += tick_spacing;
    } else if rounded > MAX_TICK {
        rounded -= tick_spacing;
    }
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sqrt_ratio_rejects_out_of_range_ticks() {
        assert!(matches!(
            get_sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(TickMathError::TickOutOfRange)
        ));
        assert!(matches!(
            get_sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(TickMathError::TickOutOfRange)
        ));
    }

    #[test]
    fn sqrt_ratio_at_the_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK).unwrap(), MIN_SQRT_RATIO);
        assert_eq!(
            get_sqrt_ratio_at_tick(MIN_TICK + 1).unwrap(),
            U256::from(4295343490u64)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK - 1).unwrap(),
            U256::from_str("1461373636630004318706518188784493106690254656249").unwrap()
        );
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK).unwrap(), MAX_SQRT_RATIO);
    }

    #[test]
    fn sqrt_ratio_matches_contract_values() {
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), crate::Q96);
        assert_eq!(
            get_sqrt_ratio_at_tick(50).unwrap(),
            U256::from(79426470787362580746886972461u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(100).unwrap(),
            U256::from(79625275426524748796330556128u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(250).unwrap(),
            U256::from(80224679980005306637834519095u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(1000).unwrap(),
            U256::from(83290069058676223003182343270u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(5000).unwrap(),
            U256::from(101729702841318637793976746270u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(50000).unwrap(),
            U256::from(965075977353221155028623082916u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(250000).unwrap(),
            U256::from(21246587762933397357449903968194344u128)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(500000).unwrap(),
            U256::from_str("5697689776495288729098254600827762987878").unwrap()
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(738203).unwrap(),
            U256::from_str("847134979253254120489401328389043031315994541").unwrap()
        );
    }

    #[test]
    fn tick_at_sqrt_ratio_rejects_out_of_range() {
        assert!(matches!(
            get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - U256::ONE),
            Err(TickMathError::SqrtRatioOutOfRange)
        ));
        // the max ratio itself is exclusive
        assert!(matches!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO),
            Err(TickMathError::SqrtRatioOutOfRange)
        ));
    }

    #[test]
    fn tick_at_sqrt_ratio_at_the_bounds() {
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO).unwrap(), MIN_TICK);
        assert_eq!(
            get_tick_at_sqrt_ratio(U256::from(4295343490u64)).unwrap(),
            MIN_TICK + 1
        );
        assert_eq!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO - U256::ONE).unwrap(),
            MAX_TICK - 1
        );
    }

    #[test]
    fn tick_and_sqrt_ratio_invert_with_bracketing() {
        for tick in [-500000, -120000, -50, 0, 1, 63, 10000, 333333, 800000] {
            let ratio = get_sqrt_ratio_at_tick(tick).unwrap();
            let recovered = get_tick_at_sqrt_ratio(ratio).unwrap();
            assert_eq!(recovered, tick, "tick {tick} did not round-trip");

            // any ratio strictly inside the bracket maps back to the same tick
            let inside = ratio + U256::ONE;
            if inside < get_sqrt_ratio_at_tick(tick + 1).unwrap() {
                assert_eq!(get_tick_at_sqrt_ratio(inside).unwrap(), tick);
            }
        }
    }

    #[test]
    fn nearest_usable_tick_rounds_to_spacing() {
        assert_eq!(nearest_usable_tick(0, 8), 0);
        assert_eq!(nearest_usable_tick(3, 8), 0);
        assert_eq!(nearest_usable_tick(4, 8), 8);
        assert_eq!(nearest_usable_tick(-3, 8), 0);
        assert_eq!(nearest_usable_tick(-5, 8), -8);
        assert_eq!(nearest_usable_tick(83, 60), 60);
        assert_eq!(nearest_usable_tick(-83, 60), -60);
    }

    #[test]
    fn nearest_usable_tick_clamps_at_the_range_ends() {
        assert_eq!(nearest_usable_tick(MIN_TICK, 8), MIN_TICK);
        assert_eq!(nearest_usable_tick(MAX_TICK, 8), MAX_TICK);
        // -887272 / 60 rounds past the bound, so the clamp pulls it back in
        assert_eq!(nearest_usable_tick(MIN_TICK, 60), -887220);
        assert_eq!(nearest_usable_tick(MAX_TICK, 60), 887220);
        assert_eq!(nearest_usable_tick(MIN_TICK, 1), MIN_TICK);
        assert_eq!(nearest_usable_tick(MAX_TICK, 1), MAX_TICK);
    }
}
