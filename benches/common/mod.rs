use alloy_primitives::{address, I256, U256};
use criterion::Criterion;
use elastic_swap_math::math::swap_math::compute_swap_step;
use elastic_swap_math::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, nearest_usable_tick, MAX_TICK, MIN_TICK,
};
use elastic_swap_math::{CurrencyAmount, FeeAmount, Pool, Tick, TickList, Token};
use std::hint::black_box;

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn boundary_pool(fee: FeeAmount) -> Pool {
    let usdc = Token::new(
        1,
        address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        6,
        "USDC",
    );
    let dai = Token::new(
        1,
        address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
        18,
        "DAI",
    );

    let spacing = fee.tick_spacing();
    let one_ether = U256::from(ONE_ETHER);
    let ticks = vec![
        Tick {
            index: nearest_usable_tick(MIN_TICK, spacing),
            liquidity_gross: one_ether,
            liquidity_net: I256::try_from(one_ether).unwrap(),
        },
        Tick {
            index: nearest_usable_tick(MAX_TICK, spacing),
            liquidity_gross: one_ether,
            liquidity_net: -I256::try_from(one_ether).unwrap(),
        },
    ];
    let list = TickList::new(ticks, spacing).unwrap();

    Pool::new(
        usdc.clone(),
        dai,
        fee,
        get_sqrt_ratio_at_tick(0).unwrap(),
        one_ether,
        U256::ZERO,
        0,
        Some(&list),
    )
    .unwrap()
}

pub fn bench_tick_math(c: &mut Criterion) {
    c.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in [-800_000, -12_345, -1, 0, 1, 480, 62_160, 800_000] {
                black_box(get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });

    let ratios: Vec<U256> = [-800_000, -12_345, 0, 480, 62_160, 800_000]
        .into_iter()
        .map(|tick| get_sqrt_ratio_at_tick(tick).unwrap())
        .collect();
    c.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| {
            for ratio in &ratios {
                black_box(get_tick_at_sqrt_ratio(black_box(*ratio)).unwrap());
            }
        })
    });
}

pub fn bench_swap_step(c: &mut Criterion) {
    let liquidity = U256::from(ONE_ETHER);
    let current = get_sqrt_ratio_at_tick(0).unwrap();
    let target = get_sqrt_ratio_at_tick(480).unwrap();

    c.bench_function("compute_swap_step partial", |b| {
        b.iter(|| {
            black_box(
                compute_swap_step(
                    black_box(liquidity),
                    black_box(current),
                    black_box(target),
                    FeeAmount::Fee004,
                    I256::from_raw(U256::from(1_000_000u64)),
                    true,
                    false,
                )
                .unwrap(),
            )
        })
    });

    c.bench_function("compute_swap_step full", |b| {
        b.iter(|| {
            black_box(
                compute_swap_step(
                    black_box(liquidity),
                    black_box(current),
                    black_box(target),
                    FeeAmount::Fee004,
                    I256::from_raw(U256::from(10u64).pow(U256::from(30u64))),
                    true,
                    false,
                )
                .unwrap(),
            )
        })
    });
}

pub fn bench_pool_swap(c: &mut Criterion) {
    let pool = boundary_pool(FeeAmount::Fee004);
    let usdc = pool.token1().clone();

    c.bench_function("pool get_output_amount", |b| {
        b.iter(|| {
            let input = CurrencyAmount::from_raw_amount(usdc.clone(), U256::from(1_000_000u64));
            black_box(pool.get_output_amount(black_box(&input), None).unwrap())
        })
    });
}
