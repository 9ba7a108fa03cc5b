use crate::error::TickListError;
use crate::hash::FastMap;
use crate::math::tick_math::{MAX_TICK, MIN_TICK};
use alloy_primitives::{I256, U256};

/// An externally supplied initialized tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub index: i32,
    /// Total liquidity referencing this tick; only used for reporting.
    pub liquidity_gross: U256,
    /// Net change in active liquidity when the tick is crossed upward.
    pub liquidity_net: I256,
}

/// Per-index liquidity record, keyed by tick index in the pool's mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickData {
    pub liquidity_gross: U256,
    pub liquidity_net: I256,
}

/// Per-index navigation record of the doubly-linked initialized tick set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedListData {
    pub previous: i32,
    pub next: i32,
}

/// A validated, ordered set of initialized ticks.
///
/// Construction enforces the pool invariants: positive spacing, every index
/// a multiple of the spacing, net liquidity summing to zero, and strictly
/// ascending indices.
#[derive(Debug, Clone, Default)]
pub struct TickList {
    ticks: Vec<Tick>,
}

impl TickList {
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self, TickListError> {
        if tick_spacing <= 0 {
            return Err(TickListError::ZeroTickSpacing);
        }
        for tick in &ticks {
            if tick.index % tick_spacing != 0 {
                return Err(TickListError::InvalidTickSpacing);
            }
        }

        let mut net_sum = I256::ZERO;
        for tick in &ticks {
            net_sum += tick.liquidity_net;
        }
        if !net_sum.is_zero() {
            return Err(TickListError::ZeroNet);
        }

        if ticks.windows(2).any(|pair| pair[0].index >= pair[1].index) {
            return Err(TickListError::Unsorted);
        }

        Ok(Self { ticks })
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// The greatest initialized tick index at or below `tick`, falling back
    /// to MIN_TICK when `tick` precedes every initialized tick (or the list
    /// is empty).
    pub fn nearest_current_tick(&self, tick: i32) -> i32 {
        match self.search_le(tick) {
            Some(position) => self.ticks[position].index,
            None => MIN_TICK,
        }
    }

    /// Materializes the per-index data mapping and the linked-list
    /// navigation mapping the swap driver traverses.
    ///
    /// The MIN_TICK and MAX_TICK sentinels are always present; every
    /// supplied tick is threaded between them in order.
    pub fn build_maps(&self) -> (FastMap<i32, TickData>, FastMap<i32, LinkedListData>) {
        let mut tick_data = FastMap::default();
        let mut initialized_ticks = FastMap::default();

        initialized_ticks.insert(
            MIN_TICK,
            LinkedListData {
                previous: MIN_TICK,
                next: MAX_TICK,
            },
        );
        initialized_ticks.insert(
            MAX_TICK,
            LinkedListData {
                previous: MIN_TICK,
                next: MAX_TICK,
            },
        );

        let mut previous = MIN_TICK;
        for (position, tick) in self.ticks.iter().enumerate() {
            tick_data.insert(
                tick.index,
                TickData {
                    liquidity_gross: tick.liquidity_gross,
                    liquidity_net: tick.liquidity_net,
                },
            );

            let next = self
                .ticks
                .get(position + 1)
                .map_or(MAX_TICK, |following| following.index);
            initialized_ticks.insert(tick.index, LinkedListData { previous, next });
            previous = tick.index;
        }

        // rethread the sentinels around the occupied range; a tick sitting
        // exactly on a sentinel index already wrote its own entry above
        if let Some(first) = self.ticks.first() {
            if first.index != MIN_TICK {
                if let Some(entry) = initialized_ticks.get_mut(&MIN_TICK) {
                    entry.next = first.index;
                }
            }
        }
        if let Some(last) = self.ticks.last() {
            if last.index != MAX_TICK {
                if let Some(entry) = initialized_ticks.get_mut(&MAX_TICK) {
                    entry.previous = last.index;
                }
            }
        }

        (tick_data, initialized_ticks)
    }

    // binary search for the position of the largest index <= tick
    fn search_le(&self, tick: i32) -> Option<usize> {
        if self.ticks.is_empty() || tick < self.ticks[0].index {
            return None;
        }

        let mut start = 0usize;
        let mut end = self.ticks.len();
        while start < end {
            let mid = (start + end) / 2;
            if self.ticks[mid].index <= tick {
                start = mid + 1;
            } else {
                end = mid;
            }
        }
        Some(start - 1)
    }
}
