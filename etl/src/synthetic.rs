//! Synthetic delivery dates.
//!
//! The source export carries no ground-truth delivery date, so one is filled in
//! per order as `order_date + U` with `U` drawn uniformly from
//! `MIN_DELIVERY_DAYS..=MAX_DELIVERY_DAYS`. The stream is seeded, so the same
//! rows and seed always give the same dates.

use crate::models::OrderLine;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::info;

pub const MIN_DELIVERY_DAYS: i64 = 2;
pub const MAX_DELIVERY_DAYS: i64 = 7;

/// Offsets in days, one per position.
pub fn delivery_offsets(count: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| rng.random_range(MIN_DELIVERY_DAYS..=MAX_DELIVERY_DAYS))
        .collect()
}

/// Fills every missing delivery date and returns how many lines were filled.
///
/// All lines of one order get the same date. A date given on any line of the
/// order is reused; otherwise the order's offset is applied. One offset is
/// drawn per distinct order in order of first appearance, so an order's
/// synthetic date does not depend on which other orders carried a date.
pub fn synthesize_delivery_dates(lines: &mut [OrderLine], seed: u64) -> usize {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut given: HashMap<String, NaiveDate> = HashMap::new();
    for line in lines.iter() {
        let next = slots.len();
        slots.entry(line.order_id.clone()).or_insert(next);
        if let Some(date) = line.delivery_date {
            given.entry(line.order_id.clone()).or_insert(date);
        }
    }

    let offsets = delivery_offsets(slots.len(), seed);
    let mut filled = 0;

    for line in lines.iter_mut().filter(|l| l.delivery_date.is_none()) {
        let date = match given.get(&line.order_id) {
            Some(date) => *date,
            None => {
                let offset = slots
                    .get(&line.order_id)
                    .and_then(|&slot| offsets.get(slot))
                    .copied()
                    .unwrap_or(MIN_DELIVERY_DAYS);
                line.order_date + Duration::days(offset)
            }
        };
        line.delivery_date = Some(date);
        filled += 1;
    }

    info!(seed, orders = slots.len(), filled, "Synthesized delivery dates");
    filled
}
