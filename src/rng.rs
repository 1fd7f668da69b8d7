//! Pure random/math helpers shared by the economy and battle engines.
//!
//! Everything here takes `&mut impl Rng` so callers can pass a seeded
//! `StdRng` in tests and `thread_rng()` in production. None of these
//! functions hold state.

use rand::Rng;

/// Integer in `[min, max]` inclusive. Swapped bounds are tolerated.
pub fn rand_int(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Float in `[min, max)`.
pub fn rand_float(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}

/// Boolean with probability `p` in `[0, 1]`.
pub fn chance(rng: &mut impl Rng, p: f64) -> bool {
    if p <= 0.0 {
        return false;
    }
    if p >= 1.0 {
        return true;
    }
    rng.gen::<f64>() < p
}

/// Pick a random element from a slice.
pub fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.gen_range(0..items.len())])
}

/// Pick up to `n` distinct indices-worth of elements, cloned, in random order.
pub fn pick_n<T: Clone>(rng: &mut impl Rng, items: &[T], n: usize) -> Vec<T> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    // Fisher-Yates, stopping once we have enough
    let take = n.min(items.len());
    for i in 0..take {
        let j = rng.gen_range(i..indices.len());
        indices.swap(i, j);
    }
    indices[..take].iter().map(|&i| items[i].clone()).collect()
}

/// Weighted random pick over `(value, weight)` pairs. Zero-weight entries never
/// win unless every weight is zero, in which case the first entry is returned.
pub fn weighted_pick<'a, T>(rng: &mut impl Rng, items: &'a [(T, u32)]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let total: u64 = items.iter().map(|(_, w)| *w as u64).sum();
    if total == 0 {
        return Some(&items[0].0);
    }
    let mut roll = rng.gen_range(0..total) as i64;
    for (value, weight) in items {
        roll -= *weight as i64;
        if roll < 0 {
            return Some(value);
        }
    }
    Some(&items[items.len() - 1].0)
}

/// Apply a `±variance` fractional swing to `value`, rounded, floored at 1.
///
/// `apply_variance(rng, 100, 0.15)` lands anywhere in roughly `[85, 115]`.
pub fn apply_variance(rng: &mut impl Rng, value: i64, variance: f64) -> i64 {
    let factor = 1.0 + rand_float(rng, -variance, variance);
    ((value as f64 * factor).round() as i64).max(1)
}

/// Clamp a float between `min` and `max`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Direction of a price relative to its baseline, with a ±3% dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

pub fn trend(current: i64, base: i64) -> Trend {
    if base <= 0 {
        return Trend::Flat;
    }
    let delta = (current - base) as f64 / base as f64;
    if delta > 0.03 {
        Trend::Rising
    } else if delta < -0.03 {
        Trend::Falling
    } else {
        Trend::Flat
    }
}
