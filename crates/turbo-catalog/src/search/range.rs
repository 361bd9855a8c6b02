//! Price range filtering over a price-ordered sequence.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Product;
use crate::search::sort::quick_sort;

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Lowest accepted price.
    pub min: f64,
    /// Highest accepted price.
    pub max: f64,
}

impl PriceBounds {
    /// Build bounds from optional user input.
    ///
    /// A missing or non-finite minimum becomes 0; a missing or NaN maximum
    /// becomes +infinity.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let min = match min {
            Some(value) if value.is_finite() => value,
            Some(value) => {
                warn!(min = value, "ignoring invalid minimum price");
                0.0
            }
            None => 0.0,
        };
        let max = match max {
            Some(value) if value.is_nan() => {
                warn!("ignoring NaN maximum price");
                f64::INFINITY
            }
            Some(value) => value,
            None => f64::INFINITY,
        };
        Self { min, max }
    }

    /// Check if a price lies within the bounds.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Index of the first product priced at or above `min`.
pub fn lower_bound(sorted: &[&Product], min: f64) -> Option<usize> {
    let index = sorted.partition_point(|p| p.price < min);
    (index < sorted.len()).then_some(index)
}

/// Index of the last product priced at or below `max`.
pub fn upper_bound(sorted: &[&Product], max: f64) -> Option<usize> {
    let index = sorted.partition_point(|p| p.price <= max);
    index.checked_sub(1)
}

/// Slice of an ascending price-ordered sequence that lies within `bounds`.
pub fn slice_price_range<'s, 'a>(
    sorted: &'s [&'a Product],
    bounds: PriceBounds,
) -> &'s [&'a Product] {
    match (lower_bound(sorted, bounds.min), upper_bound(sorted, bounds.max)) {
        (Some(lower), Some(upper)) if lower <= upper => &sorted[lower..=upper],
        _ => &[],
    }
}

/// Sort candidates by price and keep those within `bounds`.
///
/// The result is in ascending price order.
pub fn filter_price_range<'a>(candidates: &[&'a Product], bounds: PriceBounds) -> Vec<&'a Product> {
    let sorted = quick_sort(candidates, |a, b| a.price.total_cmp(&b.price));
    slice_price_range(&sorted, bounds).to_vec()
}
