//! Sum the portion of a [`Histogram`] that falls inside an arbitrary interval.
//!
//! Bins lying entirely inside `[e0, e1]` contribute in full. A bin cut by one of
//! the interval bounds contributes the fraction of its width that lies inside,
//! assuming its content is spread uniformly across the bin. That fraction is an
//! exact decimal ratio and scales the bin's uncertainty by the same amount.
//!
//! # Example
//! ```
//! use cocktailsum::{summarize, Histogram, Measurement};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let hist = Histogram::from_f64_edges(
//!     &[0.0, 1.0, 2.0, 3.0],
//!     vec![Measurement::exact(10.0), Measurement::exact(20.0), Measurement::exact(30.0)],
//! ).unwrap();
//! let e0 = Decimal::from_str("0.5").unwrap();
//! let e1 = Decimal::from_str("2.5").unwrap();
//! let total = summarize(&hist, e0, e1).unwrap();
//! // 10 * 0.5 + 20 + 30 * 0.5
//! assert_eq!(total.value, 40.0);
//! ```
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::error::InvalidRangeError;
use crate::histogram::Histogram;
use crate::measurement::{Measurement, WeightedSum};
use crate::search::{find_between, first_at_or_above};

/// Check that `[e0, e1]` is a usable interval for `histogram`.
///
/// The upper bound may run past the last edge, the lower bound may not leave the
/// covered domain.
fn check_interval(histogram: &Histogram, e0: Decimal, e1: Decimal) -> Result<(), InvalidRangeError> {
    if e0 >= e1 {
        return Err(InvalidRangeError::Inverted { e0, e1 });
    }
    let first = histogram.first_edge();
    if e0 < first {
        return Err(InvalidRangeError::BelowDomain { e0, first });
    }
    let last = histogram.last_edge();
    if e0 > last {
        return Err(InvalidRangeError::AboveDomain { e0, last });
    }
    Ok(())
}

/// Contribution of `bin_index` scaled by `span / width` where `width` is that bin's width
fn apportion(histogram: &Histogram, bin_index: usize, span: Decimal) -> Measurement {
    match (histogram.bin(bin_index), histogram.width(bin_index)) {
        (Some(bin), Some(width)) => bin.scale_by_ratio(span / width),
        _ => Measurement::default(),
    }
}

/// Compute the interpolated sum of `histogram` over `[e0, e1]`.
///
/// # Errors
/// Returns [`InvalidRangeError`] when `e0 >= e1` or `e0` lies outside the edges
/// of `histogram`.
///
/// # Notes
/// When `e1` lies beyond the last edge the part of the interval past the
/// histogram contributes nothing. A warning is logged when that happens.
pub fn summarize(histogram: &Histogram, e0: Decimal, e1: Decimal) -> Result<WeightedSum, InvalidRangeError> {
    check_interval(histogram, e0, e1)?;
    let edges = histogram.edges();

    let (lo_i, hi_i) = match find_between(edges, &e0, &e1) {
        Some(bounds) => bounds,
        None => return Ok(summarize_within_bin(histogram, e0, e1)),
    };

    let (e_lo, e_hi) = (edges[lo_i], edges[hi_i]);
    let mut total: Measurement = histogram.bins()[lo_i..hi_i].iter().sum();
    debug!("{e0} - {e1}: full bins {lo_i}..{hi_i} sum to {total}");

    if e_lo != e0 {
        // `check_interval` guarantees a bin below `e_lo` when it differs from `e0`
        let correction = apportion(histogram, lo_i - 1, e_lo - e0);
        total += correction;
        debug!(
            "{e0} - {e1}: lower edge {e0} inside bin {}, adding {correction} -> {total}",
            lo_i - 1
        );
    }

    if e_hi != e1 {
        if hi_i < histogram.len() {
            let correction = apportion(histogram, hi_i, e1 - e_hi);
            total += correction;
            debug!("{e0} - {e1}: upper edge {e1} inside bin {hi_i}, adding {correction} -> {total}");
        } else {
            warn!(
                "Upper bound {e1} lies beyond the last bin edge {e_hi}, the remainder of the interval contributes nothing"
            );
        }
    }

    Ok(total)
}

/// Both bounds fall strictly inside a single bin, which contributes the
/// fraction of its width covered by the interval.
fn summarize_within_bin(histogram: &Histogram, e0: Decimal, e1: Decimal) -> Measurement {
    let edges = histogram.edges();
    // No edge lies in `[e0, e1]` and `e0` is inside the domain, so an edge above
    // `e0` exists and is never the first edge.
    let next_edge = first_at_or_above(edges, &e0).unwrap_or(edges.len() - 1);
    let bin_index = next_edge.saturating_sub(1);
    let total = apportion(histogram, bin_index, e1 - e0);
    debug!("{e0} - {e1}: inside bin {bin_index}, sum {total}");
    total
}
