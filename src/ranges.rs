//! Summarize a histogram over a set of mass ranges at once.
//!
//! [`summarize_ranges`] either walks adjacent pairs of a boundary list, picks out
//! a single one of those ranges, or sweeps the bounds of the low mass range over
//! a grid to probe how sensitive the sum is to where the range is cut.
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

#[cfg(feature = "parallelism")]
use rayon::prelude::*;

use crate::error::InvalidRangeError;
use crate::histogram::Histogram;
use crate::labels::{range_label, sweep_label, MASS_TITLES};
use crate::measurement::WeightedSum;
use crate::summarize::summarize;

/// Boundaries of the default mass ranges in GeV/c^2, see [`MASS_TITLES`]
pub const DEFAULT_BOUNDARIES: [&str; 5] = ["0", "0.4", "0.75", "1.1", "3"];

const LMR_SWEEP_STEP: &str = "0.05";
const LMR_SWEEP_STEPS: usize = 4;
const LMR_SWEEP_LOWER_START: &str = "0.15";
const LMR_SWEEP_UPPER_START: &str = "0.6";

fn parse_constant(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap_or_default()
}

/// The default mass range boundaries as exact decimals
pub fn default_boundaries() -> Vec<Decimal> {
    DEFAULT_BOUNDARIES.iter().map(|s| parse_constant(s)).collect()
}

/// `count` evenly spaced values starting at `start`
pub fn decimal_steps(start: Decimal, step: Decimal, count: usize) -> Vec<Decimal> {
    (0..count)
        .map(|i| (start + step * Decimal::from(i as u64)).normalize())
        .collect()
}

/// Which ranges [`summarize_ranges`] evaluates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RangeMode {
    /// One labeled sum per adjacent pair of boundaries
    #[default]
    AllRanges,
    /// Only the sum over the `index`-th adjacent pair of boundaries, unlabeled
    SingleRange(usize),
    /// Every combination of a lower and an upper bound for the low mass range.
    /// The boundary list is ignored in this mode.
    SystematicSweep {
        lower: Vec<Decimal>,
        upper: Vec<Decimal>,
    },
}

impl RangeMode {
    /// The low mass range in isolation
    pub fn lmr_only() -> Self {
        Self::SingleRange(crate::labels::LMR_INDEX)
    }

    /// The standard low mass range sweep: four lower bounds from 0.15 and four upper
    /// bounds from 0.6, both in steps of 0.05
    pub fn lmr_sweep() -> Self {
        let step = parse_constant(LMR_SWEEP_STEP);
        Self::SystematicSweep {
            lower: decimal_steps(parse_constant(LMR_SWEEP_LOWER_START), step, LMR_SWEEP_STEPS),
            upper: decimal_steps(parse_constant(LMR_SWEEP_UPPER_START), step, LMR_SWEEP_STEPS),
        }
    }
}

/// The outcome of [`summarize_ranges`]
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSums {
    /// The sum for [`RangeMode::SingleRange`]
    Single(WeightedSum),
    /// Labeled sums in the order they were generated
    Labeled(Vec<(String, WeightedSum)>),
}

impl RangeSums {
    /// Look up a labeled sum
    pub fn get(&self, label: &str) -> Option<&WeightedSum> {
        match self {
            Self::Single(_) => None,
            Self::Labeled(entries) => entries
                .iter()
                .find(|(key, _)| key == label)
                .map(|(_, sum)| sum),
        }
    }

    pub fn single(&self) -> Option<&WeightedSum> {
        match self {
            Self::Single(sum) => Some(sum),
            Self::Labeled(_) => None,
        }
    }

    /// The labeled entries, empty for a single sum
    pub fn entries(&self) -> &[(String, WeightedSum)] {
        match self {
            Self::Single(_) => &[],
            Self::Labeled(entries) => entries,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeightedSum)> {
        self.entries().iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Labeled(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_boundaries(boundaries: &[Decimal]) -> Result<(), InvalidRangeError> {
    if boundaries.len() < 2 {
        return Err(InvalidRangeError::TooFewBoundaries(boundaries.len()));
    }
    for pair in boundaries.windows(2) {
        if pair[1] <= pair[0] {
            return Err(InvalidRangeError::Unordered {
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

cfg_if::cfg_if! {
    if #[cfg(feature = "parallelism")] {
        fn summarize_pairs(histogram: &Histogram, pairs: &[(Decimal, Decimal)]) -> Result<Vec<WeightedSum>, InvalidRangeError> {
            pairs
                .par_iter()
                .map(|(e0, e1)| summarize(histogram, *e0, *e1))
                .collect()
        }
    } else {
        fn summarize_pairs(histogram: &Histogram, pairs: &[(Decimal, Decimal)]) -> Result<Vec<WeightedSum>, InvalidRangeError> {
            pairs
                .iter()
                .map(|(e0, e1)| summarize(histogram, *e0, *e1))
                .collect()
        }
    }
}

/// Summarize `histogram` over several mass ranges.
///
/// # Arguments
/// - `histogram` - The reference histogram
/// - `boundaries` - Strictly increasing range boundaries, adjacent pairs forming
///   the ranges. Use [`default_boundaries`] for the standard four ranges.
/// - `mode` - Which ranges to evaluate, see [`RangeMode`]
/// - `suffix` - Appended to the range title in every label
pub fn summarize_ranges(
    histogram: &Histogram,
    boundaries: &[Decimal],
    mode: &RangeMode,
    suffix: &str,
) -> Result<RangeSums, InvalidRangeError> {
    match mode {
        RangeMode::AllRanges => {
            check_boundaries(boundaries)?;
            let count = boundaries.len() - 1;
            if count > MASS_TITLES.len() {
                return Err(InvalidRangeError::TooManyRanges {
                    found: count,
                    available: MASS_TITLES.len(),
                });
            }
            let mut entries = Vec::with_capacity(count);
            for (i, pair) in boundaries.windows(2).enumerate() {
                let sum = summarize(histogram, pair[0], pair[1])?;
                debug!("{} - {}: {sum}", pair[0], pair[1]);
                if let Some(label) = range_label(i, suffix) {
                    entries.push((label, sum));
                }
            }
            Ok(RangeSums::Labeled(entries))
        }
        RangeMode::SingleRange(index) => {
            check_boundaries(boundaries)?;
            let count = boundaries.len() - 1;
            if *index >= count {
                return Err(InvalidRangeError::RangeIndexOutOfBounds {
                    index: *index,
                    count,
                });
            }
            let sum = summarize(histogram, boundaries[*index], boundaries[*index + 1])?;
            Ok(RangeSums::Single(sum))
        }
        RangeMode::SystematicSweep { lower, upper } => {
            if lower.is_empty() || upper.is_empty() {
                return Err(InvalidRangeError::EmptySweep);
            }
            let pairs: Vec<(Decimal, Decimal)> = upper
                .iter()
                .flat_map(|ue| lower.iter().map(move |le| (*le, *ue)))
                .collect();
            let sums = summarize_pairs(histogram, &pairs)?;
            let entries = pairs
                .into_iter()
                .zip(sums)
                .map(|((e0, e1), sum)| {
                    debug!("{e0} - {e1}: {sum}");
                    (sweep_label(e0, e1, suffix), sum)
                })
                .collect();
            Ok(RangeSums::Labeled(entries))
        }
    }
}
