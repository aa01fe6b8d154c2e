//! `cocktailsum` sums a reference "cocktail" histogram over arbitrary mass
//! intervals, apportioning bins that are cut by an interval bound and
//! propagating the bin uncertainties through the sum.
//!
//! Bin edges are held as exact decimals so that deciding whether an interval
//! bound coincides with a bin edge never suffers from floating point error.
//!
//! The single interval operation is [`summarize`]. [`summarize_ranges`] applies it
//! over the standard mass ranges, a custom list of boundaries, or a sweep of low
//! mass range boundaries used to estimate a systematic uncertainty.
//!
//! # Usage
//! ```
//! use cocktailsum::{default_boundaries, summarize_ranges, RangeMode};
//!
//! let table = "\
//! 0.1 1.0 0.1 0.01 0.02
//! 0.3 2.0 0.1 0.01 0.02
//! 0.5 4.0 0.1 0.01 0.02
//! 0.7 3.0 0.1 0.01 0.02
//! 0.9 2.0 0.1 0.01 0.02
//! 1.1 1.0 0.1 0.01 0.02
//! 2.0 0.5 0.8 0.01 0.02
//! ";
//! let hist = cocktailsum::text::histogram_from_reader(table.as_bytes()).unwrap();
//! let sums = summarize_ranges(&hist, &default_boundaries(), &RangeMode::AllRanges, "").unwrap();
//! assert_eq!(sums.len(), 4);
//! assert!(sums.get("LMR").unwrap().value > 0.0);
//! ```
pub mod compare;
pub mod config;
pub mod error;
pub mod histogram;
pub mod labels;
pub mod measurement;
pub mod ranges;
pub mod search;
pub mod summarize;
pub mod text;

pub use crate::config::WorkDirs;
pub use crate::error::{ConfigError, InvalidRangeError, TableError};
pub use crate::histogram::{CocktailRow, Histogram};
pub use crate::measurement::{combine_in_quadrature, Measurement, WeightedSum};
pub use crate::ranges::{default_boundaries, summarize_ranges, RangeMode, RangeSums};
pub use crate::summarize::summarize;
