//! All the ways loading, configuring and summarizing can fail.
use std::io;
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid histogram or interval input to the range summarizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("A histogram needs at least one bin")]
    EmptyHistogram,
    #[error("Expected {expected} bin edges for {bins} bins, got {found}")]
    EdgeCountMismatch {
        bins: usize,
        expected: usize,
        found: usize,
    },
    #[error("Bin edges must be strictly increasing, but edge {index} ({edge}) follows {previous}")]
    NonIncreasingEdges {
        index: usize,
        previous: Decimal,
        edge: Decimal,
    },
    #[error("Bin {index} has a non-finite value or a negative uncertainty")]
    InvalidBin { index: usize },
    #[error("Edge value {0} cannot be represented as an exact decimal")]
    UnrepresentableEdge(String),
    #[error("Interval [{e0}, {e1}] is empty or inverted")]
    Inverted { e0: Decimal, e1: Decimal },
    #[error("Interval lower bound {e0} lies below the first bin edge {first}")]
    BelowDomain { e0: Decimal, first: Decimal },
    #[error("Interval lower bound {e0} lies above the last bin edge {last}")]
    AboveDomain { e0: Decimal, last: Decimal },
    #[error("Range boundaries need at least two points, got {0}")]
    TooFewBoundaries(usize),
    #[error("Range boundaries must be strictly increasing, but {next} follows {previous}")]
    Unordered { previous: Decimal, next: Decimal },
    #[error("{found} ranges requested but only {available} range titles exist")]
    TooManyRanges { found: usize, available: usize },
    #[error("Range index {index} is out of bounds for {count} ranges")]
    RangeIndexOutOfBounds { index: usize, count: usize },
    #[error("A systematic sweep needs at least one lower and one upper boundary")]
    EmptySweep,
}

/// Failures reading a numeric table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("An IO error occurred: {0}")]
    IOError(#[from] io::Error),
    #[error("Line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: could not parse {token:?} as a number")]
    InvalidNumber { line: usize, token: String },
    #[error("Line {line}: {source}")]
    InvalidDecimal {
        line: usize,
        #[source]
        source: rust_decimal::Error,
    },
    #[error("The table does not describe a valid histogram: {0}")]
    InvalidHistogram(#[from] InvalidRangeError),
}

/// Failures validating the working directories
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Input directory {0} does not exist, create it to continue")]
    MissingInputDir(PathBuf),
    #[error("Input path {0} is not a directory")]
    InputNotADirectory(PathBuf),
    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
