//! A binned reference spectrum with exact decimal bin edges.
use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidRangeError;
use crate::measurement::{combine_in_quadrature, Measurement};

/// Convert a floating point coordinate to the shortest decimal that round-trips
/// to it, so `0.4` becomes exactly `0.4` rather than its binary approximation.
pub fn decimal_from_f64(x: f64) -> Result<Decimal, InvalidRangeError> {
    if !x.is_finite() {
        return Err(InvalidRangeError::UnrepresentableEdge(x.to_string()));
    }
    let text = x.to_string();
    Decimal::from_str(&text).map_err(|_| InvalidRangeError::UnrepresentableEdge(text))
}

/// One row of a cocktail table: a bin center, a density value, the bin
/// half-width and the statistical and systematic uncertainties on the value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CocktailRow {
    pub center: Decimal,
    pub value: f64,
    pub half_width: Decimal,
    pub stat_error: f64,
    pub syst_error: f64,
}

impl CocktailRow {
    pub fn new(
        center: Decimal,
        value: f64,
        half_width: Decimal,
        stat_error: f64,
        syst_error: f64,
    ) -> Self {
        Self {
            center,
            value,
            half_width,
            stat_error,
            syst_error,
        }
    }

    pub fn lower_edge(&self) -> Decimal {
        self.center - self.half_width
    }

    pub fn upper_edge(&self) -> Decimal {
        self.center + self.half_width
    }

    /// The bin content: the density integrated over the bin width, carrying the
    /// statistical and systematic uncertainties combined in quadrature.
    pub fn content(&self) -> Measurement {
        let width = (self.half_width * Decimal::from(2)).to_f64().unwrap_or_default();
        Measurement::new(
            self.value,
            combine_in_quadrature(self.stat_error, self.syst_error),
        )
        .scale(width)
    }
}

/// A step function over contiguous bins. `edges` holds one more entry than
/// `bins`, bin `i` covering `[edges[i], edges[i + 1])`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "HistogramParts")
)]
pub struct Histogram {
    edges: Vec<Decimal>,
    bins: Vec<Measurement>,
}

/// The unchecked serialized form of a [`Histogram`], validated by [`Histogram::new`]
/// on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HistogramParts {
    edges: Vec<Decimal>,
    bins: Vec<Measurement>,
}

#[cfg(feature = "serde")]
impl TryFrom<HistogramParts> for Histogram {
    type Error = InvalidRangeError;

    fn try_from(parts: HistogramParts) -> Result<Self, Self::Error> {
        Self::new(parts.edges, parts.bins)
    }
}

impl Histogram {
    /// Build a histogram, checking that the edges are strictly increasing, that
    /// there is exactly one more edge than there are bins, and that every bin is finite
    /// with a non-negative uncertainty.
    pub fn new(edges: Vec<Decimal>, bins: Vec<Measurement>) -> Result<Self, InvalidRangeError> {
        if bins.is_empty() {
            return Err(InvalidRangeError::EmptyHistogram);
        }
        if edges.len() != bins.len() + 1 {
            return Err(InvalidRangeError::EdgeCountMismatch {
                bins: bins.len(),
                expected: bins.len() + 1,
                found: edges.len(),
            });
        }
        for (index, pair) in edges.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(InvalidRangeError::NonIncreasingEdges {
                    index: index + 1,
                    previous: pair[0],
                    edge: pair[1],
                });
            }
        }
        if let Some(index) = bins
            .iter()
            .position(|b| !b.is_finite() || b.uncertainty < 0.0)
        {
            return Err(InvalidRangeError::InvalidBin { index });
        }
        Ok(Self { edges, bins })
    }

    /// Build a histogram from floating point edges, converting each to its
    /// shortest exact decimal form.
    pub fn from_f64_edges(edges: &[f64], bins: Vec<Measurement>) -> Result<Self, InvalidRangeError> {
        let edges = edges
            .iter()
            .copied()
            .map(decimal_from_f64)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(edges, bins)
    }

    /// Build a histogram from cocktail table rows.
    ///
    /// The first lower edge comes from the first row's center and half-width, every
    /// following edge is the upper edge of a row.
    pub fn from_rows(rows: &[CocktailRow]) -> Result<Self, InvalidRangeError> {
        let first = rows.first().ok_or(InvalidRangeError::EmptyHistogram)?;
        let mut edges = Vec::with_capacity(rows.len() + 1);
        edges.push(first.lower_edge());
        edges.extend(rows.iter().map(|r| r.upper_edge()));
        let bins = rows.iter().map(|r| r.content()).collect();
        Self::new(edges, bins)
    }

    pub fn edges(&self) -> &[Decimal] {
        &self.edges
    }

    pub fn bins(&self) -> &[Measurement] {
        &self.bins
    }

    pub fn bin(&self, index: usize) -> Option<&Measurement> {
        self.bins.get(index)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn first_edge(&self) -> Decimal {
        self.edges[0]
    }

    pub fn last_edge(&self) -> Decimal {
        self.edges[self.edges.len() - 1]
    }

    /// The width of bin `index`
    pub fn width(&self, index: usize) -> Option<Decimal> {
        if index < self.bins.len() {
            Some(self.edges[index + 1] - self.edges[index])
        } else {
            None
        }
    }

    /// The sum of every bin
    pub fn total(&self) -> Measurement {
        self.bins.iter().sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(0.4).unwrap(), dec("0.4"));
        assert_eq!(decimal_from_f64(3.0).unwrap(), dec("3"));
        assert_eq!(decimal_from_f64(0.1 + 0.2).unwrap(), dec("0.30000000000000004"));
        assert!(decimal_from_f64(f64::NAN).is_err());
        assert!(decimal_from_f64(1e40).is_err());
    }

    #[test]
    fn test_validation() {
        let bins = vec![Measurement::exact(1.0); 3];
        assert!(Histogram::from_f64_edges(&[0.0, 1.0, 2.0, 3.0], bins.clone()).is_ok());
        assert_eq!(
            Histogram::from_f64_edges(&[0.0, 1.0, 2.0], bins.clone()),
            Err(InvalidRangeError::EdgeCountMismatch {
                bins: 3,
                expected: 4,
                found: 3
            })
        );
        assert!(matches!(
            Histogram::from_f64_edges(&[0.0, 1.0, 1.0, 3.0], bins.clone()),
            Err(InvalidRangeError::NonIncreasingEdges { index: 2, .. })
        ));
        assert_eq!(
            Histogram::new(vec![dec("0")], Vec::new()),
            Err(InvalidRangeError::EmptyHistogram)
        );
        let mut bad = bins.clone();
        bad[1] = Measurement::new(1.0, -1.0);
        assert_eq!(
            Histogram::from_f64_edges(&[0.0, 1.0, 2.0, 3.0], bad),
            Err(InvalidRangeError::InvalidBin { index: 1 })
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_deserialize_is_validated() {
        let empty = serde_json::from_str::<Histogram>(r#"{"edges":[],"bins":[]}"#);
        assert!(empty.is_err());

        let decreasing = serde_json::from_str::<Histogram>(
            r#"{"edges":["1","0"],"bins":[{"value":1.0,"uncertainty":0.5}]}"#,
        );
        assert!(decreasing.is_err());

        let negative = serde_json::from_str::<Histogram>(
            r#"{"edges":["0","1"],"bins":[{"value":1.0,"uncertainty":-5.0}]}"#,
        );
        assert!(negative.is_err());

        let hist = serde_json::from_str::<Histogram>(
            r#"{"edges":["0","0.5","1"],"bins":[{"value":1.0,"uncertainty":0.5},{"value":2.0,"uncertainty":0.0}]}"#,
        )
        .unwrap();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist.last_edge(), dec("1"));

        let text = serde_json::to_string(&hist).unwrap();
        assert_eq!(serde_json::from_str::<Histogram>(&text).unwrap(), hist);
    }

    #[test]
    fn test_from_rows() {
        let rows = [
            CocktailRow::new(dec("0.005"), 100.0, dec("0.005"), 3.0, 4.0),
            CocktailRow::new(dec("0.015"), 50.0, dec("0.005"), 0.0, 2.0),
        ];
        let hist = Histogram::from_rows(&rows).unwrap();
        assert_eq!(hist.edges(), &[dec("0"), dec("0.01"), dec("0.02")]);
        assert_eq!(hist.len(), 2);
        let first = hist.bin(0).unwrap();
        assert!((first.value - 1.0).abs() < 1e-12);
        assert!((first.uncertainty - 0.05).abs() < 1e-12);
        assert_eq!(hist.width(1), Some(dec("0.01")));
        assert_eq!(hist.width(2), None);
        assert!((hist.total().value - 1.5).abs() < 1e-12);
    }
}
