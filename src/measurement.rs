//! A value with an attached standard uncertainty, and the arithmetic needed to
//! carry that uncertainty through bin sums.
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A measured quantity and its one standard deviation uncertainty.
///
/// Adding two measurements treats them as independent, so their uncertainties
/// combine in quadrature. Scaling by an exact factor scales the uncertainty by
/// the magnitude of that factor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    pub value: f64,
    pub uncertainty: f64,
}

/// The result of summing histogram contents over an interval
pub type WeightedSum = Measurement;

impl Measurement {
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self { value, uncertainty }
    }

    /// A measurement with no uncertainty
    pub fn exact(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Multiply by a constant with no uncertainty of its own
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.value * factor, self.uncertainty * factor.abs())
    }

    /// Multiply by an exact decimal ratio, as used when apportioning part of a bin.
    #[inline]
    pub fn scale_by_ratio(&self, ratio: Decimal) -> Self {
        // Every finite `Decimal` fits in an `f64`
        self.scale(ratio.to_f64().unwrap_or_default())
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.uncertainty.is_finite()
    }
}

/// Combine a statistical and a systematic uncertainty into a single total
/// uncertainty, `sqrt(stat^2 + syst^2)`.
#[inline]
pub fn combine_in_quadrature(stat: f64, syst: f64) -> f64 {
    stat.hypot(syst)
}

impl Add for Measurement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.value + rhs.value,
            combine_in_quadrature(self.uncertainty, rhs.uncertainty),
        )
    }
}

impl AddAssign for Measurement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Zero for Measurement {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.uncertainty == 0.0
    }
}

impl Sum for Measurement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Measurement> for Measurement {
    fn sum<I: Iterator<Item = &'a Measurement>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+/-{}", self.value, self.uncertainty)
    }
}
