use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Whole currency units. Catalog prices are integral, so no fractional cents exist.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u32);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u32 {
        self.0
    }

    /// `ceil(self * percent / 100)`, computed without floating point.
    pub fn percent_ceil(self, percent: u32) -> Self {
        let scaled = u64::from(self.0) * u64::from(percent);
        let units = scaled.div_ceil(100);
        Self(u32::try_from(units).unwrap_or(u32::MAX))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
