use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A two-point range, used for discount percentages and impact amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Band {
    pub low: Decimal,
    pub high: Decimal,
}

impl Band {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// The midpoint of the band.
    pub fn mid(&self) -> Decimal {
        (self.low + self.high) / dec!(2)
    }

    /// True when the band is a usable discount: `0 <= low <= high < 100`.
    pub fn is_valid_discount(&self) -> bool {
        self.low >= Decimal::ZERO && self.low <= self.high && self.high < dec!(100)
    }
}

/// A three-point monetary or percentage estimate.
///
/// All monetary outputs of the engine are estimates rather than single figures
/// so that consumers have to handle the uncertainty explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Estimate {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
}

impl Estimate {
    pub fn new(low: Decimal, mid: Decimal, high: Decimal) -> Self {
        Self { low, mid, high }
    }

    /// An estimate with no spread.
    pub fn point(value: Decimal) -> Self {
        Self::new(value, value, value)
    }

    pub fn zero() -> Self {
        Self::point(Decimal::ZERO)
    }

    /// Applies `f` to each of the three points.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Decimal) -> Decimal,
    {
        Self::new(f(self.low), f(self.mid), f(self.high))
    }

    /// Scales every point by `factor`.
    pub fn scale(&self, factor: Decimal) -> Self {
        self.map(|v| v * factor)
    }

    /// Caps each point at the matching point of `ceiling`.
    pub fn min_each(&self, ceiling: &Estimate) -> Self {
        Self::new(
            self.low.min(ceiling.low),
            self.mid.min(ceiling.mid),
            self.high.min(ceiling.high),
        )
    }
}

impl Add for Estimate {
    type Output = Estimate;

    fn add(self, rhs: Estimate) -> Estimate {
        Estimate::new(self.low + rhs.low, self.mid + rhs.mid, self.high + rhs.high)
    }
}
