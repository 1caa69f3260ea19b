//! Ratio computation and change detection.

use crate::Price;
use rust_decimal::Decimal;

/// Significant digits kept when dividing two prices.
pub const RATIO_SIGNIFICANT_DIGITS: u32 = 10;

/// Prices of both tracked pairs at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceSnapshot {
    pub first: Price,
    pub second: Price,
}

impl PriceSnapshot {
    pub fn new(first: Price, second: Price) -> Self {
        Self { first, second }
    }

    /// True if either price differs from `other`.
    pub fn differs_from(&self, other: &PriceSnapshot) -> bool {
        self.first != other.first || self.second != other.second
    }

    /// `first / second`, rounded half-even to [`RATIO_SIGNIFICANT_DIGITS`].
    ///
    /// Returns `None` when `second` is zero or the quotient overflows.
    pub fn ratio(&self) -> Option<Decimal> {
        let raw = self.first.value().checked_div(self.second.value())?;
        raw.round_sf(RATIO_SIGNIFICANT_DIGITS)
    }
}

/// Result of a cycle in which at least one price changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioUpdate {
    pub ratio: Decimal,
    pub threshold_exceeded: bool,
}

/// Decision for one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Neither price moved.
    Unchanged,
    /// A price moved but `first / second` has no decimal value
    /// (zero denominator or out of range).
    RatioUndefined,
    /// A price moved and the ratio is known.
    Changed(RatioUpdate),
}

/// Decide what a poll cycle should report.
///
/// `threshold_exceeded` is strict: a ratio equal to the threshold does
/// not alert.
pub fn evaluate(
    previous: &PriceSnapshot,
    current: &PriceSnapshot,
    threshold: Decimal,
) -> Evaluation {
    if !current.differs_from(previous) {
        return Evaluation::Unchanged;
    }
    match current.ratio() {
        Some(ratio) => Evaluation::Changed(RatioUpdate {
            ratio,
            threshold_exceeded: ratio > threshold,
        }),
        None => Evaluation::RatioUndefined,
    }
}
