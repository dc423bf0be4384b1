use crate::error::AnalyticsError;
use core_types::BenchmarkDistribution;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = dec!(100);
const QUARTILE: Decimal = dec!(25);
const MEDIAN: Decimal = dec!(50);
const UPPER_QUARTILE: Decimal = dec!(75);

/// Which quarter of the industry population a percentile falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionBand {
    BottomQuartile,
    BelowMedian,
    AboveMedian,
    TopQuartile,
}

impl PositionBand {
    pub fn from_percentile(percentile: Decimal) -> Self {
        if percentile < QUARTILE {
            PositionBand::BottomQuartile
        } else if percentile < MEDIAN {
            PositionBand::BelowMedian
        } else if percentile < UPPER_QUARTILE {
            PositionBand::AboveMedian
        } else {
            PositionBand::TopQuartile
        }
    }
}

/// Estimates the percentile rank (0-100) of `value` within `distribution`.
///
/// Interpolates linearly between the anchors (0, 0), (p25, 25), (p50, 50) and
/// (p75, 75), extrapolating above p75 with the p50-p75 slope. When p25 is absent
/// the lower segment runs straight from the origin to the median; when p75 is
/// absent the slope below the median is continued upwards.
///
/// With `higher_is_better == false` the rank is mirrored, so a better value always
/// sits closer to 100.
///
/// # Errors
///
/// * `InsufficientBenchmarkData` when the median is missing, zero or negative, or
///   the quartiles are out of order.
/// * `MissingClientValue` when `value` is negative, or so large the rank overflows.
pub fn percentile_of(
    value: Decimal,
    distribution: &BenchmarkDistribution,
    higher_is_better: bool,
) -> Result<Decimal, AnalyticsError> {
    let p50 = distribution
        .usable_median()
        .filter(|p50| p50.is_sign_positive())
        .ok_or_else(|| {
            AnalyticsError::InsufficientBenchmarkData("median is missing or not positive".to_string())
        })?;
    if !distribution.is_ordered() {
        return Err(AnalyticsError::InsufficientBenchmarkData(
            "quartiles are out of order".to_string(),
        ));
    }
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AnalyticsError::MissingClientValue(format!(
            "negative value {value} cannot be ranked"
        )));
    }

    let p25 = distribution.p25.filter(|p25| !p25.is_sign_negative() && *p25 < p50);
    let p75 = distribution.p75.filter(|p75| *p75 > p50);

    let raw = if value >= p50 {
        match p75 {
            Some(p75) => along(MEDIAN, QUARTILE, value - p50, p75 - p50),
            None => (value - p50)
                .checked_mul(lower_slope(p25, p50))
                .and_then(|step| MEDIAN.checked_add(step)),
        }
    } else {
        match p25 {
            Some(p25) if value >= p25 => along(QUARTILE, QUARTILE, value - p25, p50 - p25),
            Some(p25) => along(Decimal::ZERO, QUARTILE, value, p25),
            None => along(Decimal::ZERO, MEDIAN, value, p50),
        }
    }
    .ok_or_else(|| AnalyticsError::MissingClientValue(format!("value {value} is too large to rank")))?;
    let ranked = raw.clamp(Decimal::ZERO, HUNDRED);

    Ok(if higher_is_better { ranked } else { HUNDRED - ranked })
}

/// `start + width * offset / span`, or `None` if any step overflows.
fn along(start: Decimal, width: Decimal, offset: Decimal, span: Decimal) -> Option<Decimal> {
    width
        .checked_mul(offset)?
        .checked_div(span)
        .and_then(|step| start.checked_add(step))
}

/// Percentile points per unit of value just below the median.
fn lower_slope(p25: Option<Decimal>, p50: Decimal) -> Decimal {
    match p25 {
        Some(p25) => QUARTILE / (p50 - p25),
        None => MEDIAN / p50,
    }
}
