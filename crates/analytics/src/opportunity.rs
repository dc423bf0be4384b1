use crate::error::AnalyticsError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The value of closing a gross margin gap, before and after a realistic capture rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginOpportunity {
    /// Percentage points between the client and the median.
    pub gap_points: Decimal,
    /// Revenue x gap, if the whole gap were closed.
    pub full_value: Decimal,
    pub recovery_factor: Decimal,
    /// The share of `full_value` a business in this industry can usually capture.
    pub addressable_value: Decimal,
    /// Human-readable working, one line per step.
    pub steps: Vec<String>,
}

/// Sizes a gross margin gap against the industry median.
///
/// Returns `Ok(None)` when the client is already at or above the median.
pub fn margin_opportunity(
    client_margin: Decimal,
    median_margin: Decimal,
    revenue: Decimal,
    recovery_factor: Decimal,
) -> Result<Option<MarginOpportunity>, AnalyticsError> {
    if revenue <= Decimal::ZERO {
        return Err(AnalyticsError::InvalidInput("revenue must be positive".to_string()));
    }
    if recovery_factor <= Decimal::ZERO || recovery_factor > Decimal::ONE {
        return Err(AnalyticsError::InvalidInput(format!(
            "recovery factor {recovery_factor} must be in (0, 1]"
        )));
    }
    if client_margin >= median_margin {
        return Ok(None);
    }

    let gap_points = median_margin - client_margin;
    let full_value = (revenue * gap_points / dec!(100)).round_dp(0);
    let addressable_value = (full_value * recovery_factor).round_dp(0);
    let capture_pct = (recovery_factor * dec!(100)).round_dp(0);

    let steps = vec![
        format!("Margin gap: {median_margin}% median - {client_margin}% client = {gap_points} points"),
        format!("Full gap value: {revenue} x {gap_points}% = {full_value}"),
        format!("Realistic capture ({capture_pct}%): {full_value} x {recovery_factor} = {addressable_value}"),
    ];

    Ok(Some(MarginOpportunity {
        gap_points,
        full_value,
        recovery_factor,
        addressable_value,
        steps,
    }))
}
