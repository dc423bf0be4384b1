use crate::error::ValuationError;
use configuration::IndustryMultiples;
use core_types::{BaselineMetrics, Estimate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The starting point of a valuation, before any discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBaseline {
    /// The multiples row that was used (after the `DEFAULT` fallback).
    pub industry_code: String,
    pub ebitda: Decimal,
    pub ebitda_margin: Decimal,
    pub multiple_range: Estimate,
    /// EBITDA x multiple.
    pub base_value: Estimate,
    /// Added on top of the base value, never multiplied.
    pub surplus_cash: Decimal,
    pub enterprise_value: Estimate,
    pub multiple_justification: String,
}

/// Values the operating business at an EBITDA multiple and adds surplus cash.
///
/// `surplus_cash` overrides the figure on the baseline when supplied; a negative
/// figure counts as zero.
///
/// # Errors
///
/// `InvalidBaseline` when revenue is not positive or EBITDA is missing or not
/// positive. `InvalidParameters` when the table has no row for the industry and
/// no `DEFAULT` row.
pub fn baseline_value(
    baseline: &BaselineMetrics,
    industry_code: &str,
    multiples: &IndustryMultiples,
    surplus_cash: Option<Decimal>,
) -> Result<ValuationBaseline, ValuationError> {
    if baseline.revenue <= Decimal::ZERO {
        return Err(ValuationError::InvalidBaseline(format!(
            "revenue is {}",
            baseline.revenue
        )));
    }
    let ebitda = baseline
        .ebitda
        .filter(|ebitda| *ebitda > Decimal::ZERO)
        .ok_or_else(|| ValuationError::InvalidBaseline("EBITDA is missing or not positive".to_string()))?;

    let (matched_code, row) = multiples.lookup(industry_code).ok_or_else(|| {
        ValuationError::InvalidParameters(format!("no multiple for '{industry_code}' and no DEFAULT row"))
    })?;

    let multiple_range = row.range();
    let base_value = multiple_range.scale(ebitda);
    let surplus_cash = surplus_cash
        .or(baseline.surplus_cash)
        .unwrap_or_default()
        .max(Decimal::ZERO);
    let enterprise_value = base_value + Estimate::point(surplus_cash);

    let revenue_millions = (baseline.revenue / dec!(1000000)).round_dp(1);
    let multiple_justification = if row.factors.is_empty() {
        format!("{matched_code} industry range for a {revenue_millions}M revenue business.")
    } else {
        format!(
            "{matched_code} industry range for a {revenue_millions}M revenue business. Multiple factors: {}.",
            row.factors.join(", ")
        )
    };

    tracing::debug!(
        industry = matched_code,
        %ebitda,
        multiple = %multiple_range.mid,
        enterprise_value = %enterprise_value.mid,
        "Baseline value calculated."
    );

    Ok(ValuationBaseline {
        industry_code: matched_code.to_string(),
        ebitda,
        ebitda_margin: ebitda / baseline.revenue * dec!(100),
        multiple_range,
        base_value,
        surplus_cash,
        enterprise_value,
        multiple_justification,
    })
}
