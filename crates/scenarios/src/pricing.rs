use crate::format::{format_compact, format_value};
use crate::inputs::{require, require_percent};
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Projects a price rise against the clients it might cost.
///
/// The cost base is treated as fixed, so the whole revenue change is profit.
pub struct PricingPower {
    value_multiple: Decimal,
}

impl PricingPower {
    pub fn new(assumptions: &ScenarioAssumptions) -> Self {
        Self {
            value_multiple: assumptions.value_multiple,
        }
    }
}

/// Share of volume that can be lost before a rise of `rate_pct` stops paying.
fn break_even_volume_loss(rate_pct: Decimal) -> Decimal {
    (Decimal::ONE - Decimal::ONE / (Decimal::ONE + rate_pct / dec!(100))) * dec!(100)
}

impl Scenario for PricingPower {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Pricing
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        let rate = require(inputs.rate_increase_pct, "rate_increase_pct")?;
        if rate < Decimal::ZERO {
            return Err(ScenarioError::InvalidInput(format!(
                "rate_increase_pct cannot be negative, got {rate}"
            )));
        }
        let retention = require_percent(inputs.retention_pct, "retention_pct")?;

        let margin_impact = baseline.revenue * rate / dec!(100) * retention / dec!(100);
        let current_profit = baseline.net_profit();
        let projected_profit = current_profit + margin_impact;
        let value_impact = margin_impact * self.value_multiple;
        let break_even = break_even_volume_loss(rate);

        let summary = format!(
            "A {} price rise keeping {} of clients adds {} to profit each year. \
             Volume can fall by up to {} before the rise stops paying for itself.",
            format_value(rate, ValueFormat::Percent),
            format_value(retention, ValueFormat::Percent),
            format_compact(margin_impact),
            format_value(break_even, ValueFormat::Percent),
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Pricing,
            title: "Pricing Power".to_string(),
            primary_metric: PrimaryMetric {
                label: "Direct Margin Impact".to_string(),
                current: current_profit,
                projected: projected_profit,
                delta: margin_impact,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Revenue Change",
                    margin_impact,
                    "Additional revenue after client losses",
                    ValueFormat::Currency,
                ),
                SecondaryMetric::new(
                    "Break-even Volume Loss",
                    break_even,
                    "Volume that could be lost before profit falls",
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Business Value Impact",
                    value_impact,
                    format!("At a {}x profit multiple", self.value_multiple),
                    ValueFormat::Currency,
                ),
            ],
            summary,
            how_to_achieve: steps(&[
                "Benchmark your rates against competitors",
                "Document the value you deliver for each client",
                "Apply the rise to new clients first",
                "Give existing clients reasonable notice",
                "Bundle services to support the higher price",
                "Put the rise through at contract renewal",
            ]),
            business_value_impact: value_impact,
            annual_profit_impact: margin_impact,
            impact_kind: ImpactKind::RecurringProfit,
        })
    }
}
