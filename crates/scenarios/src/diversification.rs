use crate::format::{format_compact, format_value};
use crate::inputs::require_percent;
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Top-three clients share the concentrated revenue.
const MAJOR_CLIENTS: Decimal = dec!(3);

/// Discount a buyer applies for a given top-three concentration, percent.
fn concentration_discount(top3: Decimal) -> Decimal {
    if top3 >= dec!(80) {
        dec!(25)
    } else if top3 >= dec!(60) {
        dec!(15)
    } else {
        dec!(5)
    }
}

/// Projects how much less the business rides on any one major client.
///
/// Nothing here adds profit; the gain shows up as a smaller buyer discount.
pub struct CustomerDiversification {
    value_multiple: Decimal,
}

impl CustomerDiversification {
    pub fn new(assumptions: &ScenarioAssumptions) -> Self {
        Self {
            value_multiple: assumptions.value_multiple,
        }
    }
}

impl Scenario for CustomerDiversification {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Diversification
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        let current = baseline
            .client_concentration
            .ok_or_else(|| ScenarioError::InvalidBaseline("client concentration is unknown".to_string()))?;
        let target = require_percent(inputs.target_concentration, "target_concentration")?;

        let risk_per_client = |top3: Decimal| baseline.revenue * top3 / dec!(100) / MAJOR_CLIENTS;
        let current_risk = risk_per_client(current);
        let projected_risk = risk_per_client(target);
        let risk_reduction = current_risk - projected_risk;

        let current_discount = concentration_discount(current);
        let target_discount = concentration_discount(target);
        let discount_change = current_discount - target_discount;
        let value_impact = baseline.net_profit() * self.value_multiple * discount_change / dec!(100);

        let summary = format!(
            "Bringing top-three concentration from {} to {} cuts the revenue riding on each major client by {}. \
             A buyer's concentration discount moves from {} to {}, worth about {} of value.",
            format_value(current, ValueFormat::Percent),
            format_value(target, ValueFormat::Percent),
            format_compact(risk_reduction),
            format_value(current_discount, ValueFormat::Percent),
            format_value(target_discount, ValueFormat::Percent),
            format_compact(value_impact),
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Diversification,
            title: "Customer Diversification".to_string(),
            primary_metric: PrimaryMetric {
                label: "Risk Reduction per Major Client".to_string(),
                current: current_risk,
                projected: projected_risk,
                delta: risk_reduction,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Concentration Reduction",
                    current - target,
                    "Percentage points of revenue moved away from the top three",
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Valuation Discount Change",
                    discount_change,
                    format!(
                        "Buyer discount {} to {}",
                        format_value(current_discount, ValueFormat::Percent),
                        format_value(target_discount, ValueFormat::Percent)
                    ),
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Valuation Impact",
                    value_impact,
                    format!("On net profit at a {}x multiple", self.value_multiple),
                    ValueFormat::Currency,
                ),
            ],
            summary,
            how_to_achieve: steps(&[
                "Set a target share for any single client",
                "Market actively to new sectors",
                "Build referral partnerships",
                "Package services for smaller clients",
                "Put dedicated effort into business development",
                "Track concentration every quarter",
            ]),
            business_value_impact: value_impact,
            annual_profit_impact: Decimal::ZERO,
            impact_kind: ImpactKind::Valuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;

    fn run(target: Decimal) -> Result<ScenarioResult, ScenarioError> {
        let inputs = ScenarioInputs {
            target_concentration: Some(target),
            ..Default::default()
        };
        CustomerDiversification::new(&ScenarioAssumptions::default()).calculate(&baseline(), &inputs)
    }

    #[test]
    fn seventy_to_forty_five() {
        // revenue 6M keeps the per-client figures whole
        let mut client = baseline();
        client.revenue = dec!(6000000);
        let inputs = ScenarioInputs {
            target_concentration: Some(dec!(45)),
            ..Default::default()
        };
        let result = CustomerDiversification::new(&ScenarioAssumptions::default())
            .calculate(&client, &inputs)
            .unwrap();
        assert_eq!(result.primary_metric.current, dec!(1400000));
        assert_eq!(result.primary_metric.projected, dec!(900000));
        assert_eq!(result.primary_metric.delta, dec!(500000));
        // net profit 600k x 5 x 10%
        assert_eq!(result.business_value_impact, dec!(300000));
        assert_eq!(result.impact_kind, ImpactKind::Valuation);
    }

    #[test]
    fn lower_target_never_lowers_reduction() {
        let deltas: Vec<Decimal> = [dec!(70), dec!(60), dec!(45), dec!(20)]
            .into_iter()
            .map(|t| run(t).unwrap().primary_metric.delta)
            .collect();
        assert!(deltas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn discount_bands() {
        assert_eq!(concentration_discount(dec!(85)), dec!(25));
        assert_eq!(concentration_discount(dec!(60)), dec!(15));
        assert_eq!(concentration_discount(dec!(59.9)), dec!(5));
    }
}
