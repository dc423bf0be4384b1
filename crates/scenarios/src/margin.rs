use crate::format::{format_compact, format_value};
use crate::inputs::require_percent;
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Projects the profit from lifting gross margin to a target.
///
/// The additional gross profit is assumed to flow straight to net profit, as the
/// cost base does not move with the margin.
pub struct MarginImprovement {
    value_multiple: Decimal,
}

impl MarginImprovement {
    pub fn new(assumptions: &ScenarioAssumptions) -> Self {
        Self {
            value_multiple: assumptions.value_multiple,
        }
    }
}

impl Scenario for MarginImprovement {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Margin
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        let target = require_percent(inputs.target_gross_margin, "target_gross_margin")?;
        let current = baseline.gross_margin;

        let current_profit = baseline.gross_profit();
        let projected_profit = baseline.revenue * target / dec!(100);
        let delta = projected_profit - current_profit;
        let value_impact = delta * self.value_multiple;

        let summary = format!(
            "Moving gross margin from {} to {} adds {} of gross profit a year. \
             With the cost base unchanged all of it reaches net profit, worth about {} at a {}x multiple.",
            format_value(current, ValueFormat::Percent),
            format_value(target, ValueFormat::Percent),
            format_compact(delta),
            format_compact(value_impact),
            self.value_multiple,
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Margin,
            title: "Margin Improvement".to_string(),
            primary_metric: PrimaryMetric {
                label: "Additional Gross Profit".to_string(),
                current: current_profit,
                projected: projected_profit,
                delta,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Margin Change",
                    target - current,
                    "Percentage points of gross margin gained",
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Net Profit Impact",
                    delta,
                    "Assumes the full gross profit gain reaches net profit",
                    ValueFormat::Currency,
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
                "Review pricing on your lowest-margin services or products",
                "Cut delivery costs through process efficiency",
                "Renegotiate supplier and subcontractor terms",
                "Shift the mix towards higher-margin work",
                "Raise utilisation of billable staff",
                "Stop or reprice unprofitable client relationships",
            ]),
            business_value_impact: value_impact,
            annual_profit_impact: delta,
            impact_kind: ImpactKind::RecurringProfit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;

    fn run(target: Decimal) -> ScenarioResult {
        let inputs = ScenarioInputs {
            target_gross_margin: Some(target),
            ..Default::default()
        };
        MarginImprovement::new(&ScenarioAssumptions::default())
            .calculate(&baseline(), &inputs)
            .unwrap()
    }

    #[test]
    fn five_points_on_five_million() {
        let result = run(dec!(45));
        assert_eq!(result.primary_metric.current, dec!(2000000));
        assert_eq!(result.primary_metric.delta, dec!(250000));
        assert_eq!(result.annual_profit_impact, dec!(250000));
        assert_eq!(result.business_value_impact, dec!(1250000));
        assert_eq!(result.impact_kind, ImpactKind::RecurringProfit);
        assert!(result.summary.contains("250k"));
    }

    #[test]
    fn higher_target_never_lowers_delta() {
        let deltas: Vec<Decimal> = [dec!(30), dec!(40), dec!(42.5), dec!(60)]
            .into_iter()
            .map(|t| run(t).primary_metric.delta)
            .collect();
        assert!(deltas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn target_is_required_and_bounded() {
        let scenario = MarginImprovement::new(&ScenarioAssumptions::default());
        assert_eq!(
            scenario.calculate(&baseline(), &ScenarioInputs::default()),
            Err(ScenarioError::MissingRequiredInput("target_gross_margin"))
        );
        let inputs = ScenarioInputs {
            target_gross_margin: Some(dec!(120)),
            ..Default::default()
        };
        assert!(matches!(
            scenario.calculate(&baseline(), &inputs),
            Err(ScenarioError::InvalidInput(_))
        ));
    }
}
