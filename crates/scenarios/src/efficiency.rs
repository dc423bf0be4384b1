use crate::format::{format_compact, format_value};
use crate::inputs::require;
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Projects the revenue the current team could carry at a higher revenue per employee.
pub struct EfficiencyGains {
    cost_per_head: Decimal,
}

impl EfficiencyGains {
    pub fn new(assumptions: &ScenarioAssumptions) -> Self {
        Self {
            cost_per_head: assumptions.cost_per_head,
        }
    }
}

impl Scenario for EfficiencyGains {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Efficiency
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        if baseline.employee_count == 0 {
            return Err(ScenarioError::InvalidBaseline("employee count is zero".to_string()));
        }
        let target_rpe = require(inputs.target_revenue_per_employee, "target_revenue_per_employee")?;
        if target_rpe <= Decimal::ZERO {
            return Err(ScenarioError::InvalidInput(format!(
                "target_revenue_per_employee must be positive, got {target_rpe}"
            )));
        }

        let employees = Decimal::from(baseline.employee_count);
        let current_rpe = if baseline.revenue_per_employee > Decimal::ZERO {
            baseline.revenue_per_employee
        } else {
            baseline.revenue / employees
        };

        let capacity = (target_rpe - current_rpe) * employees;
        let additional_profit = capacity * baseline.net_margin / dec!(100);

        // Headcount needed to deliver today's revenue at the target rate.
        let needed = (baseline.revenue / target_rpe).ceil();
        let headcount_saved = (employees - needed).max(Decimal::ZERO);
        let cost_saving = headcount_saved * self.cost_per_head;
        let efficiency_pct = (target_rpe / current_rpe - Decimal::ONE) * dec!(100);

        let summary = format!(
            "At {} per employee the current team of {} could deliver {} more revenue, \
             adding about {} of profit at today's net margin. \
             Alternatively today's revenue would need {} fewer people, saving {} a year.",
            format_compact(target_rpe),
            baseline.employee_count,
            format_compact(capacity),
            format_compact(additional_profit),
            headcount_saved,
            format_compact(cost_saving),
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Efficiency,
            title: "Efficiency Gains".to_string(),
            primary_metric: PrimaryMetric {
                label: "Revenue Capacity Unlocked".to_string(),
                current: baseline.revenue,
                projected: baseline.revenue + capacity,
                delta: capacity,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Additional Profit",
                    additional_profit,
                    format!("At the current {} net margin", format_value(baseline.net_margin, ValueFormat::Percent)),
                    ValueFormat::Currency,
                ),
                SecondaryMetric::new(
                    "Equivalent Cost Saving",
                    cost_saving,
                    format!("{headcount_saved} fewer heads at {} each", format_compact(self.cost_per_head)),
                    ValueFormat::Currency,
                ),
                SecondaryMetric::new(
                    "Efficiency Improvement",
                    efficiency_pct,
                    "Increase in revenue per employee",
                    ValueFormat::Percent,
                ),
            ],
            summary,
            how_to_achieve: steps(&[
                "Automate repetitive administrative work",
                "Standardise delivery processes",
                "Invest in training to raise output",
                "Review roles for overlap",
                "Adopt better project management tooling",
                "Measure and manage utilisation",
                "Outsource non-core functions",
            ]),
            business_value_impact: additional_profit,
            annual_profit_impact: additional_profit,
            impact_kind: ImpactKind::RecurringProfit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;

    fn run(target: Decimal) -> Result<ScenarioResult, ScenarioError> {
        let inputs = ScenarioInputs {
            target_revenue_per_employee: Some(target),
            ..Default::default()
        };
        EfficiencyGains::new(&ScenarioAssumptions::default()).calculate(&baseline(), &inputs)
    }

    #[test]
    fn capacity_profit_and_headcount() {
        // 25 people at 200k; target 250k
        let result = run(dec!(250000)).unwrap();
        assert_eq!(result.primary_metric.delta, dec!(1250000));
        assert_eq!(result.secondary_metrics[0].impact, dec!(125000));
        // 5M / 250k = 20 people, so 5 heads at 55k
        assert_eq!(result.secondary_metrics[1].impact, dec!(275000));
        assert_eq!(result.secondary_metrics[2].impact, dec!(25));
        assert_eq!(result.annual_profit_impact, dec!(125000));
    }

    #[test]
    fn higher_target_never_lowers_capacity() {
        let deltas: Vec<Decimal> = [dec!(150000), dec!(200000), dec!(230000), dec!(300000)]
            .into_iter()
            .map(|t| run(t).unwrap().primary_metric.delta)
            .collect();
        assert!(deltas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn non_positive_target_is_invalid() {
        assert!(matches!(run(Decimal::ZERO), Err(ScenarioError::InvalidInput(_))));
    }
}
