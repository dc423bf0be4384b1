use crate::format::{format_compact, format_value};
use crate::inputs::require;
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Projects the cash released by collecting from debtors faster.
///
/// The released cash arrives once. Its annual effect is only the interest it saves.
pub struct CashOptimisation {
    borrowing_rate_pct: Decimal,
}

impl CashOptimisation {
    pub fn new(assumptions: &ScenarioAssumptions) -> Self {
        Self {
            borrowing_rate_pct: assumptions.borrowing_rate_pct,
        }
    }
}

impl Scenario for CashOptimisation {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Cash
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        let current_days = baseline
            .debtor_days
            .ok_or_else(|| ScenarioError::InvalidBaseline("debtor days are unknown".to_string()))?;
        let target_days = require(inputs.target_debtor_days, "target_debtor_days")?;
        if target_days < Decimal::ZERO {
            return Err(ScenarioError::InvalidInput(format!(
                "target_debtor_days cannot be negative, got {target_days}"
            )));
        }

        let daily_revenue = baseline.revenue / DAYS_PER_YEAR;
        let current_debtors = daily_revenue * current_days;
        let projected_debtors = daily_revenue * target_days;
        let released = current_debtors - projected_debtors;
        let interest_saving = released * self.borrowing_rate_pct / dec!(100);
        let days_improvement = current_days - target_days;

        let summary = format!(
            "Collecting in {} instead of {} releases {} of cash once. \
             At a {} borrowing rate that saves about {} a year in interest.",
            format_value(target_days, ValueFormat::Days),
            format_value(current_days, ValueFormat::Days),
            format_compact(released),
            format_value(self.borrowing_rate_pct, ValueFormat::Percent),
            format_compact(interest_saving),
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Cash,
            title: "Cash Optimisation".to_string(),
            primary_metric: PrimaryMetric {
                label: "Working Capital Released".to_string(),
                current: current_debtors,
                projected: projected_debtors,
                delta: released,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Annual Interest Saving",
                    interest_saving,
                    format!("At {} cost of borrowing", format_value(self.borrowing_rate_pct, ValueFormat::Percent)),
                    ValueFormat::Currency,
                ),
                SecondaryMetric::new(
                    "Days Improvement",
                    days_improvement,
                    "Reduction in debtor days",
                    ValueFormat::Days,
                ),
            ],
            summary,
            how_to_achieve: steps(&[
                "Invoice as soon as work is delivered",
                "Offer a small discount for early payment",
                "Automate payment reminders",
                "Tighten payment terms on new contracts",
                "Take deposits on larger projects",
                "Chase overdue accounts weekly",
                "Use direct debit for recurring fees",
            ]),
            business_value_impact: released,
            annual_profit_impact: Decimal::ZERO,
            impact_kind: ImpactKind::OneOffCash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;

    fn run(target: Decimal) -> Result<ScenarioResult, ScenarioError> {
        let inputs = ScenarioInputs {
            target_debtor_days: Some(target),
            ..Default::default()
        };
        CashOptimisation::new(&ScenarioAssumptions::default()).calculate(&baseline(), &inputs)
    }

    #[test]
    fn releases_cash_once() {
        // revenue 7.3M => 20k a day; 60 -> 45 days
        let mut client = baseline();
        client.revenue = dec!(7300000);
        let inputs = ScenarioInputs {
            target_debtor_days: Some(dec!(45)),
            ..Default::default()
        };
        let result = CashOptimisation::new(&ScenarioAssumptions::default())
            .calculate(&client, &inputs)
            .unwrap();
        assert_eq!(result.primary_metric.delta, dec!(300000));
        assert_eq!(result.secondary_metrics[0].impact, dec!(24000));
        assert_eq!(result.secondary_metrics[1].impact, dec!(15));
        assert_eq!(result.impact_kind, ImpactKind::OneOffCash);
        assert_eq!(result.annual_profit_impact, Decimal::ZERO);
    }

    #[test]
    fn lower_target_never_lowers_release() {
        let released: Vec<Decimal> = [dec!(60), dec!(45), dec!(30), dec!(14)]
            .into_iter()
            .map(|t| run(t).unwrap().primary_metric.delta)
            .collect();
        assert!(released.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unknown_debtor_days_cannot_be_projected() {
        let mut client = baseline();
        client.debtor_days = None;
        let inputs = ScenarioInputs {
            target_debtor_days: Some(dec!(30)),
            ..Default::default()
        };
        assert!(matches!(
            CashOptimisation::new(&ScenarioAssumptions::default()).calculate(&client, &inputs),
            Err(ScenarioError::InvalidBaseline(_))
        ));
    }
}
