use crate::result::{ImpactKind, ScenarioResult, ScenarioType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scenario results summed by kind of value.
///
/// The three figures mean different things and are never added to each other.
/// The exit preview is left out: it restates the whole value rather than adding to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTotals {
    pub annual_profit: Decimal,
    pub one_off_cash: Decimal,
    pub valuation_uplift: Decimal,
}

impl ScenarioTotals {
    pub fn from_results(results: &[ScenarioResult]) -> Self {
        results
            .iter()
            .filter(|r| r.scenario_type != ScenarioType::Exit)
            .fold(Self::default(), |mut totals, r| {
                match r.impact_kind {
                    ImpactKind::RecurringProfit => totals.annual_profit += r.annual_profit_impact,
                    ImpactKind::OneOffCash => totals.one_off_cash += r.primary_metric.delta,
                    ImpactKind::Valuation => totals.valuation_uplift += r.business_value_impact,
                }
                totals
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;
    use crate::{ScenarioInputs, calculate_scenario};
    use configuration::ScenarioAssumptions;
    use rust_decimal_macros::dec;

    #[test]
    fn kinds_stay_separate() {
        let inputs = ScenarioInputs {
            target_gross_margin: Some(dec!(45)),
            rate_increase_pct: Some(dec!(5)),
            retention_pct: Some(dec!(95)),
            target_debtor_days: Some(dec!(60)),
            target_concentration: Some(dec!(70)),
            target_multiple: Some(dec!(5)),
            founder_risk_score: Some(dec!(50)),
            ..Default::default()
        };
        let assumptions = ScenarioAssumptions::default();
        let results: Vec<ScenarioResult> = [
            ScenarioType::Margin,
            ScenarioType::Pricing,
            ScenarioType::Cash,
            ScenarioType::Diversification,
            ScenarioType::Exit,
        ]
        .into_iter()
        .map(|kind| calculate_scenario(kind, &baseline(), &inputs, &assumptions).unwrap())
        .collect();

        let totals = ScenarioTotals::from_results(&results);
        assert_eq!(totals.annual_profit, dec!(487500));
        assert_eq!(totals.one_off_cash, dec!(0));
        assert_eq!(totals.valuation_uplift, dec!(0));
    }
}
