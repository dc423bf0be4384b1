use configuration::IndustryMultiples;
use core_types::{BaselineMetrics, IndustryBenchmarkSet, metric_codes};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const NEUTRAL_FOUNDER_RISK: Decimal = dec!(50);

/// Targets for the what-if scenarios. Each scenario reads only the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInputs {
    /// Gross margin to reach, 0-100.
    pub target_gross_margin: Option<Decimal>,
    /// Price increase, percent.
    pub rate_increase_pct: Option<Decimal>,
    /// Share of clients kept after the increase, 0-100.
    pub retention_pct: Option<Decimal>,
    pub target_debtor_days: Option<Decimal>,
    pub target_revenue_per_employee: Option<Decimal>,
    /// Top-three client share to reach, 0-100.
    pub target_concentration: Option<Decimal>,
    pub target_multiple: Option<Decimal>,
    /// How dependent the business is on its founder, 0-100.
    pub founder_risk_score: Option<Decimal>,
}

impl ScenarioInputs {
    /// Sensible starting targets for a client.
    ///
    /// The margin target is five points up, capped at the benchmark median when the
    /// client is below it. The multiple is the industry mid. `founder_risk` is the
    /// scored founder dependency; a neutral 50 stands in when it is unknown.
    pub fn suggested(
        baseline: &BaselineMetrics,
        benchmarks: &IndustryBenchmarkSet,
        multiples: &IndustryMultiples,
        founder_risk: Option<Decimal>,
    ) -> Self {
        let current_margin = baseline.gross_margin;
        let stretch = current_margin + dec!(5);
        let target_gross_margin = match benchmarks
            .get(metric_codes::GROSS_MARGIN)
            .and_then(|b| b.distribution.usable_median())
        {
            Some(median) if median > current_margin => stretch.min(median),
            _ => stretch,
        };

        let target_debtor_days = baseline
            .debtor_days
            .map(|days| (days - dec!(15)).max(dec!(14)));
        let target_concentration = baseline
            .client_concentration
            .map(|top3| (top3 - dec!(20)).max(dec!(30)));
        let target_multiple = multiples
            .lookup(&benchmarks.industry_code)
            .map(|(_, row)| row.mid);

        Self {
            target_gross_margin: Some(target_gross_margin),
            rate_increase_pct: Some(dec!(5)),
            retention_pct: Some(dec!(95)),
            target_debtor_days,
            target_revenue_per_employee: Some(baseline.revenue_per_employee * dec!(1.15)),
            target_concentration,
            target_multiple,
            founder_risk_score: Some(founder_risk.unwrap_or(NEUTRAL_FOUNDER_RISK)),
        }
    }
}

pub(crate) fn require(value: Option<Decimal>, field: &'static str) -> Result<Decimal, crate::ScenarioError> {
    value.ok_or(crate::ScenarioError::MissingRequiredInput(field))
}

pub(crate) fn require_percent(value: Option<Decimal>, field: &'static str) -> Result<Decimal, crate::ScenarioError> {
    let pct = require(value, field)?;
    if pct < Decimal::ZERO || pct > dec!(100) {
        return Err(crate::ScenarioError::InvalidInput(format!(
            "{field} must be between 0 and 100, got {pct}"
        )));
    }
    Ok(pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{BenchmarkDefinition, BenchmarkDistribution, MetricUnit};

    fn baseline() -> BaselineMetrics {
        BaselineMetrics {
            revenue: dec!(5000000),
            gross_margin: dec!(40),
            net_margin: dec!(10),
            ebitda: Some(dec!(600000)),
            employee_count: 25,
            revenue_per_employee: dec!(200000),
            debtor_days: Some(dec!(25)),
            creditor_days: None,
            client_concentration: Some(dec!(70)),
            surplus_cash: None,
            revenue_growth: None,
            period_end: None,
        }
    }

    #[test]
    fn suggestions_follow_the_product_defaults() {
        let benchmarks = IndustryBenchmarkSet::new("IT_SERVICES").with_metric(
            metric_codes::GROSS_MARGIN,
            BenchmarkDefinition {
                name: "Gross Margin".to_string(),
                unit: MetricUnit::Percent,
                higher_is_better: true,
                distribution: BenchmarkDistribution::new(dec!(35), dec!(43), dec!(50)),
            },
        );
        let inputs = ScenarioInputs::suggested(&baseline(), &benchmarks, &IndustryMultiples::default(), Some(dec!(47)));

        assert_eq!(inputs.target_gross_margin, Some(dec!(43)));
        assert_eq!(inputs.target_debtor_days, Some(dec!(14)));
        assert_eq!(inputs.target_revenue_per_employee, Some(dec!(230000)));
        assert_eq!(inputs.target_concentration, Some(dec!(50)));
        assert_eq!(inputs.target_multiple, Some(dec!(7)));
        assert_eq!(inputs.retention_pct, Some(dec!(95)));
        assert_eq!(inputs.founder_risk_score, Some(dec!(47)));
    }

    #[test]
    fn margin_above_median_still_stretches() {
        let inputs = ScenarioInputs::suggested(
            &baseline(),
            &IndustryBenchmarkSet::new("UNKNOWN"),
            &IndustryMultiples::default(),
            None,
        );
        assert_eq!(inputs.target_gross_margin, Some(dec!(45)));
        assert_eq!(inputs.target_multiple, Some(dec!(5)));
        assert_eq!(inputs.founder_risk_score, Some(dec!(50)));
    }
}
