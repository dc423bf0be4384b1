use crate::format::{format_compact, format_value};
use crate::inputs::{require, require_percent};
use crate::result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric, steps};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::{DEFAULT_INDUSTRY, IndustryMultiple, IndustryMultiples};
use core_types::{BaselineMetrics, ValueFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use valuation::baseline_value;

fn concentration_discount(top3: Option<Decimal>) -> Decimal {
    match top3 {
        Some(top3) if top3 >= dec!(60) => dec!(15),
        _ => dec!(5),
    }
}

fn founder_discount(risk: Decimal) -> Decimal {
    if risk >= dec!(60) {
        dec!(25)
    } else if risk >= dec!(40) {
        dec!(15)
    } else {
        dec!(5)
    }
}

/// A quick indicative value at a chosen multiple.
///
/// Only the two discounts every buyer asks about are applied: customer
/// concentration and founder risk. The full suppressor pass belongs to the
/// valuation engine.
#[derive(Default)]
pub struct ExitReadinessPreview;

impl ExitReadinessPreview {
    pub fn new() -> Self {
        Self
    }
}

impl Scenario for ExitReadinessPreview {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::Exit
    }

    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError> {
        let multiple = require(inputs.target_multiple, "target_multiple")?;
        if multiple <= Decimal::ZERO {
            return Err(ScenarioError::InvalidInput(format!(
                "target_multiple must be positive, got {multiple}"
            )));
        }
        let founder_risk = require_percent(inputs.founder_risk_score, "founder_risk_score")?;

        let table = IndustryMultiples(BTreeMap::from([(
            DEFAULT_INDUSTRY.to_string(),
            IndustryMultiple::new(multiple, multiple, multiple, &[]),
        )]));
        let valued = baseline_value(baseline, DEFAULT_INDUSTRY, &table, None)?;

        let concentration_pct = concentration_discount(baseline.client_concentration);
        let founder_pct = founder_discount(founder_risk);
        let retained = (Decimal::ONE - concentration_pct / dec!(100)) * (Decimal::ONE - founder_pct / dec!(100));
        let operating_value = valued.base_value.mid;
        let adjusted = valued.enterprise_value.mid * retained;

        let summary = format!(
            "At {}x EBITDA of {} the business is worth about {} before discounts. \
             Allowing {} for customer concentration and {} for founder risk gives an indicative {}.",
            multiple,
            format_compact(valued.ebitda),
            format_compact(valued.enterprise_value.mid),
            format_value(concentration_pct, ValueFormat::Percent),
            format_value(founder_pct, ValueFormat::Percent),
            format_compact(adjusted),
        );

        Ok(ScenarioResult {
            scenario_type: ScenarioType::Exit,
            title: "Exit Readiness".to_string(),
            primary_metric: PrimaryMetric {
                label: "Estimated Business Value".to_string(),
                current: valued.enterprise_value.mid,
                projected: adjusted,
                delta: adjusted,
                format: ValueFormat::Currency,
            },
            secondary_metrics: vec![
                SecondaryMetric::new(
                    "Operating Value",
                    operating_value,
                    format!("EBITDA at {multiple}x"),
                    ValueFormat::Currency,
                ),
                SecondaryMetric::new(
                    "Concentration Discount",
                    concentration_pct,
                    "Applied for reliance on the top three clients",
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Founder Risk Discount",
                    founder_pct,
                    "Applied for dependence on the owner",
                    ValueFormat::Percent,
                ),
                SecondaryMetric::new(
                    "Surplus Cash",
                    valued.surplus_cash,
                    "Part of the value the discounts apply to",
                    ValueFormat::Currency,
                ),
            ],
            summary,
            how_to_achieve: steps(&[
                "Reduce reliance on the founder for sales and delivery",
                "Document the key processes",
                "Build a capable second tier of management",
                "Grow recurring revenue",
                "Diversify the client base",
                "Keep financial records clean and audited",
            ]),
            business_value_impact: adjusted,
            annual_profit_impact: Decimal::ZERO,
            impact_kind: ImpactKind::Valuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::baseline;

    fn run(multiple: Decimal, founder_risk: Decimal) -> Result<ScenarioResult, ScenarioError> {
        let inputs = ScenarioInputs {
            target_multiple: Some(multiple),
            founder_risk_score: Some(founder_risk),
            ..Default::default()
        };
        ExitReadinessPreview::new().calculate(&baseline(), &inputs)
    }

    #[test]
    fn quick_discounts_compound() {
        // 750k EBITDA x 6 = 4.5M; concentration 70 => 15%, founder 50 => 15%
        let result = run(dec!(6), dec!(50)).unwrap();
        assert_eq!(result.primary_metric.current, dec!(4600000));
        // (4.5M + 100k surplus) x 0.85 x 0.85
        assert_eq!(result.primary_metric.delta, dec!(3323500));
        assert_eq!(result.secondary_metrics.len(), 4);
    }

    #[test]
    fn higher_multiple_never_lowers_value() {
        let values: Vec<Decimal> = [dec!(3), dec!(5), dec!(7.5)]
            .into_iter()
            .map(|m| run(m, dec!(30)).unwrap().primary_metric.delta)
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn needs_positive_ebitda() {
        let mut client = baseline();
        client.ebitda = None;
        let inputs = ScenarioInputs {
            target_multiple: Some(dec!(5)),
            founder_risk_score: Some(dec!(50)),
            ..Default::default()
        };
        assert!(matches!(
            ExitReadinessPreview::new().calculate(&client, &inputs),
            Err(ScenarioError::InvalidBaseline(_))
        ));
    }
}
