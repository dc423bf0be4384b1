use configuration::{IndustryMultiples, ScenarioAssumptions};
use core_types::{BaselineMetrics, IndustryBenchmarkSet};
use rust_decimal_macros::dec;
use scenarios::{ImpactKind, ScenarioInputs, ScenarioTotals, ScenarioType, calculate_scenario};

fn client() -> BaselineMetrics {
    BaselineMetrics {
        revenue: dec!(5000000),
        gross_margin: dec!(40),
        net_margin: dec!(8),
        ebitda: Some(dec!(600000)),
        employee_count: 40,
        revenue_per_employee: dec!(125000),
        debtor_days: Some(dec!(55)),
        creditor_days: None,
        client_concentration: Some(dec!(65)),
        surplus_cash: None,
        revenue_growth: Some(dec!(4)),
        period_end: None,
    }
}

#[test]
fn suggested_inputs_run_every_scenario() {
    let baseline = client();
    let inputs = ScenarioInputs::suggested(
        &baseline,
        &IndustryBenchmarkSet::new("PROFESSIONAL_SERVICES"),
        &IndustryMultiples::default(),
        None,
    );
    let assumptions = ScenarioAssumptions::default();

    let results: Vec<_> = ScenarioType::ALL
        .into_iter()
        .map(|kind| calculate_scenario(kind, &baseline, &inputs, &assumptions).unwrap())
        .collect();

    for result in &results {
        assert!((2..=4).contains(&result.secondary_metrics.len()), "{}", result.title);
        assert!(result.displayed_actions().len() <= 4);
        assert!(!result.how_to_achieve.is_empty());
    }

    let margin = &results[0];
    assert_eq!(margin.primary_metric.delta, dec!(250000));
    assert_eq!(results[2].impact_kind, ImpactKind::OneOffCash);

    let totals = ScenarioTotals::from_results(&results);
    let recurring: rust_decimal::Decimal = results
        .iter()
        .filter(|r| r.impact_kind == ImpactKind::RecurringProfit)
        .map(|r| r.annual_profit_impact)
        .sum();
    assert_eq!(totals.annual_profit, recurring);
    assert_eq!(totals.one_off_cash, results[2].primary_metric.delta);
    assert_eq!(totals.valuation_uplift, results[4].business_value_impact);
}

#[test]
fn results_serialise_with_snake_case_tags() {
    let inputs = ScenarioInputs {
        target_debtor_days: Some(dec!(40)),
        ..Default::default()
    };
    let result = calculate_scenario(ScenarioType::Cash, &client(), &inputs, &ScenarioAssumptions::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["scenario_type"], "cash");
    assert_eq!(json["impact_kind"], "one_off_cash");
    assert_eq!(json["primary_metric"]["format"], "currency");
}

#[test]
fn missing_target_is_reported_by_name() {
    let err = calculate_scenario(
        ScenarioType::Efficiency,
        &client(),
        &ScenarioInputs::default(),
        &ScenarioAssumptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Scenario requires input 'target_revenue_per_employee'");
}
