use configuration::Config;
use core_types::{BaselineMetrics, SurplusCashInputs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use valuation::{
    OwnerAssessment, ValuationEngine, ValuationOutcome, ValuationRequest, Verdict,
    calculate_surplus_cash, detect_suppressors, identify_enhancers,
};

fn baseline() -> BaselineMetrics {
    BaselineMetrics {
        revenue: dec!(6000000),
        gross_margin: dec!(38),
        net_margin: dec!(9),
        ebitda: Some(dec!(900000)),
        employee_count: 30,
        revenue_per_employee: dec!(200000),
        debtor_days: Some(dec!(55)),
        creditor_days: Some(dec!(30)),
        client_concentration: Some(dec!(72)),
        surplus_cash: None,
        revenue_growth: Some(dec!(2)),
        period_end: None,
    }
}

#[test]
fn assessment_to_valuation_end_to_end() {
    let config = Config::default();
    let baseline = baseline();
    let assessment = OwnerAssessment {
        knowledge_dependency_pct: Some(dec!(65)),
        has_successor: Some(false),
        recurring_revenue_pct: Some(dec!(20)),
        team_advocacy_pct: Some(dec!(85)),
        ..Default::default()
    };

    let surplus = calculate_surplus_cash(
        &SurplusCashInputs {
            actual_cash: Some(dec!(1500000)),
            staff_costs: Some(dec!(2400000)),
            admin_expenses: Some(dec!(600000)),
            debtors: Some(dec!(900000)),
            creditors: Some(dec!(400000)),
            revenue: Some(baseline.revenue),
            ..Default::default()
        },
        &config.surplus_cash,
    )
    .unwrap();
    // buffer 750,000 + WCR 500,000 = 1,250,000 required
    assert_eq!(surplus.surplus_cash, dec!(250000));

    let suppressors = detect_suppressors(&assessment, baseline.client_concentration);
    let enhancers = identify_enhancers(&baseline, &assessment, Some(surplus.surplus_cash));
    let engine = ValuationEngine::from_config(&config).unwrap();
    let outcome = engine.calculate(&ValuationRequest {
        baseline: &baseline,
        industry_code: "IT_SERVICES",
        suppressors: &suppressors,
        enhancers: &enhancers,
        surplus_cash: Some(surplus.surplus_cash),
        trends: None,
    });

    let analysis = match outcome {
        ValuationOutcome::Available(analysis) => analysis,
        ValuationOutcome::Unavailable(u) => panic!("unexpected: {}", u.reason),
    };

    // 900,000 x 7 + 250,000
    assert_eq!(analysis.baseline.enterprise_value.mid, dec!(6550000));
    assert_eq!(analysis.suppressors.len(), 4);
    assert_eq!(analysis.suppressors[0].id, "succession_gap");
    assert!(analysis.aggregate_discount.percent_range.mid < dec!(100));
    assert!(analysis.current_market_value.mid <= analysis.baseline.enterprise_value.mid);
    assert!(analysis.current_market_value.low <= analysis.current_market_value.high);
    assert_eq!(
        analysis.current_market_value.mid + analysis.value_gap.mid,
        analysis.baseline.enterprise_value.mid
    );
    assert_eq!(analysis.path_to_value.timeframe_months, 24);
    assert!(analysis.path_to_value.recoverable_value.mid <= analysis.value_gap.mid);
    assert_ne!(analysis.exit_readiness.verdict, Verdict::Ready);
    assert!(analysis.exit_readiness.strengths.contains(&"Strong Team Culture".to_string()));

    let json = serde_json::to_value(ValuationOutcome::Available(analysis)).unwrap();
    assert_eq!(json["status"], "available");
}

#[test]
fn loss_making_business_is_unavailable() {
    let mut baseline = baseline();
    baseline.ebitda = Some(Decimal::ZERO);
    let engine = ValuationEngine::from_config(&Config::default()).unwrap();
    let outcome = engine.calculate(&ValuationRequest {
        baseline: &baseline,
        industry_code: "IT_SERVICES",
        suppressors: &[],
        enhancers: &[],
        surplus_cash: None,
        trends: None,
    });
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "unavailable");
    assert!(outcome.analysis().is_none());
}
