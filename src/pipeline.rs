use analytics::{AnalysisOptions, GapAnalyzer, GapReport, MarginOpportunity, margin_opportunity};
use anyhow::Context;
use baseline_resolver::{BaselineResolver, RawFinancials};
use configuration::Config;
use core_types::{BaselineMetrics, IndustryBenchmarkSet, metric_codes};
use scenarios::{ScenarioInputs, ScenarioResult, ScenarioTotals, ScenarioType, calculate_scenario};
use serde::{Deserialize, Serialize};
use valuation::{
    FinancialTrends, FounderRisk, OwnerAssessment, SurplusCashAnalysis, ValuationEngine, ValuationOutcome,
    ValuationRequest, YearFigures, analyse_trends, calculate_surplus_cash, detect_suppressors,
    identify_enhancers,
};

/// One client's confirmed data, as handed over by the surrounding application.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSnapshot {
    pub industry_code: String,
    pub financials: RawFinancials,
    /// Headline figures from earlier years, for the trend analysis.
    #[serde(default)]
    pub history: Vec<YearFigures>,
    pub benchmarks: IndustryBenchmarkSet,
    #[serde(default)]
    pub assessment: OwnerAssessment,
    /// Scenario targets. Missing ones fall back to the suggested defaults.
    #[serde(default)]
    pub scenario_inputs: Option<ScenarioInputs>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub industry_code: String,
    pub baseline: BaselineMetrics,
    /// Baseline fields that were derived or estimated rather than supplied.
    pub derived_fields: Vec<&'static str>,
    pub surplus_cash: Option<SurplusCashAnalysis>,
    pub trends: FinancialTrends,
    pub founder_risk: Option<FounderRisk>,
    pub gaps: GapReport,
    pub margin_opportunity: Option<MarginOpportunity>,
    pub valuation: ValuationOutcome,
    pub scenarios: Vec<ScenarioResult>,
    pub scenario_totals: ScenarioTotals,
}

/// Resolves the baseline and reads back the surplus cash figure onto it.
fn resolve_baseline(
    snapshot: &ClientSnapshot,
    config: &Config,
) -> anyhow::Result<(BaselineMetrics, Vec<&'static str>, Option<SurplusCashAnalysis>)> {
    let resolved = BaselineResolver::new()
        .resolve(&snapshot.financials)
        .context("Failed to resolve the client baseline")?;

    let surplus = match calculate_surplus_cash(&resolved.surplus_inputs, &config.surplus_cash) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            tracing::warn!(error = %e, "Surplus cash not calculated.");
            None
        }
    };

    let mut baseline = resolved.baseline.clone();
    if let Some(analysis) = &surplus {
        baseline.surplus_cash = Some(analysis.surplus_cash);
    }
    Ok((baseline, resolved.derived_fields(), surplus))
}

/// Merges the caller's targets over the suggested ones.
pub fn scenario_inputs(snapshot: &ClientSnapshot, baseline: &BaselineMetrics, config: &Config) -> ScenarioInputs {
    let founder_risk = snapshot.assessment.founder_risk().map(|risk| risk.score);
    let suggested = ScenarioInputs::suggested(
        baseline,
        &snapshot.benchmarks,
        &config.valuation.multiples,
        founder_risk,
    );
    let Some(given) = &snapshot.scenario_inputs else {
        return suggested;
    };
    ScenarioInputs {
        target_gross_margin: given.target_gross_margin.or(suggested.target_gross_margin),
        rate_increase_pct: given.rate_increase_pct.or(suggested.rate_increase_pct),
        retention_pct: given.retention_pct.or(suggested.retention_pct),
        target_debtor_days: given.target_debtor_days.or(suggested.target_debtor_days),
        target_revenue_per_employee: given
            .target_revenue_per_employee
            .or(suggested.target_revenue_per_employee),
        target_concentration: given.target_concentration.or(suggested.target_concentration),
        target_multiple: given.target_multiple.or(suggested.target_multiple),
        founder_risk_score: given.founder_risk_score.or(suggested.founder_risk_score),
    }
}

/// Runs the full benchmark analysis and valuation for one client.
#[tracing::instrument(skip_all, fields(industry = %snapshot.industry_code))]
pub fn run_analysis(snapshot: &ClientSnapshot, config: &Config) -> anyhow::Result<AnalysisReport> {
    let (baseline, derived_fields, surplus_cash) = resolve_baseline(snapshot, config)?;

    if let Err(e) = snapshot.benchmarks.validate() {
        tracing::warn!(error = %e, "Benchmark set failed validation; affected metrics will be skipped.");
    }
    let records = snapshot.benchmarks.records_for(&baseline.metric_values());
    let gaps = GapAnalyzer::with_options(AnalysisOptions {
        convert_days_to_cash: config.analysis.convert_days_to_cash,
    })
    .analyze(&records, baseline.revenue, baseline.employee_count);

    let margin_opportunity = match snapshot
        .benchmarks
        .get(metric_codes::GROSS_MARGIN)
        .and_then(|definition| definition.distribution.usable_median())
        .zip(config.analysis.recovery_factor(&snapshot.industry_code))
    {
        Some((median, recovery)) => {
            match margin_opportunity(baseline.gross_margin, median, baseline.revenue, recovery.factor) {
                Ok(opportunity) => opportunity,
                Err(e) => {
                    tracing::warn!(error = %e, "Margin opportunity not sized.");
                    None
                }
            }
        }
        None => None,
    };

    let trends = analyse_trends(&baseline, &snapshot.history);
    let founder_risk = snapshot.assessment.founder_risk();

    let suppressors = detect_suppressors(&snapshot.assessment, baseline.client_concentration);
    let enhancers = identify_enhancers(
        &baseline,
        &snapshot.assessment,
        surplus_cash.as_ref().map(|s| s.surplus_cash),
    );
    let engine = ValuationEngine::from_config(config).context("Invalid valuation settings")?;
    let valuation = engine.calculate(&ValuationRequest {
        baseline: &baseline,
        industry_code: &snapshot.industry_code,
        suppressors: &suppressors,
        enhancers: &enhancers,
        surplus_cash: None,
        trends: Some(&trends),
    });

    let inputs = scenario_inputs(snapshot, &baseline, config);
    let scenarios: Vec<ScenarioResult> = ScenarioType::OPERATIONAL
        .into_iter()
        .filter_map(|kind| match calculate_scenario(kind, &baseline, &inputs, &config.scenarios) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(scenario = %kind, error = %e, "Scenario skipped.");
                None
            }
        })
        .collect();
    let scenario_totals = ScenarioTotals::from_results(&scenarios);

    tracing::info!(
        gaps = gaps.gaps.len(),
        strengths = gaps.strengths.len(),
        valuation_available = valuation.is_available(),
        scenarios = scenarios.len(),
        "Analysis complete."
    );

    Ok(AnalysisReport {
        industry_code: snapshot.industry_code.clone(),
        baseline,
        derived_fields,
        surplus_cash,
        trends,
        founder_risk,
        gaps,
        margin_opportunity,
        valuation,
        scenarios,
        scenario_totals,
    })
}

/// Runs a single scenario, with `target` and `retention` overriding the inputs.
pub fn run_scenario(
    snapshot: &ClientSnapshot,
    config: &Config,
    kind: ScenarioType,
    target: Option<rust_decimal::Decimal>,
    retention: Option<rust_decimal::Decimal>,
) -> anyhow::Result<ScenarioResult> {
    let (baseline, _, _) = resolve_baseline(snapshot, config)?;
    let mut inputs = scenario_inputs(snapshot, &baseline, config);

    if let Some(target) = target {
        let slot = match kind {
            ScenarioType::Margin => &mut inputs.target_gross_margin,
            ScenarioType::Pricing => &mut inputs.rate_increase_pct,
            ScenarioType::Cash => &mut inputs.target_debtor_days,
            ScenarioType::Efficiency => &mut inputs.target_revenue_per_employee,
            ScenarioType::Diversification => &mut inputs.target_concentration,
            ScenarioType::Exit => &mut inputs.target_multiple,
        };
        *slot = Some(target);
    }
    if retention.is_some() {
        inputs.retention_pct = retention;
    }

    calculate_scenario(kind, &baseline, &inputs, &config.scenarios)
        .with_context(|| format!("The {kind} scenario could not be calculated"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use valuation::TrendMetric;
    use rust_decimal_macros::dec;

    fn demo() -> ClientSnapshot {
        serde_json::from_str(include_str!("../demos/client.json")).unwrap()
    }

    #[test]
    fn demo_client_runs_end_to_end() {
        let report = run_analysis(&demo(), &Config::default()).unwrap();

        assert_eq!(report.baseline.revenue, dec!(5000000));
        assert!(report.derived_fields.contains(&"ebitda"));
        assert!(report.surplus_cash.is_some());
        assert!(!report.gaps.gaps.is_empty());
        assert!(report.valuation.is_available());
        assert_eq!(report.scenarios.len(), 5);
        assert_eq!(report.scenario_totals.one_off_cash, report.scenarios[2].primary_metric.delta);
        assert!(report.trends.get(TrendMetric::GrossMargin).unwrap().recovering);
    }

    #[test]
    fn scored_founder_risk_replaces_the_neutral_default() {
        let snapshot = demo();
        let (baseline, _, _) = resolve_baseline(&snapshot, &Config::default()).unwrap();
        let inputs = scenario_inputs(&snapshot, &baseline, &Config::default());
        // No successor 25, sales fails 12, 65% knowledge 10.
        assert_eq!(inputs.founder_risk_score, Some(dec!(47)));

        let mut anonymous = snapshot.clone();
        anonymous.assessment = OwnerAssessment::default();
        let inputs = scenario_inputs(&anonymous, &baseline, &Config::default());
        assert_eq!(inputs.founder_risk_score, Some(dec!(50)));
    }

    #[test]
    fn zero_revenue_degrades_instead_of_failing() {
        let mut snapshot = demo();
        snapshot.financials = snapshot
            .financials
            .with("turnover", dec!(0))
            .with("gross_margin", dec!(40))
            .with("net_margin", dec!(9));

        let report = run_analysis(&snapshot, &Config::default()).unwrap();

        assert_eq!(report.baseline.revenue, Decimal::ZERO);
        assert!(report.margin_opportunity.is_none());
        assert!(!report.valuation.is_available());
        assert!(report.scenarios.is_empty());
        assert_eq!(report.scenario_totals, ScenarioTotals::default());
    }

    #[test]
    fn given_targets_win_over_suggestions() {
        let snapshot = demo();
        let (baseline, _, _) = resolve_baseline(&snapshot, &Config::default()).unwrap();
        let inputs = scenario_inputs(&snapshot, &baseline, &Config::default());
        assert_eq!(inputs.target_gross_margin, Some(dec!(44)));
        assert_eq!(inputs.retention_pct, Some(dec!(92)));
        assert_eq!(inputs.rate_increase_pct, Some(dec!(5)));
    }

    #[test]
    fn cli_target_overrides_the_scenario_input() {
        let result = run_scenario(&demo(), &Config::default(), ScenarioType::Margin, Some(dec!(45)), None).unwrap();
        assert_eq!(result.primary_metric.delta, dec!(250000));
    }
}
