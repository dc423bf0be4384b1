use crate::pipeline::AnalysisReport;
use analytics::{MetricComparison, PositionBand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use core_types::{MetricUnit, ValueFormat};
use rust_decimal::Decimal;
use scenarios::{ScenarioResult, format_compact, format_value};
use valuation::ValuationOutcome;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn unit_value(value: Decimal, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Percent => format_value(value, ValueFormat::Percent),
        MetricUnit::Days => format_value(value, ValueFormat::Days),
        MetricUnit::Currency => format_compact(value),
        MetricUnit::Ratio | MetricUnit::Number => value.round_dp(2).to_string(),
    }
}

fn band_label(band: PositionBand) -> &'static str {
    match band {
        PositionBand::TopQuartile => "top quartile",
        PositionBand::AboveMedian => "above median",
        PositionBand::BelowMedian => "below median",
        PositionBand::BottomQuartile => "bottom quartile",
    }
}

fn comparison_row(kind: &str, metric: &MetricComparison) -> Vec<Cell> {
    vec![
        Cell::new(kind),
        Cell::new(&metric.name),
        Cell::new(unit_value(metric.client_value, metric.unit)),
        Cell::new(unit_value(metric.benchmark_median, metric.unit)),
        Cell::new(metric.percentile.round_dp(0)),
        Cell::new(band_label(metric.band)),
        Cell::new(metric.impact.map(format_compact).unwrap_or_default()),
        Cell::new(metric.cash_release.map(format_compact).unwrap_or_default()),
    ]
}

pub fn print_analysis(report: &AnalysisReport) {
    println!("Benchmark analysis for {}", report.industry_code);
    if !report.derived_fields.is_empty() {
        println!("Derived or estimated: {}", report.derived_fields.join(", "));
    }

    let mut metrics = new_table(vec!["", "Metric", "Client", "Median", "Percentile", "Position", "Annual", "Cash"]);
    for gap in &report.gaps.gaps {
        metrics.add_row(comparison_row("gap", gap));
    }
    for strength in &report.gaps.strengths {
        metrics.add_row(comparison_row("strength", strength));
    }
    println!("{metrics}");
    for skipped in &report.gaps.skipped {
        println!("Skipped {}: {}", skipped.code, skipped.reason);
    }
    println!(
        "Annual opportunity: {}  One-off cash: {}",
        format_compact(report.gaps.total_annual_opportunity),
        format_compact(report.gaps.one_off_cash_opportunity)
    );
    if let Some(opportunity) = &report.margin_opportunity {
        for step in &opportunity.steps {
            println!("  {step}");
        }
    }

    for trend in &report.trends.trends {
        println!("Trend: {}", trend.narrative);
    }
    if let Some(risk) = &report.founder_risk {
        println!("Founder risk: {}/100 ({})", risk.score, risk.level);
        for signal in &risk.signals {
            println!("  {} (+{})", signal.signal, signal.points);
        }
    }

    match &report.valuation {
        ValuationOutcome::Available(analysis) => {
            let mut bridge = new_table(vec!["", "Low", "Mid", "High"]);
            let rows = [
                ("Enterprise value", analysis.baseline.enterprise_value),
                ("Current market value", analysis.current_market_value),
                ("Value gap", analysis.value_gap),
                ("Potential value", analysis.potential_value),
            ];
            for (label, estimate) in rows {
                bridge.add_row(vec![
                    Cell::new(label),
                    Cell::new(format_compact(estimate.low)),
                    Cell::new(format_compact(estimate.mid)),
                    Cell::new(format_compact(estimate.high)),
                ]);
            }
            println!("{bridge}");

            let mut suppressors = new_table(vec!["Suppressor", "Severity", "Discount", "Impact"]);
            for s in &analysis.suppressors {
                suppressors.add_row(vec![
                    Cell::new(&s.name),
                    Cell::new(s.severity),
                    Cell::new(format!("{}-{}%", s.discount_percent.low, s.discount_percent.high)),
                    Cell::new(format_compact(s.impact_amount.mid())),
                ]);
            }
            println!("{suppressors}");

            let readiness = &analysis.exit_readiness;
            println!("Exit readiness: {} ({})", readiness.score, readiness.verdict);
            for blocker in &readiness.blockers {
                println!("  blocker: {blocker}");
            }
            for action in &analysis.path_to_value.key_actions {
                println!("  action: {action}");
            }
        }
        ValuationOutcome::Unavailable(unavailable) => {
            println!("Valuation unavailable: {}", unavailable.reason);
        }
    }

    let mut scenarios = new_table(vec!["Scenario", "Headline", "Change", "Kind"]);
    for result in &report.scenarios {
        scenarios.add_row(vec![
            Cell::new(&result.title),
            Cell::new(&result.primary_metric.label),
            Cell::new(format_value(result.primary_metric.delta, result.primary_metric.format)),
            Cell::new(format!("{:?}", result.impact_kind)),
        ]);
    }
    println!("{scenarios}");
    let totals = &report.scenario_totals;
    println!(
        "Scenario totals - annual profit: {}  one-off cash: {}  valuation: {}",
        format_compact(totals.annual_profit),
        format_compact(totals.one_off_cash),
        format_compact(totals.valuation_uplift)
    );
}

pub fn print_scenario(result: &ScenarioResult) {
    let primary = &result.primary_metric;
    let mut table = new_table(vec![primary.label.as_str(), "Current", "Projected", "Change"]);
    table.add_row(vec![
        Cell::new(&result.title),
        Cell::new(format_value(primary.current, primary.format)),
        Cell::new(format_value(primary.projected, primary.format)),
        Cell::new(format_value(primary.delta, primary.format)),
    ]);
    for metric in &result.secondary_metrics {
        table.add_row(vec![
            Cell::new(&metric.label),
            Cell::new(""),
            Cell::new(&metric.description),
            Cell::new(format_value(metric.impact, metric.format)),
        ]);
    }
    println!("{table}");
    println!("{}", result.summary);
    for action in result.displayed_actions() {
        println!("  - {action}");
    }
}
