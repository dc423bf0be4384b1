use crate::error::AnalyticsError;
use crate::report::{Classification, GapReport, MetricComparison, SkippedMetric};
use crate::statistics::{PositionBand, percentile_of};
use core_types::{MetricRecord, MetricUnit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;

const PER_EMPLOYEE_METRICS: &[&str] = &["revenue_per_employee", "gross_profit_per_employee"];
const DAYS_PER_YEAR: Decimal = dec!(365);

/// Switches that change how impacts are sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Price day-count gaps as one-off cash at `revenue / 365` per day.
    pub convert_days_to_cash: bool,
}

/// A stateless calculator comparing client metrics with industry medians.
#[derive(Debug, Default, Clone)]
pub struct GapAnalyzer {
    options: AnalysisOptions,
}

/// Runs a gap analysis with default options.
pub fn analyze_gaps(metrics: &[MetricRecord], revenue: Decimal, employee_count: u32) -> GapReport {
    GapAnalyzer::new().analyze(metrics, revenue, employee_count)
}

impl GapAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// The main entry point for the gap analysis.
    ///
    /// Every record with a client value and a usable median ends up in exactly one
    /// of `gaps` or `strengths`. Records without are listed in `skipped`; a single
    /// bad metric never fails the run.
    #[tracing::instrument(skip(self, metrics), fields(metrics = metrics.len()))]
    pub fn analyze(&self, metrics: &[MetricRecord], revenue: Decimal, employee_count: u32) -> GapReport {
        let mut report = GapReport::default();

        for record in metrics {
            match self.compare(record, revenue, employee_count) {
                Ok(comparison) => match comparison.classification {
                    Classification::Gap => report.gaps.push(comparison),
                    Classification::Strength => report.strengths.push(comparison),
                },
                Err(e) => {
                    tracing::warn!(code = %record.code, error = %e, "Skipping metric.");
                    report.skipped.push(SkippedMetric {
                        code: record.code.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.gaps.sort_by(by_impact_then_code);
        report.strengths.sort_by(by_impact_then_code);

        for gap in &report.gaps {
            report.total_annual_opportunity += gap.impact.unwrap_or_default();
            report.one_off_cash_opportunity += gap.cash_release.unwrap_or_default();
        }

        let classified = report.classified_count();
        if classified > 0 {
            let sum: Decimal = report.ordered().map(|entry| entry.percentile).sum();
            report.overall_percentile = Some(sum / Decimal::from(classified));
        }

        tracing::info!(
            gaps = report.gaps.len(),
            strengths = report.strengths.len(),
            skipped = report.skipped.len(),
            total_annual_opportunity = %report.total_annual_opportunity,
            "Gap analysis complete."
        );
        report
    }

    fn compare(
        &self,
        record: &MetricRecord,
        revenue: Decimal,
        employee_count: u32,
    ) -> Result<MetricComparison, AnalyticsError> {
        let client_value = record
            .client_value
            .ok_or_else(|| AnalyticsError::MissingClientValue("no client value supplied".to_string()))?;
        let distribution = record.distribution();
        let percentile = percentile_of(client_value, &distribution, record.higher_is_better)?;
        // percentile_of has already rejected a missing or zero median.
        let benchmark_median = distribution.p50.unwrap_or_default();

        let difference = client_value - benchmark_median;
        let underperforms = if record.higher_is_better {
            difference < Decimal::ZERO
        } else {
            difference > Decimal::ZERO
        };
        let classification = if underperforms {
            Classification::Gap
        } else {
            Classification::Strength
        };

        let impact = annual_basis(record, revenue, employee_count).map(|basis| difference.abs() * basis);
        let cash_release = self
            .cash_basis(record, revenue)
            .map(|per_day| difference.abs() * per_day);

        tracing::debug!(
            code = %record.code,
            %client_value,
            %benchmark_median,
            %percentile,
            ?classification,
            "Metric compared."
        );

        Ok(MetricComparison {
            code: record.code.clone(),
            name: record.name.clone(),
            unit: record.unit,
            client_value,
            benchmark_median,
            difference,
            percentile,
            band: PositionBand::from_percentile(percentile),
            classification,
            impact,
            cash_release,
        })
    }

    /// Cash per day of difference, for day-count metrics when conversion is on.
    fn cash_basis(&self, record: &MetricRecord, revenue: Decimal) -> Option<Decimal> {
        (record.unit == MetricUnit::Days && self.options.convert_days_to_cash && revenue > Decimal::ZERO)
            .then(|| revenue / DAYS_PER_YEAR)
    }
}

/// Annual money per unit of difference for a metric, if it has one.
fn annual_basis(record: &MetricRecord, revenue: Decimal, employee_count: u32) -> Option<Decimal> {
    match record.unit {
        MetricUnit::Percent if record.code.ends_with("_margin") && revenue > Decimal::ZERO => {
            Some(revenue / dec!(100))
        }
        MetricUnit::Currency if PER_EMPLOYEE_METRICS.contains(&record.code.as_str()) && employee_count > 0 => {
            Some(Decimal::from(employee_count))
        }
        _ => None,
    }
}

/// Descending impact, unquantified entries last, ties broken by code.
fn by_impact_then_code(a: &MetricComparison, b: &MetricComparison) -> Ordering {
    match (a.impact, b.impact) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.code.cmp(&b.code))
}
