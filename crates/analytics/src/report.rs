use crate::statistics::PositionBand;
use core_types::MetricUnit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The client underperforms the industry median.
    Gap,
    /// The client is at or better than the median.
    Strength,
}

/// The comparison of one client metric with its benchmark median.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub code: String,
    pub name: String,
    pub unit: MetricUnit,
    pub client_value: Decimal,
    pub benchmark_median: Decimal,
    /// `client_value - benchmark_median`, signed.
    pub difference: Decimal,
    /// Polarity-adjusted rank, so 100 is always best.
    pub percentile: Decimal,
    pub band: PositionBand,
    pub classification: Classification,
    /// Annual value of moving to the median. `None` when the metric has no annual basis.
    pub impact: Option<Decimal>,
    /// One-off cash released by moving a day-count metric to the median.
    /// Only set when day conversion is switched on, and never part of `impact`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_release: Option<Decimal>,
}

/// A metric left out of the analysis, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMetric {
    pub code: String,
    pub reason: String,
}

/// The output of a gap analysis run.
///
/// Gaps and strengths partition every metric that had both a client value and a
/// usable benchmark; everything else is listed in `skipped`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapReport {
    pub gaps: Vec<MetricComparison>,
    pub strengths: Vec<MetricComparison>,
    pub skipped: Vec<SkippedMetric>,
    /// Sum of `impact` over every gap.
    pub total_annual_opportunity: Decimal,
    /// Sum of `cash_release` over every gap, reported apart from the annual total.
    pub one_off_cash_opportunity: Decimal,
    /// Mean percentile over all classified metrics.
    pub overall_percentile: Option<Decimal>,
}

impl GapReport {
    /// Gaps first, then strengths, in report order.
    pub fn ordered(&self) -> impl Iterator<Item = &MetricComparison> {
        self.gaps.iter().chain(self.strengths.iter())
    }

    pub fn classified_count(&self) -> usize {
        self.gaps.len() + self.strengths.len()
    }

    pub fn find(&self, code: &str) -> Option<&MetricComparison> {
        self.ordered().find(|entry| entry.code == code)
    }
}
