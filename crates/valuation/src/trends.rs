use core_types::BaselineMetrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Margin moves smaller than this many points count as stable.
const MARGIN_STABLE_POINTS: Decimal = dec!(1);
/// Revenue moves smaller than this percentage count as stable.
const REVENUE_STABLE_PCT: Decimal = dec!(3);

/// Headline figures from one earlier financial year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearFigures {
    pub fiscal_year: u16,
    pub revenue: Option<Decimal>,
    /// 0-100.
    pub gross_margin: Option<Decimal>,
    /// 0-100.
    pub net_margin: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    Revenue,
    GrossMargin,
    NetMargin,
}

impl TrendMetric {
    pub fn label(&self) -> &'static str {
        match self {
            TrendMetric::Revenue => "Revenue",
            TrendMetric::GrossMargin => "Gross margin",
            TrendMetric::NetMargin => "Net margin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// How one metric moved from the prior year to the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: TrendMetric,
    pub direction: TrendDirection,
    pub current: Decimal,
    pub prior: Decimal,
    /// `current - prior`, in the metric's own unit.
    pub change: Decimal,
    /// `change` relative to `prior`, percent. Zero when `prior` is zero.
    pub change_percent: Decimal,
    /// The prior year was a trough: down on the year before and up since.
    /// A recovering metric is always reported as improving.
    pub recovering: bool,
    pub narrative: String,
}

/// The multi-year view of the client's headline figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTrends {
    pub trends: Vec<MetricTrend>,
}

impl FinancialTrends {
    pub fn get(&self, metric: TrendMetric) -> Option<&MetricTrend> {
        self.trends.iter().find(|t| t.metric == metric)
    }

    pub fn declining(&self) -> impl Iterator<Item = &MetricTrend> {
        self.trends.iter().filter(|t| t.direction == TrendDirection::Declining)
    }

    pub fn recovering(&self) -> impl Iterator<Item = &MetricTrend> {
        self.trends.iter().filter(|t| t.recovering)
    }

    /// The highest financial health sub-score the trends allow, if they limit it.
    ///
    /// One declining metric caps the score at 60, two or more at 40.
    pub fn health_cap(&self) -> Option<Decimal> {
        match self.declining().count() {
            0 => None,
            1 => Some(dec!(60)),
            _ => Some(dec!(40)),
        }
    }
}

/// Compares the current figures with the earlier years.
///
/// `history` may be in any order; it is read most recent first. A metric needs
/// one earlier year to get a direction and two to be checked for a recovery.
/// Metrics without an earlier figure are left out.
pub fn analyse_trends(current: &BaselineMetrics, history: &[YearFigures]) -> FinancialTrends {
    let mut years: Vec<&YearFigures> = history.iter().collect();
    years.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));

    let mut trends = Vec::new();
    let revenue_history: Vec<Decimal> = years.iter().filter_map(|y| y.revenue).collect();
    if let Some(&prior) = revenue_history.first().filter(|_| current.revenue > Decimal::ZERO) {
        trends.push(revenue_trend(current.revenue, prior));
    }

    let gross: Vec<Decimal> = years.iter().filter_map(|y| y.gross_margin).collect();
    if let Some(trend) = margin_trend(TrendMetric::GrossMargin, current.gross_margin, &gross) {
        trends.push(trend);
    }
    let net: Vec<Decimal> = years.iter().filter_map(|y| y.net_margin).collect();
    if let Some(trend) = margin_trend(TrendMetric::NetMargin, current.net_margin, &net) {
        trends.push(trend);
    }

    let trends = FinancialTrends { trends };
    tracing::debug!(
        metrics = trends.trends.len(),
        declining = trends.declining().count(),
        recovering = trends.recovering().count(),
        "Financial trends analysed."
    );
    trends
}

fn percent_change(change: Decimal, prior: Decimal) -> Decimal {
    if prior.is_zero() {
        Decimal::ZERO
    } else {
        change / prior * dec!(100)
    }
}

fn revenue_trend(current: Decimal, prior: Decimal) -> MetricTrend {
    let change = current - prior;
    let change_percent = percent_change(change, prior);
    let direction = if change_percent.abs() < REVENUE_STABLE_PCT {
        TrendDirection::Stable
    } else if change_percent > Decimal::ZERO {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    };
    let narrative = match direction {
        TrendDirection::Improving => format!("Revenue grew {prior} -> {current} (+{}%)", change_percent.round_dp(1)),
        TrendDirection::Declining => format!("Revenue fell {prior} -> {current} ({}%)", change_percent.round_dp(1)),
        TrendDirection::Stable => format!("Revenue stable at {current}"),
    };
    MetricTrend {
        metric: TrendMetric::Revenue,
        direction,
        current,
        prior,
        change,
        change_percent,
        recovering: false,
        narrative,
    }
}

/// `earlier` is most recent first.
fn margin_trend(metric: TrendMetric, current: Decimal, earlier: &[Decimal]) -> Option<MetricTrend> {
    let prior = *earlier.first()?;
    let change = current - prior;
    let recovering = earlier
        .get(1)
        .is_some_and(|&before| prior < before && current > prior);

    let direction = if recovering {
        TrendDirection::Improving
    } else if change.abs() < MARGIN_STABLE_POINTS {
        TrendDirection::Stable
    } else if change > Decimal::ZERO {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    };

    let label = metric.label();
    let narrative = if recovering {
        format!("{label} recovering: {prior}% -> {current}% after a trough")
    } else {
        match direction {
            TrendDirection::Improving => format!("{label} improving: {prior}% -> {current}%"),
            TrendDirection::Declining => format!("{label} declining: {prior}% -> {current}%"),
            TrendDirection::Stable => format!("{label} stable at {current}%"),
        }
    };

    Some(MetricTrend {
        metric,
        direction,
        current,
        prior,
        change,
        change_percent: percent_change(change, prior),
        recovering,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(revenue: Decimal, gross_margin: Decimal, net_margin: Decimal) -> BaselineMetrics {
        BaselineMetrics {
            revenue,
            gross_margin,
            net_margin,
            ebitda: None,
            employee_count: 10,
            revenue_per_employee: revenue / dec!(10),
            debtor_days: None,
            creditor_days: None,
            client_concentration: None,
            surplus_cash: None,
            revenue_growth: None,
            period_end: None,
        }
    }

    fn year(fiscal_year: u16, revenue: Decimal, gross_margin: Decimal, net_margin: Decimal) -> YearFigures {
        YearFigures {
            fiscal_year,
            revenue: Some(revenue),
            gross_margin: Some(gross_margin),
            net_margin: Some(net_margin),
        }
    }

    #[test]
    fn a_trough_followed_by_a_rise_is_a_recovery() {
        let history = vec![
            year(2023, dec!(4200000), dec!(39), dec!(8.5)),
            year(2024, dec!(4600000), dec!(37), dec!(7)),
        ];
        let trends = analyse_trends(&current(dec!(5000000), dec!(40), dec!(9)), &history);

        let gross = trends.get(TrendMetric::GrossMargin).unwrap();
        assert!(gross.recovering);
        assert_eq!(gross.direction, TrendDirection::Improving);
        assert_eq!(gross.prior, dec!(37));
        assert_eq!(gross.change, dec!(3));
        assert!(trends.get(TrendMetric::NetMargin).unwrap().recovering);

        let revenue = trends.get(TrendMetric::Revenue).unwrap();
        assert_eq!(revenue.direction, TrendDirection::Improving);
        assert!(!revenue.recovering);
        assert_eq!(trends.health_cap(), None);
    }

    #[test]
    fn small_moves_are_stable_and_falls_are_declines() {
        let history = vec![year(2024, dec!(1020000), dec!(30.5), dec!(9))];
        let trends = analyse_trends(&current(dec!(1000000), dec!(30), dec!(6)), &history);

        assert_eq!(trends.get(TrendMetric::Revenue).unwrap().direction, TrendDirection::Stable);
        assert_eq!(trends.get(TrendMetric::GrossMargin).unwrap().direction, TrendDirection::Stable);
        let net = trends.get(TrendMetric::NetMargin).unwrap();
        assert_eq!(net.direction, TrendDirection::Declining);
        assert!(!net.recovering);
        assert_eq!(trends.health_cap(), Some(dec!(60)));
    }

    #[test]
    fn a_steady_decline_is_not_a_recovery() {
        let history = vec![
            year(2024, dec!(1200000), dec!(32), dec!(8)),
            year(2023, dec!(1400000), dec!(35), dec!(10)),
        ];
        let trends = analyse_trends(&current(dec!(1000000), dec!(28), dec!(5)), &history);

        assert_eq!(trends.recovering().count(), 0);
        assert_eq!(trends.declining().count(), 3);
        assert_eq!(trends.health_cap(), Some(dec!(40)));
    }

    #[test]
    fn no_history_means_no_trends() {
        let trends = analyse_trends(&current(dec!(1000000), dec!(30), dec!(6)), &[]);
        assert!(trends.trends.is_empty());
        assert_eq!(trends.health_cap(), None);
    }
}
