use crate::trends::FinancialTrends;
use configuration::ReadinessSettings;
use core_types::{BaselineMetrics, FactorCategory, Severity, ValueEnhancer, ValueSuppressor};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

const FULL_MARKS: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotReady,
    NeedsWork,
    Ready,
}

impl Verdict {
    pub fn from_score(score: Decimal) -> Self {
        if score < dec!(40) {
            Verdict::NotReady
        } else if score < dec!(70) {
            Verdict::NeedsWork
        } else {
            Verdict::Ready
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::NotReady => "not_ready",
            Verdict::NeedsWork => "needs_work",
            Verdict::Ready => "ready",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessArea {
    OwnerDependency,
    Concentration,
    RevenuePredictability,
    Documentation,
    FinancialHealth,
}

impl ReadinessArea {
    pub const ALL: [ReadinessArea; 5] = [
        ReadinessArea::OwnerDependency,
        ReadinessArea::Concentration,
        ReadinessArea::RevenuePredictability,
        ReadinessArea::Documentation,
        ReadinessArea::FinancialHealth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessArea::OwnerDependency => "Owner dependency",
            ReadinessArea::Concentration => "Customer concentration",
            ReadinessArea::RevenuePredictability => "Revenue predictability",
            ReadinessArea::Documentation => "Documentation",
            ReadinessArea::FinancialHealth => "Financial health",
        }
    }

    fn suppressor_categories(&self) -> &'static [FactorCategory] {
        match self {
            ReadinessArea::OwnerDependency => &[
                FactorCategory::FounderDependency,
                FactorCategory::Succession,
                FactorCategory::Team,
            ],
            ReadinessArea::Concentration => &[FactorCategory::Concentration],
            ReadinessArea::RevenuePredictability => &[FactorCategory::RecurringRevenue],
            ReadinessArea::Documentation => &[FactorCategory::Documentation],
            ReadinessArea::FinancialHealth => &[FactorCategory::Trajectory],
        }
    }

    fn enhancer_categories(&self) -> &'static [FactorCategory] {
        match self {
            ReadinessArea::OwnerDependency => &[FactorCategory::Team],
            ReadinessArea::Concentration => &[],
            ReadinessArea::RevenuePredictability => &[FactorCategory::RecurringRevenue],
            ReadinessArea::Documentation => &[FactorCategory::Documentation],
            ReadinessArea::FinancialHealth => &[
                FactorCategory::Cash,
                FactorCategory::Productivity,
                FactorCategory::Profitability,
            ],
        }
    }

    fn weight(&self, settings: &ReadinessSettings) -> Decimal {
        let weights = &settings.weights;
        match self {
            ReadinessArea::OwnerDependency => weights.owner_dependency,
            ReadinessArea::Concentration => weights.concentration,
            ReadinessArea::RevenuePredictability => weights.revenue_predictability,
            ReadinessArea::Documentation => weights.documentation,
            ReadinessArea::FinancialHealth => weights.financial_health,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessComponent {
    pub area: ReadinessArea,
    pub weight: Decimal,
    /// 0-100.
    pub score: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitReadiness {
    /// Weighted score, 0-100, rounded to a whole number.
    pub score: Decimal,
    pub verdict: Verdict,
    pub components: Vec<ReadinessComponent>,
    pub blockers: Vec<String>,
    pub strengths: Vec<String>,
}

fn severity_score(severity: Option<Severity>) -> Decimal {
    match severity {
        None => dec!(100),
        Some(Severity::Low) => dec!(80),
        Some(Severity::Medium) => dec!(60),
        Some(Severity::High) => dec!(40),
        Some(Severity::Critical) => dec!(20),
    }
}

fn concentration_score(top3: Decimal) -> Decimal {
    if top3 >= dec!(90) {
        dec!(20)
    } else if top3 >= dec!(75) {
        dec!(40)
    } else if top3 >= dec!(60) {
        dec!(60)
    } else if top3 >= dec!(40) {
        dec!(80)
    } else {
        dec!(100)
    }
}

fn margin_score(net_margin: Decimal) -> Decimal {
    if net_margin > dec!(10) {
        dec!(100)
    } else if net_margin > dec!(5) {
        dec!(70)
    } else if net_margin > Decimal::ZERO {
        dec!(50)
    } else {
        dec!(20)
    }
}

/// Scores how prepared the business is for a sale.
///
/// Each area starts from the worst suppressor severity in its categories, is
/// pulled down further by the baseline where it speaks to that area, and earns a
/// bonus per matching enhancer. Declining multi-year trends cap financial health;
/// recoveries are listed as strengths. The overall score is the weighted mean.
pub fn assess_readiness(
    baseline: &BaselineMetrics,
    suppressors: &[ValueSuppressor],
    enhancers: &[ValueEnhancer],
    trends: Option<&FinancialTrends>,
    settings: &ReadinessSettings,
) -> ExitReadiness {
    let mut components = Vec::with_capacity(ReadinessArea::ALL.len());
    let mut blockers = Vec::new();
    let mut strengths = Vec::new();

    for area in ReadinessArea::ALL {
        let matching: Vec<&ValueSuppressor> = suppressors
            .iter()
            .filter(|s| area.suppressor_categories().contains(&s.category))
            .collect();
        let worst = matching.iter().map(|s| s.severity).min();
        let mut score = severity_score(worst);

        match area {
            ReadinessArea::Concentration => {
                if let Some(top3) = baseline.client_concentration {
                    score = score.min(concentration_score(top3));
                }
            }
            ReadinessArea::FinancialHealth => {
                score = score.min(margin_score(baseline.net_margin));
                if let Some(cap) = trends.and_then(FinancialTrends::health_cap) {
                    score = score.min(cap);
                }
            }
            _ => {}
        }

        let bonus_count = enhancers
            .iter()
            .filter(|e| area.enhancer_categories().contains(&e.category))
            .count();
        score = (score + settings.enhancer_bonus * Decimal::from(bonus_count)).min(FULL_MARKS);

        if score < settings.blocker_threshold {
            let causes: Vec<&str> = matching.iter().map(|s| s.name.as_str()).collect();
            if causes.is_empty() {
                blockers.push(area.label().to_string());
            } else {
                blockers.push(format!("{}: {}", area.label(), causes.join(", ")));
            }
        } else if score >= settings.strength_threshold {
            strengths.push(area.label().to_string());
        }

        components.push(ReadinessComponent {
            area,
            weight: area.weight(settings),
            score,
        });
    }

    strengths.extend(enhancers.iter().map(|e| e.name.clone()));
    if let Some(trends) = trends {
        strengths.extend(trends.recovering().map(|t| t.narrative.clone()));
    }

    let weighted: Decimal = components.iter().map(|c| c.weight * c.score).sum();
    let score = (weighted / FULL_MARKS)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, FULL_MARKS);
    let verdict = Verdict::from_score(score);

    tracing::debug!(%score, %verdict, blockers = blockers.len(), "Exit readiness assessed.");

    ExitReadiness {
        score,
        verdict,
        components,
        blockers,
        strengths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::{YearFigures, analyse_trends};
    use core_types::{Band, ValueFactor};

    fn factor(name: &str, category: FactorCategory, severity: Severity) -> ValueFactor {
        ValueFactor {
            id: name.to_lowercase(),
            name: name.to_string(),
            category,
            severity,
            discount_percent: Band::new(dec!(5), dec!(10)),
            impact_amount: Band::default(),
            remediable: true,
            evidence: String::new(),
            remediation: None,
        }
    }

    fn baseline(net_margin: Decimal, concentration: Option<Decimal>) -> BaselineMetrics {
        BaselineMetrics {
            revenue: dec!(3000000),
            gross_margin: dec!(45),
            net_margin,
            ebitda: Some(dec!(450000)),
            employee_count: 15,
            revenue_per_employee: dec!(200000),
            debtor_days: None,
            creditor_days: None,
            client_concentration: concentration,
            surplus_cash: None,
            revenue_growth: None,
            period_end: None,
        }
    }

    #[test]
    fn clean_business_is_ready() {
        let readiness = assess_readiness(&baseline(dec!(15), Some(dec!(20))), &[], &[], None, &ReadinessSettings::default());
        assert_eq!(readiness.score, dec!(100));
        assert_eq!(readiness.verdict, Verdict::Ready);
        assert!(readiness.blockers.is_empty());
        assert_eq!(readiness.strengths.len(), 5);
    }

    #[test]
    fn critical_suppressors_become_blockers() {
        let suppressors = vec![
            factor("Founder Dependency", FactorCategory::FounderDependency, Severity::Critical),
            factor("Customer Concentration", FactorCategory::Concentration, Severity::High),
        ];
        let readiness = assess_readiness(
            &baseline(dec!(3), Some(dec!(92))),
            &suppressors,
            &[],
            None,
            &ReadinessSettings::default(),
        );
        // owner 20, concentration 20, predictability 100, documentation 100, financial 50
        let scores: Vec<Decimal> = readiness.components.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![dec!(20), dec!(20), dec!(100), dec!(100), dec!(50)]);
        // (25*20 + 25*20 + 20*100 + 15*100 + 15*50) / 100 = 52.5 -> 53
        assert_eq!(readiness.score, dec!(53));
        assert_eq!(readiness.verdict, Verdict::NeedsWork);
        assert_eq!(
            readiness.blockers,
            vec![
                "Owner dependency: Founder Dependency".to_string(),
                "Customer concentration: Customer Concentration".to_string(),
            ]
        );
    }

    #[test]
    fn team_suppressors_count_against_owner_dependency() {
        let suppressors = vec![factor("Team Instability", FactorCategory::Team, Severity::High)];
        let readiness = assess_readiness(
            &baseline(dec!(15), Some(dec!(20))),
            &suppressors,
            &[],
            None,
            &ReadinessSettings::default(),
        );
        let owner = &readiness.components[0];
        assert_eq!(owner.area, ReadinessArea::OwnerDependency);
        assert_eq!(owner.score, dec!(40));
        assert!(!readiness.strengths.contains(&"Owner dependency".to_string()));
    }

    #[test]
    fn enhancers_lift_their_area() {
        let suppressors = vec![factor("Low Revenue Predictability", FactorCategory::RecurringRevenue, Severity::Medium)];
        let enhancers = vec![factor("Strong Recurring Revenue", FactorCategory::RecurringRevenue, Severity::Low)];
        let readiness = assess_readiness(
            &baseline(dec!(15), None),
            &suppressors,
            &enhancers,
            None,
            &ReadinessSettings::default(),
        );
        assert_eq!(readiness.components[2].score, dec!(70));
        assert!(readiness.strengths.contains(&"Strong Recurring Revenue".to_string()));
    }

    #[test]
    fn declining_trends_cap_financial_health() {
        let history = vec![
            YearFigures {
                fiscal_year: 2024,
                revenue: Some(dec!(3600000)),
                gross_margin: Some(dec!(45)),
                net_margin: Some(dec!(18)),
            },
        ];
        let base = baseline(dec!(15), Some(dec!(20)));
        let trends = analyse_trends(&base, &history);
        let readiness = assess_readiness(&base, &[], &[], Some(&trends), &ReadinessSettings::default());

        // Revenue and net margin both fell, so financial health is capped at 40.
        assert_eq!(readiness.components[4].score, dec!(40));
        assert!(!readiness.strengths.contains(&"Financial health".to_string()));
    }

    #[test]
    fn recoveries_are_reported_as_strengths() {
        let history = vec![
            YearFigures {
                fiscal_year: 2023,
                revenue: None,
                gross_margin: None,
                net_margin: Some(dec!(14)),
            },
            YearFigures {
                fiscal_year: 2024,
                revenue: None,
                gross_margin: None,
                net_margin: Some(dec!(9)),
            },
        ];
        let base = baseline(dec!(15), Some(dec!(20)));
        let trends = analyse_trends(&base, &history);
        let readiness = assess_readiness(&base, &[], &[], Some(&trends), &ReadinessSettings::default());

        assert_eq!(readiness.components[4].score, dec!(100));
        assert!(readiness.strengths.iter().any(|s| s.starts_with("Net margin recovering")));
    }

    #[test]
    fn verdict_bands() {
        assert_eq!(Verdict::from_score(dec!(39)), Verdict::NotReady);
        assert_eq!(Verdict::from_score(dec!(40)), Verdict::NeedsWork);
        assert_eq!(Verdict::from_score(dec!(69)), Verdict::NeedsWork);
        assert_eq!(Verdict::from_score(dec!(70)), Verdict::Ready);
    }
}
