use core_types::Severity;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Clean numeric answers from the owner's value assessment.
///
/// Questionnaire rendering and free-text parsing happen upstream; by the time a
/// record reaches the engine every answer is a number or a flag, and `None`
/// means the question was not answered. An unanswered question never triggers
/// a suppressor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerAssessment {
    /// Share of operational knowledge held only by the founder, 0-100.
    pub knowledge_dependency_pct: Option<Decimal>,
    /// Share of revenue tied to the founder's personal relationships, 0-100.
    pub personal_brand_pct: Option<Decimal>,
    /// Top-3 client share of revenue as answered in the assessment, 0-100.
    pub client_concentration_top3_pct: Option<Decimal>,
    /// Whether the unique methods are formally protected.
    pub ip_protected: Option<bool>,
    pub undocumented_critical_processes: u32,
    pub documentation_score: Option<Decimal>,
    /// Whether someone could step into the owner's role.
    pub has_successor: Option<bool>,
    pub strategy_fails_without_owner: bool,
    pub sales_fails_without_owner: bool,
    pub recurring_revenue_pct: Option<Decimal>,
    pub contract_backlog_months: Option<Decimal>,
    /// Year-on-year revenue change, percent. Negative for a decline.
    pub revenue_growth_pct: Option<Decimal>,
    pub employee_turnover_pct: Option<Decimal>,
    pub team_advocacy_pct: Option<Decimal>,
    /// Number of documented competitive advantages.
    pub competitive_moats: u32,
}

/// One answer that added to the founder risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderRiskSignal {
    pub signal: String,
    pub points: Decimal,
    pub severity: Severity,
}

/// How much of the business would walk out of the door with its founder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderRisk {
    /// 0-100, higher is riskier.
    pub score: Decimal,
    pub level: Severity,
    /// Worst first.
    pub signals: Vec<FounderRiskSignal>,
}

fn banded(value: Decimal, bands: &[(Decimal, Decimal, Severity)]) -> Option<(Decimal, Severity)> {
    bands
        .iter()
        .find(|(floor, _, _)| value >= *floor)
        .map(|&(_, points, severity)| (points, severity))
}

impl OwnerAssessment {
    /// Scores founder dependency from the succession and autonomy answers.
    ///
    /// No successor scores 25, strategy or sales failing without the owner 12
    /// each, and knowledge and personal brand concentration up to 15 and 12.
    /// Returns `None` when none of those questions were answered.
    pub fn founder_risk(&self) -> Option<FounderRisk> {
        let answered = self.has_successor.is_some()
            || self.knowledge_dependency_pct.is_some()
            || self.personal_brand_pct.is_some()
            || self.strategy_fails_without_owner
            || self.sales_fails_without_owner;
        if !answered {
            return None;
        }

        let mut signals = Vec::new();
        if self.has_successor == Some(false) {
            signals.push(FounderRiskSignal {
                signal: "Nobody could step into the owner's role".to_string(),
                points: dec!(25),
                severity: Severity::Critical,
            });
        }
        if self.strategy_fails_without_owner {
            signals.push(FounderRiskSignal {
                signal: "Strategy would fail without the owner".to_string(),
                points: dec!(12),
                severity: Severity::High,
            });
        }
        if self.sales_fails_without_owner {
            signals.push(FounderRiskSignal {
                signal: "Sales would fail without the owner".to_string(),
                points: dec!(12),
                severity: Severity::High,
            });
        }
        if let Some(knowledge) = self.knowledge_dependency_pct {
            let bands = [
                (dec!(80), dec!(15), Severity::Critical),
                (dec!(60), dec!(10), Severity::High),
                (dec!(40), dec!(5), Severity::Medium),
            ];
            if let Some((points, severity)) = banded(knowledge, &bands) {
                signals.push(FounderRiskSignal {
                    signal: format!("{knowledge}% of critical knowledge held by the founder"),
                    points,
                    severity,
                });
            }
        }
        if let Some(brand) = self.personal_brand_pct {
            let bands = [
                (dec!(85), dec!(12), Severity::Critical),
                (dec!(70), dec!(8), Severity::High),
                (dec!(50), dec!(4), Severity::Medium),
            ];
            if let Some((points, severity)) = banded(brand, &bands) {
                signals.push(FounderRiskSignal {
                    signal: format!("{brand}% of the brand tied to the founder personally"),
                    points,
                    severity,
                });
            }
        }
        signals.sort_by_key(|s| s.severity);

        let score = signals.iter().map(|s| s.points).sum::<Decimal>().min(dec!(100));
        let level = if score >= dec!(60) {
            Severity::Critical
        } else if score >= dec!(40) {
            Severity::High
        } else if score >= dec!(20) {
            Severity::Medium
        } else {
            Severity::Low
        };
        Some(FounderRisk { score, level, signals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_questions_give_no_score() {
        assert_eq!(OwnerAssessment::default().founder_risk(), None);
    }

    #[test]
    fn succession_and_autonomy_answers_add_up() {
        let assessment = OwnerAssessment {
            knowledge_dependency_pct: Some(dec!(65)),
            personal_brand_pct: Some(dec!(40)),
            has_successor: Some(false),
            sales_fails_without_owner: true,
            ..OwnerAssessment::default()
        };
        let risk = assessment.founder_risk().unwrap();

        // 25 successor + 12 sales + 10 knowledge; brand below 50 adds nothing.
        assert_eq!(risk.score, dec!(47));
        assert_eq!(risk.level, Severity::High);
        assert_eq!(risk.signals.len(), 3);
        assert_eq!(risk.signals[0].severity, Severity::Critical);
    }

    #[test]
    fn a_covered_owner_scores_low() {
        let assessment = OwnerAssessment {
            knowledge_dependency_pct: Some(dec!(20)),
            has_successor: Some(true),
            ..OwnerAssessment::default()
        };
        let risk = assessment.founder_risk().unwrap();
        assert_eq!(risk.score, Decimal::ZERO);
        assert_eq!(risk.level, Severity::Low);
        assert!(risk.signals.is_empty());
    }

    #[test]
    fn everything_at_once_is_critical() {
        let assessment = OwnerAssessment {
            knowledge_dependency_pct: Some(dec!(90)),
            personal_brand_pct: Some(dec!(90)),
            has_successor: Some(false),
            strategy_fails_without_owner: true,
            sales_fails_without_owner: true,
            ..OwnerAssessment::default()
        };
        let risk = assessment.founder_risk().unwrap();
        assert_eq!(risk.score, dec!(76));
        assert_eq!(risk.level, Severity::Critical);
    }
}
