use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit a benchmark metric is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Percent,
    Currency,
    Days,
    Ratio,
    Number,
}

/// How serious a value factor is.
///
/// The declaration order is the ranking order: sorting ascending puts
/// `Critical` first. Severity never changes a discount on its own; only the
/// factor's declared percent band does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Zero-based rank, `Critical` being 0.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(label)
    }
}

/// The business area a suppressor or enhancer belongs to. Exit readiness
/// components select the factors they care about by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    FounderDependency,
    Concentration,
    Documentation,
    Succession,
    Trajectory,
    RecurringRevenue,
    Team,
    Cash,
    Productivity,
    Profitability,
    Other,
}

/// Display hint attached to a scenario figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Currency,
    Percent,
    Number,
    Days,
}

/// How much of a calculation rests on supplied rather than estimated figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_sorts_critical_first() {
        let mut severities = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        severities.sort();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
        );
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::Low.rank(), 3);
    }

    #[test]
    fn units_use_snake_case_on_the_wire() {
        let json = serde_json::to_string(&MetricUnit::Days).unwrap();
        assert_eq!(json, "\"days\"");
        let category: FactorCategory = serde_json::from_str("\"founder_dependency\"").unwrap();
        assert_eq!(category, FactorCategory::FounderDependency);
    }
}
