use core_types::ValueFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most actions a result shows at once; the full list stays on `how_to_achieve`.
pub const DISPLAYED_ACTIONS: usize = 4;

/// Identifies which what-if projection to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    Margin,
    Pricing,
    Cash,
    Efficiency,
    Diversification,
    Exit,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 6] = [
        ScenarioType::Margin,
        ScenarioType::Pricing,
        ScenarioType::Cash,
        ScenarioType::Efficiency,
        ScenarioType::Diversification,
        ScenarioType::Exit,
    ];

    /// The five scenarios that project an improvement; `Exit` only previews value.
    pub const OPERATIONAL: [ScenarioType; 5] = [
        ScenarioType::Margin,
        ScenarioType::Pricing,
        ScenarioType::Cash,
        ScenarioType::Efficiency,
        ScenarioType::Diversification,
    ];
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScenarioType::Margin => "margin",
            ScenarioType::Pricing => "pricing",
            ScenarioType::Cash => "cash",
            ScenarioType::Efficiency => "efficiency",
            ScenarioType::Diversification => "diversification",
            ScenarioType::Exit => "exit",
        };
        f.write_str(label)
    }
}

/// What kind of value a scenario's headline figure represents. Kinds are never added together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactKind {
    /// Repeats every year.
    RecurringProfit,
    /// Released once.
    OneOffCash,
    /// Changes what the business is worth, not what it earns.
    Valuation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryMetric {
    pub label: String,
    pub current: Decimal,
    pub projected: Decimal,
    pub delta: Decimal,
    pub format: ValueFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMetric {
    pub label: String,
    pub impact: Decimal,
    pub description: String,
    pub format: ValueFormat,
}

impl SecondaryMetric {
    pub(crate) fn new(label: &str, impact: Decimal, description: impl Into<String>, format: ValueFormat) -> Self {
        Self {
            label: label.to_string(),
            impact,
            description: description.into(),
            format,
        }
    }
}

/// The outcome of one what-if projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_type: ScenarioType,
    pub title: String,
    pub primary_metric: PrimaryMetric,
    pub secondary_metrics: Vec<SecondaryMetric>,
    pub summary: String,
    pub how_to_achieve: Vec<String>,
    /// Effect on business value of the projected change.
    pub business_value_impact: Decimal,
    /// Annual profit gained. Zero for scenarios whose value is not recurring profit.
    pub annual_profit_impact: Decimal,
    pub impact_kind: ImpactKind,
}

impl ScenarioResult {
    /// The first few actions, for compact displays.
    pub fn displayed_actions(&self) -> &[String] {
        let shown = self.how_to_achieve.len().min(DISPLAYED_ACTIONS);
        &self.how_to_achieve[..shown]
    }
}

pub(crate) fn steps(actions: &[&str]) -> Vec<String> {
    actions.iter().map(|a| a.to_string()).collect()
}
