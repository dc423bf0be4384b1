use core_types::Estimate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its `Default`, so an empty (or absent) file yields
/// the standard reference tables and assumptions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub valuation: ValuationSettings,
    pub readiness: ReadinessSettings,
    pub scenarios: ScenarioAssumptions,
    pub surplus_cash: SurplusCashPolicy,
    pub analysis: AnalysisSettings,
    pub logging: LoggingConfig,
}

/// Parameters of the valuation bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValuationSettings {
    /// Horizon used for the path to value when no remediable suppressor
    /// declares its own remediation time.
    pub standard_horizon_months: u32,
    /// EBITDA multiples by industry code.
    pub multiples: IndustryMultiples,
}

/// One row of the industry multiples table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndustryMultiple {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
    /// What moves a business within the range, quoted in the justification text.
    #[serde(default)]
    pub factors: Vec<String>,
}

impl IndustryMultiple {
    pub fn new(low: Decimal, mid: Decimal, high: Decimal, factors: &[&str]) -> Self {
        Self {
            low,
            mid,
            high,
            factors: factors.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn range(&self) -> Estimate {
        Estimate::new(self.low, self.mid, self.high)
    }
}

/// The injectable EBITDA multiple reference table.
///
/// How a multiple is chosen for an industry is not derived from any formula; it is
/// reference data. Unknown codes resolve to the `DEFAULT` row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IndustryMultiples(pub BTreeMap<String, IndustryMultiple>);

pub const DEFAULT_INDUSTRY: &str = "DEFAULT";

impl IndustryMultiples {
    /// Looks up an industry code, ignoring case, falling back to `DEFAULT`.
    ///
    /// Returns the code that matched alongside the row.
    pub fn lookup(&self, industry_code: &str) -> Option<(&str, &IndustryMultiple)> {
        self.find(industry_code).or_else(|| self.find(DEFAULT_INDUSTRY))
    }

    fn find(&self, code: &str) -> Option<(&str, &IndustryMultiple)> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(code))
            .map(|(key, row)| (key.as_str(), row))
    }
}

/// Weights, thresholds and bonuses for the exit readiness score.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessSettings {
    pub weights: ReadinessWeights,
    /// A component sub-score below this is a blocker.
    pub blocker_threshold: Decimal,
    /// A component sub-score at or above this is a strength.
    pub strength_threshold: Decimal,
    /// Points added to a component for each matching enhancer.
    pub enhancer_bonus: Decimal,
}

/// Component weights. Must sum to 100.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessWeights {
    pub owner_dependency: Decimal,
    pub concentration: Decimal,
    pub revenue_predictability: Decimal,
    pub documentation: Decimal,
    pub financial_health: Decimal,
}

impl ReadinessWeights {
    pub fn total(&self) -> Decimal {
        self.owner_dependency
            + self.concentration
            + self.revenue_predictability
            + self.documentation
            + self.financial_health
    }
}

/// Market assumptions shared by the what-if scenarios.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    /// EBITDA multiple used to turn a profit uplift into business value.
    pub value_multiple: Decimal,
    /// Effective borrowing rate, percent, used to value released cash.
    pub borrowing_rate_pct: Decimal,
    /// Fully loaded annual cost of one employee.
    pub cost_per_head: Decimal,
}

/// How the operating cash buffer is estimated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurplusCashPolicy {
    /// Months of fixed costs held back as an operating buffer.
    pub buffer_months: Decimal,
    /// Share of revenue assumed to be fixed cost when no cost lines are known.
    pub fixed_cost_ratio: Decimal,
    /// Multiplier on staff costs standing in for total fixed costs.
    pub staff_cost_proxy: Decimal,
}

/// Options for the benchmark gap analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Convert day-count gaps into one-off working capital amounts.
    pub convert_days_to_cash: bool,
    /// Share of a margin gap that is realistically recoverable, by industry.
    pub recovery_factors: BTreeMap<String, RecoveryFactor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecoveryFactor {
    pub factor: Decimal,
    #[serde(default)]
    pub rationale: String,
}

impl AnalysisSettings {
    /// The recovery factor for an industry, ignoring case, falling back to `DEFAULT`.
    pub fn recovery_factor(&self, industry_code: &str) -> Option<&RecoveryFactor> {
        let find = |code: &str| {
            self.recovery_factors
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(code))
                .map(|(_, factor)| factor)
        };
        find(industry_code).or_else(|| find(DEFAULT_INDUSTRY))
    }
}

/// Output style of the console log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These carry the reference figures the product has always used, so a missing
// section behaves exactly like the standard setup.

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            standard_horizon_months: 24,
            multiples: IndustryMultiples::default(),
        }
    }
}

impl Default for IndustryMultiples {
    fn default() -> Self {
        let rows = [
            ("TELECOM_INFRA", dec!(4), dec!(5), dec!(6), &["Contract security", "Customer concentration", "Growth trajectory"][..]),
            ("IT_SERVICES", dec!(5), dec!(7), dec!(9), &["Recurring revenue", "Customer retention", "IP/tooling"][..]),
            ("IT_CONSULTING", dec!(4), dec!(6), dec!(8), &["Founder dependency", "Customer relationships", "Specialisation"][..]),
            ("PROFESSIONAL_SERVICES", dec!(4), dec!(6), dec!(8), &["Recurring clients", "Documentation", "Team stability"][..]),
            ("ACCOUNTING_SERVICES", dec!(5), dec!(7), dec!(9), &["Recurring fees", "Customer tenure", "Partner dependency"][..]),
            ("LEGAL_SERVICES", dec!(5), dec!(6), dec!(8), &["Recurring matters", "Specialisation", "Partner dependency"][..]),
            ("CONSTRUCTION", dec!(3), dec!(4), dec!(5), &["Contract backlog", "Equipment assets", "Key relationships"][..]),
            ("ENGINEERING", dec!(4), dec!(5), dec!(6), &["IP/designs", "Certifications", "Customer contracts"][..]),
            ("HEALTHCARE", dec!(6), dec!(8), dec!(10), &["Patient base", "Location", "Practitioner retention"][..]),
            ("HEALTHCARE_SERVICES", dec!(5), dec!(7), dec!(9), &["Contracts", "Accreditation", "Staff stability"][..]),
            ("MANUFACTURING", dec!(4), dec!(5), dec!(7), &["Equipment", "Customer contracts", "IP"][..]),
            ("WHOLESALE_DISTRIBUTION", dec!(3), dec!(4), dec!(5), &["Customer relationships", "Supplier terms", "Inventory"][..]),
            ("RETAIL_TRADE", dec!(2), dec!(3), dec!(4), &["Location", "Brand", "Customer loyalty"][..]),
            ("HOSPITALITY", dec!(3), dec!(4), dec!(6), &["Location", "Brand", "Reviews"][..]),
            ("MEDIA_CREATIVE", dec!(4), dec!(6), dec!(8), &["Recurring clients", "IP/portfolio", "Team retention"][..]),
            ("EDUCATION_TRAINING", dec!(4), dec!(5), dec!(7), &["Course IP", "Student retention", "Accreditation"][..]),
            ("SAAS_SOFTWARE", dec!(6), dec!(10), dec!(15), &["ARR growth", "Churn rate", "NRR"][..]),
            ("ECOMMERCE", dec!(3), dec!(5), dec!(7), &["Brand", "Customer database", "Supply chain"][..]),
            ("RECRUITMENT_STAFFING", dec!(3), dec!(5), dec!(7), &["Temp vs perm mix", "Customer relationships", "Candidate database"][..]),
            (DEFAULT_INDUSTRY, dec!(4), dec!(5), dec!(6), &["Industry benchmark", "Profitability", "Growth"][..]),
        ];
        Self(
            rows.into_iter()
                .map(|(code, low, mid, high, factors)| {
                    (code.to_string(), IndustryMultiple::new(low, mid, high, factors))
                })
                .collect(),
        )
    }
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            weights: ReadinessWeights::default(),
            blocker_threshold: dec!(40),
            strength_threshold: dec!(80),
            enhancer_bonus: dec!(10),
        }
    }
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            owner_dependency: dec!(25),
            concentration: dec!(25),
            revenue_predictability: dec!(20),
            documentation: dec!(15),
            financial_health: dec!(15),
        }
    }
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            value_multiple: dec!(5),
            borrowing_rate_pct: dec!(8),
            cost_per_head: dec!(55000),
        }
    }
}

impl Default for SurplusCashPolicy {
    fn default() -> Self {
        Self {
            buffer_months: dec!(3),
            fixed_cost_ratio: dec!(0.25),
            staff_cost_proxy: dec!(1.5),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let rows = [
            ("TELECOM_INFRA", dec!(0.60), "Infrastructure delivery has structural margin constraints from hardware pass-through and subcontractor costs."),
            ("IT_SERVICES", dec!(0.75), "IT services margins are controllable through utilisation and rate improvements."),
            ("CONSULTING", dec!(0.80), "Consulting margins are driven by utilisation and rate card."),
            ("CONSTRUCTION", dec!(0.55), "Construction margins are constrained by material costs and subcontractor pricing."),
            ("MANUFACTURING", dec!(0.65), "Manufacturing margins are affected by input costs but improvable through efficiency."),
            ("PROFESSIONAL_SERVICES", dec!(0.75), "Professional services margins are driven by utilisation and pricing."),
            (DEFAULT_INDUSTRY, dec!(0.70), "Standard recovery factor for mixed service delivery."),
        ];
        Self {
            convert_days_to_cash: false,
            recovery_factors: rows
                .into_iter()
                .map(|(code, factor, rationale)| {
                    (
                        code.to_string(),
                        RecoveryFactor {
                            factor,
                            rationale: rationale.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "valuebridge".to_string(),
        }
    }
}
