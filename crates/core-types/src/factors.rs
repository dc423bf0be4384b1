use crate::enums::{FactorCategory, Severity};
use crate::ranges::Band;
use serde::{Deserialize, Serialize};

/// What it takes to remove a suppressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    pub action: String,
    /// Months needed to fix. `None` falls back to the standard horizon.
    pub time_months: Option<u32>,
}

/// A structural factor that moves the achievable sale value of a business.
///
/// Suppressors and enhancers share this shape; the aliases below say which role
/// a list plays. For an enhancer the discount band is normally zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFactor {
    pub id: String,
    pub name: String,
    pub category: FactorCategory,
    pub severity: Severity,
    /// Discount to the enterprise value, 0-100.
    pub discount_percent: Band,
    /// Money at stake. Priced by the valuation engine against the enterprise value.
    #[serde(default)]
    pub impact_amount: Band,
    pub remediable: bool,
    pub evidence: String,
    #[serde(default)]
    pub remediation: Option<Remediation>,
}

pub type ValueSuppressor = ValueFactor;
pub type ValueEnhancer = ValueFactor;

impl ValueFactor {
    /// The action that removes this factor, or a generic one.
    pub fn action_label(&self) -> String {
        self.remediation
            .as_ref()
            .map(|r| r.action.clone())
            .unwrap_or_else(|| format!("Address {}", self.name))
    }
}
