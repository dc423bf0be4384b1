use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance-sheet and cost figures feeding the surplus cash model.
///
/// Every field is optional: `None` means "not supplied", which lowers the
/// confidence of the result or pushes the model onto an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurplusCashInputs {
    pub actual_cash: Option<Decimal>,
    /// An explicitly agreed operating buffer. Overrides any cost-based estimate.
    pub operating_buffer: Option<Decimal>,
    /// Annual staff costs.
    pub staff_costs: Option<Decimal>,
    /// Annual administrative expenses.
    pub admin_expenses: Option<Decimal>,
    pub revenue: Option<Decimal>,
    pub debtors: Option<Decimal>,
    pub creditors: Option<Decimal>,
    pub stock: Option<Decimal>,
    /// An explicitly supplied working capital requirement. May be negative when
    /// suppliers fund the business.
    pub working_capital_requirement: Option<Decimal>,
}
