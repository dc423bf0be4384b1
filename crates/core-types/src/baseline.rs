use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard metric codes shared by benchmark sets, the gap analyzer and the baseline.
pub mod metric_codes {
    pub const GROSS_MARGIN: &str = "gross_margin";
    pub const NET_MARGIN: &str = "net_margin";
    pub const EBITDA_MARGIN: &str = "ebitda_margin";
    pub const REVENUE_PER_EMPLOYEE: &str = "revenue_per_employee";
    pub const DEBTOR_DAYS: &str = "debtor_days";
    pub const CREDITOR_DAYS: &str = "creditor_days";
    pub const CLIENT_CONCENTRATION: &str = "client_concentration";
    pub const REVENUE_GROWTH: &str = "revenue_growth";
}

/// An immutable snapshot of a client's confirmed financial position.
///
/// Built once per analysis run (normally by the baseline resolver). Scenarios and
/// valuations derive new figures from it and never write back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub revenue: Decimal,
    /// Gross margin, 0-100.
    pub gross_margin: Decimal,
    /// Net margin, 0-100. May be negative for a loss-making year.
    pub net_margin: Decimal,
    /// Absolute EBITDA. `None` when it could not be established.
    pub ebitda: Option<Decimal>,
    pub employee_count: u32,
    pub revenue_per_employee: Decimal,
    pub debtor_days: Option<Decimal>,
    pub creditor_days: Option<Decimal>,
    /// Share of revenue from the top three clients, 0-100.
    pub client_concentration: Option<Decimal>,
    pub surplus_cash: Option<Decimal>,
    /// Year-on-year revenue growth, percent.
    pub revenue_growth: Option<Decimal>,
    pub period_end: Option<NaiveDate>,
}

impl BaselineMetrics {
    pub fn gross_profit(&self) -> Decimal {
        self.revenue * self.gross_margin / dec!(100)
    }

    pub fn net_profit(&self) -> Decimal {
        self.revenue * self.net_margin / dec!(100)
    }

    /// EBITDA as a percentage of revenue, when both are usable.
    pub fn ebitda_margin(&self) -> Option<Decimal> {
        match self.ebitda {
            Some(ebitda) if self.revenue > Decimal::ZERO => Some(ebitda / self.revenue * dec!(100)),
            _ => None,
        }
    }

    /// The client's figures keyed by standard metric code, ready to be joined
    /// against an `IndustryBenchmarkSet`.
    pub fn metric_values(&self) -> BTreeMap<String, Decimal> {
        let mut values = BTreeMap::new();
        values.insert(metric_codes::GROSS_MARGIN.to_string(), self.gross_margin);
        values.insert(metric_codes::NET_MARGIN.to_string(), self.net_margin);
        if let Some(days) = self.debtor_days {
            values.insert(metric_codes::DEBTOR_DAYS.to_string(), days);
        }
        if let Some(days) = self.creditor_days {
            values.insert(metric_codes::CREDITOR_DAYS.to_string(), days);
        }
        if self.employee_count > 0 {
            values.insert(
                metric_codes::REVENUE_PER_EMPLOYEE.to_string(),
                self.revenue_per_employee,
            );
        }
        if let Some(margin) = self.ebitda_margin() {
            values.insert(metric_codes::EBITDA_MARGIN.to_string(), margin);
        }
        if let Some(concentration) = self.client_concentration {
            values.insert(metric_codes::CLIENT_CONCENTRATION.to_string(), concentration);
        }
        if let Some(growth) = self.revenue_growth {
            values.insert(metric_codes::REVENUE_GROWTH.to_string(), growth);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BaselineMetrics {
        BaselineMetrics {
            revenue: dec!(5000000),
            gross_margin: dec!(40),
            net_margin: dec!(10),
            ebitda: Some(dec!(750000)),
            employee_count: 25,
            revenue_per_employee: dec!(200000),
            debtor_days: Some(dec!(60)),
            creditor_days: None,
            client_concentration: None,
            surplus_cash: None,
            revenue_growth: Some(dec!(4)),
            period_end: None,
        }
    }

    #[test]
    fn derived_profits() {
        let baseline = sample();
        assert_eq!(baseline.gross_profit(), dec!(2000000));
        assert_eq!(baseline.net_profit(), dec!(500000));
        assert_eq!(baseline.ebitda_margin(), Some(dec!(15)));
    }

    #[test]
    fn metric_values_skip_unknown_figures() {
        let values = sample().metric_values();
        assert_eq!(values.get(metric_codes::EBITDA_MARGIN), Some(&dec!(15)));
        assert!(!values.contains_key(metric_codes::CLIENT_CONCENTRATION));
        assert!(!values.contains_key(metric_codes::CREDITOR_DAYS));
        assert_eq!(values.get(metric_codes::DEBTOR_DAYS), Some(&dec!(60)));
        assert_eq!(values.get(metric_codes::REVENUE_GROWTH), Some(&dec!(4)));
    }
}
