use crate::error::ResolverError;
use crate::provenance::{FieldProvenance, Provenance};
use crate::raw::RawFinancials;
use core_types::{BaselineMetrics, SurplusCashInputs};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

// Alternative names seen in extracted accounts, most specific first.
const REVENUE: &[&str] = &["revenue", "turnover", "total_revenue", "sales"];
const GROSS_MARGIN: &[&str] = &["gross_margin", "gross_margin_pct"];
const GROSS_PROFIT: &[&str] = &["gross_profit"];
const COST_OF_SALES: &[&str] = &["cost_of_sales", "cost_of_goods_sold"];
const NET_MARGIN: &[&str] = &["net_margin", "net_margin_pct"];
const NET_PROFIT: &[&str] = &["net_profit", "profit_after_tax", "profit_for_the_year"];
const OPERATING_PROFIT: &[&str] = &["operating_profit", "profit_before_interest_and_tax"];
const EBITDA: &[&str] = &["ebitda"];
const EMPLOYEES: &[&str] = &["employee_count", "employees", "headcount", "average_employees"];
const REVENUE_PER_EMPLOYEE: &[&str] = &["revenue_per_employee"];
const DEBTOR_DAYS: &[&str] = &["debtor_days"];
const CREDITOR_DAYS: &[&str] = &["creditor_days"];
const CONCENTRATION: &[&str] = &[
    "client_concentration",
    "client_concentration_top3",
    "top3_customer_revenue_percentage",
];
const REVENUE_GROWTH: &[&str] = &["revenue_growth"];
const PRIOR_REVENUE: &[&str] = &["prior_revenue", "prior_year_revenue"];
const SURPLUS_CASH: &[&str] = &["surplus_cash"];
const CASH: &[&str] = &["cash", "cash_at_bank", "cash_at_bank_and_in_hand"];
const STAFF_COSTS: &[&str] = &["staff_costs", "total_staff_costs", "wages_and_salaries"];
const ADMIN_EXPENSES: &[&str] = &[
    "admin_expenses",
    "administrative_expenses",
    "other_operating_charges",
];
const DEBTORS: &[&str] = &["debtors", "trade_debtors", "debtors_due_within_one_year"];
const CREDITORS: &[&str] = &[
    "creditors",
    "trade_creditors",
    "amounts_falling_due_within_one_year",
    "current_liabilities",
];
const STOCK: &[&str] = &["stock", "stocks", "inventory"];
const OPERATING_BUFFER: &[&str] = &["operating_buffer"];
const WORKING_CAPITAL_REQUIREMENT: &[&str] = &["working_capital_requirement"];

/// EBITDA estimate from operating profit: add back roughly 5% for D&A.
const OPERATING_PROFIT_ADD_BACK: Decimal = dec!(1.05);
/// EBITDA estimate from net profit when nothing better exists.
const NET_PROFIT_UPLIFT: Decimal = dec!(1.3);
const DAYS_PER_YEAR: Decimal = dec!(365);

/// The resolved baseline plus the surplus cash inputs found in the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBaseline {
    pub baseline: BaselineMetrics,
    pub surplus_inputs: SurplusCashInputs,
    pub provenance: Vec<FieldProvenance>,
}

impl ResolvedBaseline {
    /// Names of the baseline fields that were not read directly.
    pub fn derived_fields(&self) -> Vec<&'static str> {
        self.provenance
            .iter()
            .filter(|p| p.is_derived())
            .map(|p| p.field)
            .collect()
    }

    pub fn provenance_of(&self, field: &str) -> Option<&Provenance> {
        self.provenance
            .iter()
            .find(|p| p.field == field)
            .map(|p| &p.provenance)
    }
}

/// Resolves raw, inconsistently named figures into a `BaselineMetrics`.
#[derive(Debug, Clone)]
pub struct BaselineResolver {
    /// Allow EBITDA to be estimated from operating or net profit.
    estimate_ebitda: bool,
}

impl Default for BaselineResolver {
    fn default() -> Self {
        Self { estimate_ebitda: true }
    }
}

/// Collects provenance while the individual chains run.
struct Trail(Vec<FieldProvenance>);

impl Trail {
    fn supplied(&mut self, field: &'static str, key: &str) {
        self.push(field, Provenance::Supplied { key: key.to_string() });
    }

    fn derived(&mut self, field: &'static str, formula: &str) {
        self.push(field, Provenance::Derived { formula: formula.to_string() });
    }

    fn estimated(&mut self, field: &'static str, formula: &str) {
        self.push(field, Provenance::Estimated { formula: formula.to_string() });
    }

    fn missing(&mut self, field: &'static str) {
        self.push(field, Provenance::Missing);
    }

    fn push(&mut self, field: &'static str, provenance: Provenance) {
        self.0.push(FieldProvenance { field, provenance });
    }
}

impl BaselineResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables the EBITDA rules of thumb; EBITDA is then `None` unless supplied.
    pub fn without_ebitda_estimates(mut self) -> Self {
        self.estimate_ebitda = false;
        self
    }

    pub fn resolve(&self, raw: &RawFinancials) -> Result<ResolvedBaseline, ResolverError> {
        let mut trail = Trail(Vec::new());

        let (key, revenue) = raw
            .first_of(REVENUE)
            .ok_or(ResolverError::MissingField("revenue"))?;
        trail.supplied("revenue", key);

        let gross_margin = resolve_gross_margin(raw, revenue, &mut trail)?;
        let net_margin = resolve_net_margin(raw, revenue, &mut trail)?;
        let ebitda = self.resolve_ebitda(raw, &mut trail);
        let employee_count = resolve_employees(raw, &mut trail)?;
        let revenue_per_employee = resolve_revenue_per_employee(raw, revenue, employee_count, &mut trail);
        let debtor_days = resolve_days(
            raw,
            "debtor_days",
            DEBTOR_DAYS,
            DEBTORS,
            Some(revenue),
            "debtors / revenue x 365",
            &mut trail,
        );
        let cost_of_sales = raw
            .first_of(COST_OF_SALES)
            .map(|(_, v)| v)
            .or_else(|| raw.first_of(GROSS_PROFIT).map(|(_, gp)| revenue - gp));
        let creditor_days = resolve_days(
            raw,
            "creditor_days",
            CREDITOR_DAYS,
            CREDITORS,
            cost_of_sales,
            "creditors / cost of sales x 365",
            &mut trail,
        );
        let client_concentration = match raw.first_of(CONCENTRATION) {
            Some((key, value)) => {
                trail.supplied("client_concentration", key);
                Some(value)
            }
            None => {
                trail.missing("client_concentration");
                None
            }
        };
        let revenue_growth = resolve_growth(raw, revenue, &mut trail);
        let surplus_cash = match raw.first_of(SURPLUS_CASH) {
            Some((key, value)) => {
                trail.supplied("surplus_cash", key);
                Some(value)
            }
            None => None,
        };

        let baseline = BaselineMetrics {
            revenue,
            gross_margin,
            net_margin,
            ebitda,
            employee_count,
            revenue_per_employee,
            debtor_days,
            creditor_days,
            client_concentration,
            surplus_cash,
            revenue_growth,
            period_end: raw.period_end,
        };

        let surplus_inputs = SurplusCashInputs {
            actual_cash: raw.first_of(CASH).map(|(_, v)| v),
            operating_buffer: raw.first_of(OPERATING_BUFFER).map(|(_, v)| v),
            staff_costs: raw.first_of(STAFF_COSTS).map(|(_, v)| v),
            admin_expenses: raw.first_of(ADMIN_EXPENSES).map(|(_, v)| v),
            revenue: Some(revenue),
            debtors: raw.first_of(DEBTORS).map(|(_, v)| v),
            creditors: raw.first_of(CREDITORS).map(|(_, v)| v),
            stock: raw.first_of(STOCK).map(|(_, v)| v),
            working_capital_requirement: raw.first_of(WORKING_CAPITAL_REQUIREMENT).map(|(_, v)| v),
        };

        let resolved = ResolvedBaseline {
            baseline,
            surplus_inputs,
            provenance: trail.0,
        };
        tracing::debug!(
            revenue = %resolved.baseline.revenue,
            derived = ?resolved.derived_fields(),
            "Baseline resolved."
        );
        Ok(resolved)
    }

    fn resolve_ebitda(&self, raw: &RawFinancials, trail: &mut Trail) -> Option<Decimal> {
        if let Some((key, value)) = raw.first_of(EBITDA).filter(|(_, v)| *v > Decimal::ZERO) {
            trail.supplied("ebitda", key);
            return Some(value);
        }
        if self.estimate_ebitda {
            if let Some((_, op)) = raw.first_of(OPERATING_PROFIT).filter(|(_, v)| *v > Decimal::ZERO) {
                trail.estimated("ebitda", "operating profit x 1.05");
                return Some(op * OPERATING_PROFIT_ADD_BACK);
            }
            if let Some((_, np)) = raw.first_of(NET_PROFIT).filter(|(_, v)| *v > Decimal::ZERO) {
                trail.estimated("ebitda", "net profit x 1.3");
                return Some(np * NET_PROFIT_UPLIFT);
            }
        }
        trail.missing("ebitda");
        None
    }
}

fn percent_of_revenue(value: Decimal, revenue: Decimal) -> Option<Decimal> {
    (revenue > Decimal::ZERO).then(|| value / revenue * dec!(100))
}

fn resolve_gross_margin(
    raw: &RawFinancials,
    revenue: Decimal,
    trail: &mut Trail,
) -> Result<Decimal, ResolverError> {
    if let Some((key, margin)) = raw.first_of(GROSS_MARGIN) {
        trail.supplied("gross_margin", key);
        return Ok(margin);
    }
    if let Some(margin) = raw
        .first_of(GROSS_PROFIT)
        .and_then(|(_, gp)| percent_of_revenue(gp, revenue))
    {
        trail.derived("gross_margin", "gross profit / revenue x 100");
        return Ok(margin);
    }
    if let Some(margin) = raw
        .first_of(COST_OF_SALES)
        .and_then(|(_, cos)| percent_of_revenue(revenue - cos, revenue))
    {
        trail.derived("gross_margin", "(revenue - cost of sales) / revenue x 100");
        return Ok(margin);
    }
    Err(ResolverError::MissingField("gross_margin"))
}

fn resolve_net_margin(
    raw: &RawFinancials,
    revenue: Decimal,
    trail: &mut Trail,
) -> Result<Decimal, ResolverError> {
    if let Some((key, margin)) = raw.first_of(NET_MARGIN) {
        trail.supplied("net_margin", key);
        return Ok(margin);
    }
    if let Some(margin) = raw
        .first_of(NET_PROFIT)
        .and_then(|(_, np)| percent_of_revenue(np, revenue))
    {
        trail.derived("net_margin", "net profit / revenue x 100");
        return Ok(margin);
    }
    Err(ResolverError::MissingField("net_margin"))
}

fn resolve_employees(raw: &RawFinancials, trail: &mut Trail) -> Result<u32, ResolverError> {
    match raw.first_of(EMPLOYEES) {
        Some((key, value)) => {
            let count = value
                .trunc()
                .to_u32()
                .ok_or_else(|| ResolverError::InvalidField {
                    field: "employee_count",
                    reason: format!("{value} is not a valid headcount"),
                })?;
            trail.supplied("employee_count", key);
            Ok(count)
        }
        None => {
            trail.missing("employee_count");
            Ok(0)
        }
    }
}

fn resolve_revenue_per_employee(
    raw: &RawFinancials,
    revenue: Decimal,
    employee_count: u32,
    trail: &mut Trail,
) -> Decimal {
    if let Some((key, value)) = raw.first_of(REVENUE_PER_EMPLOYEE) {
        trail.supplied("revenue_per_employee", key);
        return value;
    }
    if employee_count > 0 {
        trail.derived("revenue_per_employee", "revenue / employee count");
        return revenue / Decimal::from(employee_count);
    }
    trail.missing("revenue_per_employee");
    Decimal::ZERO
}

fn resolve_days(
    raw: &RawFinancials,
    field: &'static str,
    direct: &[&str],
    balance: &[&str],
    flow: Option<Decimal>,
    formula: &str,
    trail: &mut Trail,
) -> Option<Decimal> {
    if let Some((key, days)) = raw.first_of(direct) {
        trail.supplied(field, key);
        return Some(days);
    }
    let derived = match (raw.first_of(balance), flow) {
        (Some((_, amount)), Some(flow)) if flow > Decimal::ZERO => Some(amount / flow * DAYS_PER_YEAR),
        _ => None,
    };
    match derived {
        Some(_) => trail.derived(field, formula),
        None => trail.missing(field),
    }
    derived
}

fn resolve_growth(raw: &RawFinancials, revenue: Decimal, trail: &mut Trail) -> Option<Decimal> {
    if let Some((key, growth)) = raw.first_of(REVENUE_GROWTH) {
        trail.supplied("revenue_growth", key);
        return Some(growth);
    }
    match raw.first_of(PRIOR_REVENUE) {
        Some((_, prior)) if prior > Decimal::ZERO => {
            trail.derived("revenue_growth", "(revenue - prior revenue) / prior revenue x 100");
            Some((revenue - prior) / prior * dec!(100))
        }
        _ => {
            trail.missing("revenue_growth");
            None
        }
    }
}
