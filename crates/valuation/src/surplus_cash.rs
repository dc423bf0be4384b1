use crate::error::ValuationError;
use configuration::SurplusCashPolicy;
use core_types::{Confidence, SurplusCashInputs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How the operating buffer was arrived at, most reliable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferBasis {
    /// Supplied as a figure.
    Explicit,
    /// Months of staff plus admin costs.
    StaffAndAdmin,
    /// Months of staff costs, grossed up for the other overheads.
    StaffProxy,
    /// A fixed-cost share of revenue.
    RevenueRatio,
}

/// Cash held beyond what normal operations require.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurplusCashAnalysis {
    pub actual_cash: Decimal,
    pub operating_buffer: Decimal,
    pub buffer_basis: BufferBasis,
    /// Negative when suppliers fund the business.
    pub working_capital_requirement: Decimal,
    pub required_cash: Decimal,
    /// Never negative. A deficit is reported in `shortfall` instead.
    pub surplus_cash: Decimal,
    pub shortfall: Option<Decimal>,
    pub surplus_as_percent_of_revenue: Option<Decimal>,
    pub supplier_funded: bool,
    pub confidence: Confidence,
    pub methodology: Vec<String>,
}

impl SurplusCashAnalysis {
    pub fn has_surplus(&self) -> bool {
        self.surplus_cash > Decimal::ZERO
    }
}

/// Works out surplus cash as `actual cash - (operating buffer + working capital requirement)`.
///
/// # Errors
///
/// `MissingRequiredInput` when there is no cash figure, or when nothing is known
/// from which to size an operating buffer.
pub fn calculate_surplus_cash(
    inputs: &SurplusCashInputs,
    policy: &SurplusCashPolicy,
) -> Result<SurplusCashAnalysis, ValuationError> {
    let actual_cash = inputs
        .actual_cash
        .ok_or(ValuationError::MissingRequiredInput("actual_cash"))?;
    let mut methodology = Vec::new();

    let (operating_buffer, buffer_basis) = operating_buffer(inputs, policy)?;
    methodology.push(match buffer_basis {
        BufferBasis::Explicit => format!("Operating buffer supplied: {operating_buffer}"),
        BufferBasis::StaffAndAdmin => format!(
            "Operating buffer: {} months of staff and admin costs = {operating_buffer}",
            policy.buffer_months
        ),
        BufferBasis::StaffProxy => format!(
            "Operating buffer: {} months of staff costs x {} for other overheads = {operating_buffer}",
            policy.buffer_months, policy.staff_cost_proxy
        ),
        BufferBasis::RevenueRatio => format!(
            "Operating buffer: {} months of fixed costs at {} of revenue = {operating_buffer}",
            policy.buffer_months, policy.fixed_cost_ratio
        ),
    });

    let (working_capital_requirement, wcr_explicit) = match inputs.working_capital_requirement {
        Some(wcr) => {
            methodology.push(format!("Working capital requirement supplied: {wcr}"));
            (wcr, true)
        }
        None => {
            let debtors = inputs.debtors.unwrap_or_default();
            let stock = inputs.stock.unwrap_or_default();
            let creditors = inputs.creditors.unwrap_or_default();
            let wcr = debtors + stock - creditors;
            methodology.push(format!(
                "Working capital requirement: debtors {debtors} + stock {stock} - creditors {creditors} = {wcr}"
            ));
            (wcr, false)
        }
    };

    let required_cash = operating_buffer + working_capital_requirement;
    let raw_surplus = actual_cash - required_cash;
    methodology.push(format!(
        "Surplus: cash {actual_cash} - required {required_cash} = {raw_surplus}"
    ));

    let (surplus_cash, shortfall) = if raw_surplus < Decimal::ZERO {
        tracing::debug!(%raw_surplus, "Cash is below operating requirements; reporting zero surplus.");
        (Decimal::ZERO, Some(-raw_surplus))
    } else {
        (raw_surplus, None)
    };

    let surplus_as_percent_of_revenue = inputs
        .revenue
        .filter(|revenue| *revenue > Decimal::ZERO)
        .map(|revenue| surplus_cash / revenue * dec!(100));

    // A supplied working capital requirement stands in for both balances.
    let explicit = [
        true,
        matches!(buffer_basis, BufferBasis::Explicit | BufferBasis::StaffAndAdmin),
        wcr_explicit || inputs.debtors.is_some(),
        wcr_explicit || inputs.creditors.is_some(),
    ]
    .into_iter()
    .filter(|supplied| *supplied)
    .count();
    let confidence = match explicit {
        4 => Confidence::High,
        2 | 3 => Confidence::Medium,
        _ => Confidence::Low,
    };

    tracing::debug!(
        %actual_cash,
        %required_cash,
        %surplus_cash,
        %confidence,
        "Surplus cash calculated."
    );

    Ok(SurplusCashAnalysis {
        actual_cash,
        operating_buffer,
        buffer_basis,
        working_capital_requirement,
        required_cash,
        surplus_cash,
        shortfall,
        surplus_as_percent_of_revenue,
        supplier_funded: working_capital_requirement < Decimal::ZERO,
        confidence,
        methodology,
    })
}

fn operating_buffer(
    inputs: &SurplusCashInputs,
    policy: &SurplusCashPolicy,
) -> Result<(Decimal, BufferBasis), ValuationError> {
    let months = policy.buffer_months / MONTHS_PER_YEAR;
    if let Some(buffer) = inputs.operating_buffer {
        return Ok((buffer, BufferBasis::Explicit));
    }
    match (inputs.staff_costs, inputs.admin_expenses, inputs.revenue) {
        (Some(staff), Some(admin), _) => Ok((months * (staff + admin), BufferBasis::StaffAndAdmin)),
        (Some(staff), None, _) => Ok((months * staff * policy.staff_cost_proxy, BufferBasis::StaffProxy)),
        (None, _, Some(revenue)) if revenue > Decimal::ZERO => {
            Ok((revenue * policy.fixed_cost_ratio * months, BufferBasis::RevenueRatio))
        }
        _ => Err(ValuationError::MissingRequiredInput("operating_buffer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SurplusCashPolicy {
        SurplusCashPolicy::default()
    }

    #[test]
    fn creditor_funded_business_releases_more_cash() {
        let inputs = SurplusCashInputs {
            actual_cash: Some(dec!(3000000)),
            operating_buffer: Some(dec!(1000000)),
            working_capital_requirement: Some(dec!(-500000)),
            ..Default::default()
        };
        let analysis = calculate_surplus_cash(&inputs, &policy()).unwrap();
        assert_eq!(analysis.required_cash, dec!(500000));
        assert_eq!(analysis.surplus_cash, dec!(2500000));
        assert!(analysis.supplier_funded);
        assert_eq!(analysis.confidence, Confidence::High);
        assert_eq!(analysis.shortfall, None);
    }

    #[test]
    fn buffer_is_estimated_from_costs() {
        let inputs = SurplusCashInputs {
            actual_cash: Some(dec!(1000000)),
            staff_costs: Some(dec!(800000)),
            admin_expenses: Some(dec!(400000)),
            debtors: Some(dec!(200000)),
            creditors: Some(dec!(100000)),
            revenue: Some(dec!(2000000)),
            ..Default::default()
        };
        let analysis = calculate_surplus_cash(&inputs, &policy()).unwrap();
        assert_eq!(analysis.buffer_basis, BufferBasis::StaffAndAdmin);
        assert_eq!(analysis.operating_buffer, dec!(300000));
        assert_eq!(analysis.working_capital_requirement, dec!(100000));
        assert_eq!(analysis.surplus_cash, dec!(600000));
        assert_eq!(analysis.surplus_as_percent_of_revenue, Some(dec!(30)));
        assert_eq!(analysis.confidence, Confidence::High);
    }

    #[test]
    fn staff_only_and_revenue_estimates_lower_confidence() {
        let staff_only = SurplusCashInputs {
            actual_cash: Some(dec!(500000)),
            staff_costs: Some(dec!(400000)),
            ..Default::default()
        };
        let analysis = calculate_surplus_cash(&staff_only, &policy()).unwrap();
        assert_eq!(analysis.buffer_basis, BufferBasis::StaffProxy);
        assert_eq!(analysis.operating_buffer, dec!(150000));
        assert_eq!(analysis.confidence, Confidence::Low);

        let revenue_only = SurplusCashInputs {
            actual_cash: Some(dec!(500000)),
            revenue: Some(dec!(1200000)),
            debtors: Some(dec!(50000)),
            ..Default::default()
        };
        let analysis = calculate_surplus_cash(&revenue_only, &policy()).unwrap();
        assert_eq!(analysis.buffer_basis, BufferBasis::RevenueRatio);
        assert_eq!(analysis.operating_buffer, dec!(75000));
        assert_eq!(analysis.confidence, Confidence::Medium);
    }

    #[test]
    fn deficit_is_never_a_negative_surplus() {
        let inputs = SurplusCashInputs {
            actual_cash: Some(dec!(100000)),
            operating_buffer: Some(dec!(250000)),
            ..Default::default()
        };
        let analysis = calculate_surplus_cash(&inputs, &policy()).unwrap();
        assert_eq!(analysis.surplus_cash, Decimal::ZERO);
        assert_eq!(analysis.shortfall, Some(dec!(150000)));
        assert!(!analysis.has_surplus());
    }

    #[test]
    fn missing_cash_or_buffer_basis_is_an_error() {
        let no_cash = SurplusCashInputs {
            operating_buffer: Some(dec!(1)),
            ..Default::default()
        };
        assert_eq!(
            calculate_surplus_cash(&no_cash, &policy()),
            Err(ValuationError::MissingRequiredInput("actual_cash"))
        );

        let no_basis = SurplusCashInputs {
            actual_cash: Some(dec!(1)),
            ..Default::default()
        };
        assert_eq!(
            calculate_surplus_cash(&no_basis, &policy()),
            Err(ValuationError::MissingRequiredInput("operating_buffer"))
        );
    }
}
