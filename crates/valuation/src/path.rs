use core_types::{Estimate, ValueSuppressor};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathToValue {
    /// Value that fixing the remediable suppressors could win back, capped at the gap.
    pub recoverable_value: Estimate,
    pub timeframe_months: u32,
    /// Remediation actions, most valuable first, each listed once.
    pub key_actions: Vec<String>,
}

/// Builds the path to value from the remediable suppressors.
///
/// Suppressor impacts must already be priced. `value_gap` caps the recoverable
/// amount per bound, since standalone impacts overlap once combined.
pub fn path_to_value(
    suppressors: &[ValueSuppressor],
    value_gap: &Estimate,
    standard_horizon_months: u32,
) -> PathToValue {
    let remediable: Vec<&ValueSuppressor> = suppressors.iter().filter(|s| s.remediable).collect();

    let recoverable_value = remediable
        .iter()
        .fold(Estimate::zero(), |total, s| {
            let impact = s.impact_amount;
            total + Estimate::new(impact.low, impact.mid(), impact.high)
        })
        .min_each(value_gap);

    let timeframe_months = remediable
        .iter()
        .filter_map(|s| s.remediation.as_ref().and_then(|r| r.time_months))
        .max()
        .unwrap_or(standard_horizon_months);

    let key_actions = remediable
        .iter()
        .sorted_by(|a, b| {
            b.impact_amount
                .mid()
                .cmp(&a.impact_amount.mid())
                .then_with(|| a.severity.cmp(&b.severity))
        })
        .map(|s| s.action_label())
        .unique()
        .collect();

    tracing::debug!(
        remediable = remediable.len(),
        recoverable = %recoverable_value.mid,
        timeframe_months,
        "Path to value built."
    );

    PathToValue {
        recoverable_value,
        timeframe_months,
        key_actions,
    }
}

impl PathToValue {
    pub fn is_empty(&self) -> bool {
        self.key_actions.is_empty() && self.recoverable_value.mid == Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Band, FactorCategory, Remediation, Severity, ValueFactor};
    use rust_decimal_macros::dec;

    fn priced(id: &str, impact: (Decimal, Decimal), action: Option<(&str, Option<u32>)>, remediable: bool) -> ValueSuppressor {
        ValueFactor {
            id: id.to_string(),
            name: id.to_string(),
            category: FactorCategory::Other,
            severity: Severity::High,
            discount_percent: Band::new(dec!(5), dec!(10)),
            impact_amount: Band::new(impact.0, impact.1),
            remediable,
            evidence: String::new(),
            remediation: action.map(|(a, months)| Remediation {
                action: a.to_string(),
                time_months: months,
            }),
        }
    }

    #[test]
    fn only_remediable_suppressors_count() {
        let suppressors = vec![
            priced("a", (dec!(100), dec!(300)), Some(("Fix A", Some(6))), true),
            priced("b", (dec!(400), dec!(600)), Some(("Fix B", Some(30))), false),
            priced("c", (dec!(200), dec!(400)), Some(("Fix C", Some(12))), true),
        ];
        let gap = Estimate::new(dec!(10000), dec!(10000), dec!(10000));
        let path = path_to_value(&suppressors, &gap, 24);

        assert_eq!(path.recoverable_value, Estimate::new(dec!(300), dec!(500), dec!(700)));
        assert_eq!(path.timeframe_months, 12);
        assert_eq!(path.key_actions, vec!["Fix C".to_string(), "Fix A".to_string()]);
    }

    #[test]
    fn actions_are_deduplicated_and_capped_by_gap() {
        let suppressors = vec![
            priced("a", (dec!(100), dec!(300)), Some(("Exit Readiness Programme", None)), true),
            priced("b", (dec!(50), dec!(150)), Some(("Exit Readiness Programme", None)), true),
            priced("c", (dec!(10), dec!(20)), None, true),
        ];
        let gap = Estimate::new(dec!(120), dec!(200), dec!(400));
        let path = path_to_value(&suppressors, &gap, 24);

        assert_eq!(path.recoverable_value, Estimate::new(dec!(120), dec!(200), dec!(400)));
        assert_eq!(path.timeframe_months, 24);
        assert_eq!(
            path.key_actions,
            vec!["Exit Readiness Programme".to_string(), "Address c".to_string()]
        );
    }
}
