use core_types::{Estimate, ValueSuppressor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDiscount {
    /// Combined discount, 0-100, per bound. `low` combines every suppressor's low
    /// bound, `high` every high bound and `mid` every midpoint.
    pub percent_range: Estimate,
    pub methodology: String,
}

impl AggregateDiscount {
    /// Share of the value kept after the discount, 0-1, per bound.
    pub fn retained(&self) -> Estimate {
        self.percent_range.map(|pct| Decimal::ONE - pct / dec!(100))
    }
}

/// Combines suppressor discounts multiplicatively.
///
/// Each suppressor removes its share of whatever value the others left, so the
/// result stays below 100% however many suppressors apply. Callers are expected to
/// have dropped suppressors whose band is not a valid discount.
pub fn aggregate_discount(suppressors: &[ValueSuppressor]) -> AggregateDiscount {
    let retained = suppressors.iter().fold(Estimate::point(Decimal::ONE), |kept, s| {
        let band = s.discount_percent;
        Estimate::new(
            kept.low * (Decimal::ONE - band.low / dec!(100)),
            kept.mid * (Decimal::ONE - band.mid() / dec!(100)),
            kept.high * (Decimal::ONE - band.high / dec!(100)),
        )
    });
    let percent_range = retained.map(|kept| (Decimal::ONE - kept) * dec!(100));

    let methodology = if suppressors.is_empty() {
        "No value suppressors identified.".to_string()
    } else {
        format!(
            "{} suppressors combined multiplicatively: value retained = product of (1 - discount) for each.",
            suppressors.len()
        )
    };

    AggregateDiscount {
        percent_range,
        methodology,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Band, FactorCategory, Severity, ValueFactor};

    fn with_band(low: Decimal, high: Decimal) -> ValueSuppressor {
        ValueFactor {
            id: "s".to_string(),
            name: "S".to_string(),
            category: FactorCategory::Other,
            severity: Severity::Medium,
            discount_percent: Band::new(low, high),
            impact_amount: Band::default(),
            remediable: true,
            evidence: String::new(),
            remediation: None,
        }
    }

    #[test]
    fn combines_multiplicatively_not_additively() {
        let aggregate = aggregate_discount(&[with_band(dec!(10), dec!(20)), with_band(dec!(5), dec!(15))]);
        assert_eq!(aggregate.percent_range.mid, dec!(23.5));
        assert_eq!(aggregate.retained().mid, dec!(0.765));
        assert_eq!(aggregate.percent_range.low, dec!(14.5));
        assert_eq!(aggregate.percent_range.high, dec!(32));
    }

    #[test]
    fn stays_below_one_hundred() {
        let heavy: Vec<ValueSuppressor> = (0..10).map(|_| with_band(dec!(60), dec!(99))).collect();
        let aggregate = aggregate_discount(&heavy);
        assert!(aggregate.percent_range.mid < dec!(100));
        assert!(aggregate.percent_range.high < dec!(100));
    }

    #[test]
    fn no_suppressors_no_discount() {
        assert_eq!(aggregate_discount(&[]).percent_range, Estimate::zero());
    }
}
