use core_types::ValueFormat;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Compact amount: `2.5M`, `250k`, `950`.
pub fn format_compact(value: Decimal) -> String {
    let abs = value.abs();
    if abs >= dec!(1000000) {
        format!("{:.1}M", round(value / dec!(1000000), 1))
    } else if abs >= dec!(1000) {
        format!("{}k", round(value / dec!(1000), 0))
    } else {
        round(value, 0).to_string()
    }
}

pub fn format_value(value: Decimal, format: ValueFormat) -> String {
    match format {
        ValueFormat::Currency | ValueFormat::Number => format_compact(value),
        ValueFormat::Percent => format!("{:.1}%", round(value, 1)),
        ValueFormat::Days => format!("{} days", round(value, 0)),
    }
}
