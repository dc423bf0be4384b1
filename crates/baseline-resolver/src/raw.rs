use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Named figures as handed over by the surrounding application.
///
/// Keys are matched case-insensitively so `Revenue` and `revenue` are the same field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFinancials {
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Decimal>,
}

impl RawFinancials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mostly for tests and callers assembling figures by hand.
    pub fn with(mut self, key: &str, value: Decimal) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }

    /// The first of `keys` that is present, with the key that matched.
    pub fn first_of<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, Decimal)> {
        keys.iter().find_map(|key| self.get(key).map(|value| (*key, value)))
    }
}
