use serde::Serialize;

/// Where a resolved figure came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Read directly from the named raw field.
    Supplied { key: String },
    /// Calculated exactly from other figures.
    Derived { formula: String },
    /// Approximated with a rule of thumb.
    Estimated { formula: String },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProvenance {
    pub field: &'static str,
    pub provenance: Provenance,
}

impl FieldProvenance {
    pub fn is_derived(&self) -> bool {
        matches!(
            self.provenance,
            Provenance::Derived { .. } | Provenance::Estimated { .. }
        )
    }
}
