use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    #[error("Required field '{0}' could not be resolved from any known source")]
    MissingField(&'static str),

    #[error("Field '{field}' has an unusable value: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
