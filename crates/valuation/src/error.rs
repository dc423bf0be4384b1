use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("Valuation parameters from configuration are invalid: {0}")]
    InvalidParameters(String),

    /// Revenue or EBITDA cannot support a valuation.
    #[error("Baseline cannot be valued: {0}")]
    InvalidBaseline(String),

    #[error("Required input '{0}' was not supplied")]
    MissingRequiredInput(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
