use thiserror::Error;
use valuation::ValuationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// The baseline cannot support the calculation, e.g. revenue is not positive.
    #[error("Scenario cannot run on this baseline: {0}")]
    InvalidBaseline(String),

    /// A target the scenario needs was not supplied. Callers supply a default first.
    #[error("Scenario requires input '{0}'")]
    MissingRequiredInput(&'static str),

    #[error("Scenario received an invalid input: {0}")]
    InvalidInput(String),

    #[error("Valuation error: {0}")]
    Valuation(ValuationError),
}

impl From<ValuationError> for ScenarioError {
    fn from(e: ValuationError) -> Self {
        match e {
            ValuationError::InvalidBaseline(reason) => ScenarioError::InvalidBaseline(reason),
            other => ScenarioError::Valuation(other),
        }
    }
}
