use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The metric has no usable reference point. Callers skip it and carry on.
    #[error("Insufficient benchmark data: {0}")]
    InsufficientBenchmarkData(String),

    #[error("Client value is missing or unusable: {0}")]
    MissingClientValue(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
