use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Benchmark percentiles for '{0}' are out of order (expected p25 <= p50 <= p75)")]
    UnorderedDistribution(String),
}
