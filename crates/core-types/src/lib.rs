//! # Valuebridge Core Types
//!
//! The shared vocabulary of the benchmark analysis and valuation engine. Every other
//! crate in the workspace speaks in these types.
//!
//! As a Layer 0 crate it has no knowledge of configuration, logging or any of the
//! calculators. It only describes the data that flows between them.

pub mod baseline;
pub mod cash;
pub mod enums;
pub mod error;
pub mod factors;
pub mod metrics;
pub mod ranges;

// Re-export the core types to provide a clean public API.
pub use baseline::{BaselineMetrics, metric_codes};
pub use cash::SurplusCashInputs;
pub use enums::{Confidence, FactorCategory, MetricUnit, Severity, ValueFormat};
pub use error::CoreError;
pub use factors::{Remediation, ValueEnhancer, ValueFactor, ValueSuppressor};
pub use metrics::{BenchmarkDefinition, BenchmarkDistribution, IndustryBenchmarkSet, MetricRecord};
pub use ranges::{Band, Estimate};
