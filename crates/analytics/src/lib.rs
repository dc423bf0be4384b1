//! # Valuebridge Analytics Engine
//!
//! Positions a client's metrics against industry benchmark distributions and
//! sizes the financial opportunity in closing each gap to the median.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It depends only on `core-types` (Layer 0)
//!   and never touches configuration files, storage or the network.
//! - **Stateless Calculation:** `GapAnalyzer` takes `MetricRecord`s and produces a
//!   `GapReport`. Nothing is remembered between calls.
//! - **Graceful Degradation:** a metric without a usable benchmark is skipped and
//!   listed in the report, it never aborts the analysis.
//!
//! ## Public API
//!
//! - `percentile_of`: piecewise-linear percentile rank against `{p25, p50, p75}`.
//! - `analyze_gaps` / `GapAnalyzer`: gap and strength classification with impacts.
//! - `margin_opportunity`: addressable value of a gross margin gap.

pub mod engine;
pub mod error;
pub mod opportunity;
pub mod report;
pub mod statistics;

pub use engine::{AnalysisOptions, GapAnalyzer, analyze_gaps};
pub use error::AnalyticsError;
pub use opportunity::{MarginOpportunity, margin_opportunity};
pub use report::{Classification, GapReport, MetricComparison, SkippedMetric};
pub use statistics::{PositionBand, percentile_of};
