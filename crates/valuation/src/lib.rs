//! # Valuebridge Valuation Engine
//!
//! Derives the valuation bridge for an owner-managed business:
//! baseline value, suppressor discounts, current market value, the value gap and
//! what could be recovered, plus an exit readiness score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** depends on `core-types` and `configuration` only. The
//!   industry multiples and readiness weights are injected reference data.
//! - **Explicit Unavailability:** a business that cannot be valued (no positive
//!   EBITDA, no revenue) yields `ValuationOutcome::Unavailable`, never a zero.
//! - **Ranges, not Points:** every monetary output is a `{low, mid, high}` estimate.
//!
//! ## Public API
//!
//! - `ValuationEngine`: the single-pass valuation pipeline.
//! - `calculate_surplus_cash`: the surplus cash model feeding the baseline.
//! - `baseline_value`: EBITDA x multiple + surplus cash, without any discount.
//! - `detect_suppressors` / `identify_enhancers`: assessment to value factors.
//! - `analyse_trends`: multi-year direction and recovery detection.
//! - `OwnerAssessment::founder_risk`: a 0-100 founder dependency score.

pub mod assessment;
pub mod discount;
pub mod engine;
pub mod enhancers;
pub mod error;
pub mod multiples;
pub mod path;
pub mod readiness;
pub mod suppressors;
pub mod surplus_cash;
pub mod trends;

pub use assessment::{FounderRisk, FounderRiskSignal, OwnerAssessment};
pub use discount::{AggregateDiscount, aggregate_discount};
pub use engine::{
    OmittedFactor, ValuationEngine, ValuationOutcome, ValuationRequest, ValuationUnavailable,
    ValueAnalysis,
};
pub use enhancers::identify_enhancers;
pub use error::ValuationError;
pub use multiples::{ValuationBaseline, baseline_value};
pub use path::{PathToValue, path_to_value};
pub use readiness::{ExitReadiness, ReadinessArea, ReadinessComponent, Verdict, assess_readiness};
pub use suppressors::detect_suppressors;
pub use surplus_cash::{BufferBasis, SurplusCashAnalysis, calculate_surplus_cash};
pub use trends::{FinancialTrends, MetricTrend, TrendDirection, TrendMetric, YearFigures, analyse_trends};
