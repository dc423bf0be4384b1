//! # Valuebridge Scenario Library
//!
//! This crate holds the "what-if" projections of the engine. It defines a
//! universal `Scenario` trait and provides one implementation per scenario type:
//! margin, pricing, cash, efficiency, diversification and an exit value preview.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Logic:** This is a pure logic crate. It reads a `BaselineMetrics`
//!   snapshot and never writes back. It depends on `core-types`, `configuration`
//!   and, for the exit preview, `valuation`.
//! - **Scenario Agnostic Callers:** By using the `Scenario` trait, the binary can
//!   run any projection without knowing its internal details.
//! - **Separate Kinds of Value:** Every result is tagged with an `ImpactKind`.
//!   Recurring profit, one-off cash and valuation effects are totalled apart.
//! - **Extensibility:** Adding a new scenario involves creating a new module,
//!   implementing the `Scenario` trait, and adding it to `ScenarioType` and the `factory`.
//!
//! ## Public API
//!
//! The primary public components are:
//! - `Scenario`: The core trait all scenarios implement.
//! - `ScenarioType`: A simple enum to identify which scenario to run.
//! - `calculate_scenario`: Runs a scenario against a baseline.
//! - `ScenarioInputs` and `ScenarioTotals`.

// Declare all the modules that constitute this crate.
pub mod cash;
pub mod diversification;
pub mod efficiency;
pub mod error;
pub mod exit;
pub mod factory;
pub mod format;
pub mod inputs;
pub mod margin;
pub mod pricing;
pub mod result;
pub mod totals;

// Re-export the key components to create a clean, public-facing API.
pub use cash::CashOptimisation;
pub use diversification::CustomerDiversification;
pub use efficiency::EfficiencyGains;
pub use error::ScenarioError;
pub use exit::ExitReadinessPreview;
pub use factory::{calculate_scenario, create_scenario};
pub use format::{format_compact, format_value};
pub use inputs::ScenarioInputs;
pub use margin::MarginImprovement;
pub use pricing::PricingPower;
pub use result::{ImpactKind, PrimaryMetric, ScenarioResult, ScenarioType, SecondaryMetric};
pub use totals::ScenarioTotals;

use core_types::BaselineMetrics;

/// The core trait that all scenarios must implement.
///
/// A scenario is stateless: the assumptions it needs are captured when it is
/// created, and `calculate` borrows the baseline and inputs without changing them.
/// The `Send + Sync` bounds let callers share scenarios across threads.
pub trait Scenario: Send + Sync {
    fn scenario_type(&self) -> ScenarioType;

    /// Projects the scenario's targets against a baseline.
    ///
    /// # Returns
    ///
    /// * `Ok(ScenarioResult)` - the projection, tagged with its kind of value.
    /// * `Err(ScenarioError)` - if the baseline or inputs cannot support it.
    fn calculate(&self, baseline: &BaselineMetrics, inputs: &ScenarioInputs) -> Result<ScenarioResult, ScenarioError>;
}
