use crate::cash::CashOptimisation;
use crate::diversification::CustomerDiversification;
use crate::efficiency::EfficiencyGains;
use crate::exit::ExitReadinessPreview;
use crate::margin::MarginImprovement;
use crate::pricing::PricingPower;
use crate::result::{ScenarioResult, ScenarioType};
use crate::{Scenario, ScenarioError, ScenarioInputs};
use configuration::ScenarioAssumptions;
use core_types::BaselineMetrics;
use rust_decimal::Decimal;

/// Creates a scenario instance for the given type.
///
/// This factory decouples the callers from the concrete scenario structs. It
/// takes a `ScenarioType` and the shared assumptions and returns a boxed trait
/// object ready to calculate.
pub fn create_scenario(scenario_type: ScenarioType, assumptions: &ScenarioAssumptions) -> Box<dyn Scenario> {
    match scenario_type {
        ScenarioType::Margin => Box::new(MarginImprovement::new(assumptions)),
        ScenarioType::Pricing => Box::new(PricingPower::new(assumptions)),
        ScenarioType::Cash => Box::new(CashOptimisation::new(assumptions)),
        ScenarioType::Efficiency => Box::new(EfficiencyGains::new(assumptions)),
        ScenarioType::Diversification => Box::new(CustomerDiversification::new(assumptions)),
        ScenarioType::Exit => Box::new(ExitReadinessPreview::new()),
    }
}

/// Runs one what-if scenario against a baseline.
///
/// # Errors
///
/// `InvalidBaseline` when revenue is not positive or the baseline lacks a figure
/// the scenario depends on. `MissingRequiredInput` when a target is absent and
/// `InvalidInput` when one makes no sense.
pub fn calculate_scenario(
    scenario_type: ScenarioType,
    baseline: &BaselineMetrics,
    inputs: &ScenarioInputs,
    assumptions: &ScenarioAssumptions,
) -> Result<ScenarioResult, ScenarioError> {
    if baseline.revenue <= Decimal::ZERO {
        tracing::warn!(scenario = %scenario_type, revenue = %baseline.revenue, "Scenario skipped: revenue is not positive.");
        return Err(ScenarioError::InvalidBaseline(format!(
            "revenue is {}",
            baseline.revenue
        )));
    }

    let result = create_scenario(scenario_type, assumptions).calculate(baseline, inputs)?;
    tracing::debug!(
        scenario = %scenario_type,
        delta = %result.primary_metric.delta,
        kind = ?result.impact_kind,
        "Scenario calculated."
    );
    Ok(result)
}
