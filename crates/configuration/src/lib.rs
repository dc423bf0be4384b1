use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalysisSettings, Config, IndustryMultiple, IndustryMultiples, LogFormat, LoggingConfig,
    ReadinessSettings, ReadinessWeights, RecoveryFactor, ScenarioAssumptions, SurplusCashPolicy,
    ValuationSettings, DEFAULT_INDUSTRY,
};

/// Prefix for environment overrides, e.g. `VALUEBRIDGE__VALUATION__STANDARD_HORIZON_MONTHS=18`.
pub const ENV_PREFIX: &str = "VALUEBRIDGE";

/// Loads the application configuration.
///
/// Reads the TOML file at `path` when one is given, layers `VALUEBRIDGE__*`
/// environment variables on top, deserializes into our strongly-typed `Config`
/// and validates it. Sections that are absent keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        industries = config.valuation.multiples.0.len(),
        horizon_months = config.valuation.standard_horizon_months,
        "Configuration loaded."
    );
    Ok(config)
}

impl Config {
    /// Checks that the loaded values are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights_total = self.readiness.weights.total();
        if weights_total != dec!(100) {
            return Err(ConfigError::ValidationError(format!(
                "readiness weights must sum to 100, got {weights_total}"
            )));
        }
        if self.readiness.blocker_threshold > self.readiness.strength_threshold {
            return Err(ConfigError::ValidationError(
                "readiness blocker_threshold must not exceed strength_threshold".to_string(),
            ));
        }
        if self.valuation.multiples.lookup(DEFAULT_INDUSTRY).is_none() {
            return Err(ConfigError::ValidationError(
                "valuation multiples must contain a DEFAULT row".to_string(),
            ));
        }
        for (code, row) in &self.valuation.multiples.0 {
            if row.low <= Decimal::ZERO || row.low > row.mid || row.mid > row.high {
                return Err(ConfigError::ValidationError(format!(
                    "multiple range for {code} must satisfy 0 < low <= mid <= high"
                )));
            }
        }
        for (code, recovery) in &self.analysis.recovery_factors {
            if recovery.factor <= Decimal::ZERO || recovery.factor > Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "recovery factor for {code} must be in (0, 1]"
                )));
            }
        }
        let policy = &self.surplus_cash;
        if policy.buffer_months < Decimal::ZERO
            || policy.fixed_cost_ratio < Decimal::ZERO
            || policy.fixed_cost_ratio > Decimal::ONE
            || policy.staff_cost_proxy < Decimal::ONE
        {
            return Err(ConfigError::ValidationError(
                "surplus_cash policy values are out of range".to_string(),
            ));
        }
        if self.scenarios.value_multiple <= Decimal::ZERO || self.scenarios.cost_per_head <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "scenario value_multiple and cost_per_head must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.valuation.standard_horizon_months, 24);
        assert_eq!(config.scenarios.value_multiple, dec!(5));
    }

    #[test]
    fn multiples_lookup_ignores_case_and_falls_back() {
        let multiples = IndustryMultiples::default();
        let (code, row) = multiples.lookup("it_services").unwrap();
        assert_eq!(code, "IT_SERVICES");
        assert_eq!(row.mid, dec!(7));

        let (code, row) = multiples.lookup("UNDERWATER_BASKETS").unwrap();
        assert_eq!(code, DEFAULT_INDUSTRY);
        assert_eq!(row.range().mid, dec!(5));
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let mut config = Config::default();
        config.readiness.weights.documentation = dec!(30);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn recovery_factor_falls_back_to_default() {
        let analysis = AnalysisSettings::default();
        assert_eq!(analysis.recovery_factor("construction").unwrap().factor, dec!(0.55));
        assert_eq!(analysis.recovery_factor("UNKNOWN").unwrap().factor, dec!(0.70));
    }

    #[test]
    fn file_values_override_defaults() {
        // The extension tells the config crate which format to parse.
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[valuation]\nstandard_horizon_months = 18\n\n[scenarios]\nvalue_multiple = 6\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.valuation.standard_horizon_months, 18);
        assert_eq!(config.scenarios.value_multiple, dec!(6));
        // Untouched sections keep their defaults.
        assert_eq!(config.surplus_cash.buffer_months, dec!(3));
        assert!(config.valuation.multiples.lookup("SAAS_SOFTWARE").is_some());
    }
}
