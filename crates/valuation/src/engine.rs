use crate::discount::{AggregateDiscount, aggregate_discount};
use crate::error::ValuationError;
use crate::multiples::{ValuationBaseline, baseline_value};
use crate::path::{PathToValue, path_to_value};
use crate::readiness::{ExitReadiness, assess_readiness};
use crate::trends::FinancialTrends;
use configuration::{Config, ReadinessSettings, ValuationSettings};
use core_types::{Band, BaselineMetrics, Estimate, ValueEnhancer, ValueSuppressor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Everything one valuation run needs. Borrowed for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct ValuationRequest<'a> {
    pub baseline: &'a BaselineMetrics,
    pub industry_code: &'a str,
    pub suppressors: &'a [ValueSuppressor],
    pub enhancers: &'a [ValueEnhancer],
    /// Overrides `baseline.surplus_cash` when set.
    pub surplus_cash: Option<Decimal>,
    /// Multi-year trends, when earlier years were supplied.
    pub trends: Option<&'a FinancialTrends>,
}

/// A suppressor left out of the valuation, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmittedFactor {
    pub id: String,
    pub reason: String,
}

/// The full valuation bridge from baseline value to potential value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAnalysis {
    pub baseline: ValuationBaseline,
    /// Ordered by severity, then by impact.
    pub suppressors: Vec<ValueSuppressor>,
    pub enhancers: Vec<ValueEnhancer>,
    pub omitted_factors: Vec<OmittedFactor>,
    pub aggregate_discount: AggregateDiscount,
    pub current_market_value: Estimate,
    pub value_gap: Estimate,
    pub value_gap_percent: Decimal,
    pub potential_value: Estimate,
    pub exit_readiness: ExitReadiness,
    pub path_to_value: PathToValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationUnavailable {
    pub reason: String,
}

/// A valuation either completes or says plainly that it could not be done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValuationOutcome {
    Available(Box<ValueAnalysis>),
    Unavailable(ValuationUnavailable),
}

impl ValuationOutcome {
    pub fn analysis(&self) -> Option<&ValueAnalysis> {
        match self {
            ValuationOutcome::Available(analysis) => Some(analysis),
            ValuationOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ValuationOutcome::Available(_))
    }
}

/// Runs the valuation pipeline with validated reference data.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    settings: ValuationSettings,
    readiness: ReadinessSettings,
}

impl ValuationEngine {
    /// Creates a new `ValuationEngine`, checking that the parameters are logical.
    pub fn new(settings: ValuationSettings, readiness: ReadinessSettings) -> Result<Self, ValuationError> {
        if settings.standard_horizon_months == 0 {
            return Err(ValuationError::InvalidParameters(
                "standard_horizon_months must be greater than 0".to_string(),
            ));
        }
        if settings.multiples.lookup(configuration::DEFAULT_INDUSTRY).is_none() {
            return Err(ValuationError::InvalidParameters(
                "the multiples table needs a DEFAULT row".to_string(),
            ));
        }
        if readiness.weights.total() != dec!(100) {
            return Err(ValuationError::InvalidParameters(
                "readiness weights must sum to 100".to_string(),
            ));
        }
        Ok(Self { settings, readiness })
    }

    pub fn from_config(config: &Config) -> Result<Self, ValuationError> {
        Self::new(config.valuation.clone(), config.readiness.clone())
    }

    /// Values the business, or explains why it cannot be valued.
    ///
    /// Suppressors with an unusable discount band are dropped into
    /// `omitted_factors`; they never fail the run.
    #[tracing::instrument(skip(self, request), fields(industry = request.industry_code))]
    pub fn calculate(&self, request: &ValuationRequest<'_>) -> ValuationOutcome {
        let baseline = match baseline_value(
            request.baseline,
            request.industry_code,
            &self.settings.multiples,
            request.surplus_cash,
        ) {
            Ok(baseline) => baseline,
            Err(e) => {
                tracing::warn!(error = %e, "Valuation unavailable.");
                return ValuationOutcome::Unavailable(ValuationUnavailable { reason: e.to_string() });
            }
        };

        let mut omitted_factors = Vec::new();
        let mut suppressors: Vec<ValueSuppressor> = Vec::with_capacity(request.suppressors.len());
        for suppressor in request.suppressors {
            if suppressor.discount_percent.is_valid_discount() {
                suppressors.push(price(suppressor, baseline.enterprise_value.mid));
            } else {
                tracing::warn!(id = %suppressor.id, band = ?suppressor.discount_percent, "Omitting suppressor with invalid discount.");
                omitted_factors.push(OmittedFactor {
                    id: suppressor.id.clone(),
                    reason: format!(
                        "discount band {}-{} is not within 0 <= low <= high < 100",
                        suppressor.discount_percent.low, suppressor.discount_percent.high
                    ),
                });
            }
        }
        suppressors.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then_with(|| b.impact_amount.mid().cmp(&a.impact_amount.mid()))
        });

        let aggregate = aggregate_discount(&suppressors);
        let discount = aggregate.percent_range.map(|pct| pct / dec!(100));
        let ev = baseline.enterprise_value;

        // The widest discount meets the lowest value, so the range only widens.
        let current_market_value = Estimate::new(
            ev.low * (Decimal::ONE - discount.high),
            ev.mid * (Decimal::ONE - discount.mid),
            ev.high * (Decimal::ONE - discount.low),
        );
        let value_gap = Estimate::new(
            ev.low * discount.low,
            ev.mid * discount.mid,
            ev.high * discount.high,
        );
        let value_gap_percent = if baseline.enterprise_value.mid > Decimal::ZERO {
            value_gap.mid / baseline.enterprise_value.mid * dec!(100)
        } else {
            Decimal::ZERO
        };

        let exit_readiness = assess_readiness(
            request.baseline,
            &suppressors,
            request.enhancers,
            request.trends,
            &self.readiness,
        );
        let path_to_value = path_to_value(&suppressors, &value_gap, self.settings.standard_horizon_months);
        let potential_value = current_market_value + path_to_value.recoverable_value;

        tracing::info!(
            enterprise_value = %baseline.enterprise_value.mid,
            current_market_value = %current_market_value.mid,
            value_gap_percent = %value_gap_percent.round_dp(1),
            readiness = %exit_readiness.score,
            "Valuation complete."
        );

        ValuationOutcome::Available(Box::new(ValueAnalysis {
            baseline,
            suppressors,
            enhancers: request.enhancers.to_vec(),
            omitted_factors,
            aggregate_discount: aggregate,
            current_market_value,
            value_gap,
            value_gap_percent,
            potential_value,
            exit_readiness,
            path_to_value,
        }))
    }
}

/// Prices a suppressor's standalone impact against the enterprise value.
fn price(suppressor: &ValueSuppressor, ev_mid: Decimal) -> ValueSuppressor {
    let band = suppressor.discount_percent;
    let mut priced = suppressor.clone();
    priced.impact_amount = Band::new(ev_mid * band.low / dec!(100), ev_mid * band.high / dec!(100));
    priced
}
