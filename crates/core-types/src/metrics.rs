use crate::enums::MetricUnit;
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The quartile points of an industry benchmark for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BenchmarkDistribution {
    pub p25: Option<Decimal>,
    pub p50: Option<Decimal>,
    pub p75: Option<Decimal>,
}

impl BenchmarkDistribution {
    pub fn new(p25: Decimal, p50: Decimal, p75: Decimal) -> Self {
        Self {
            p25: Some(p25),
            p50: Some(p50),
            p75: Some(p75),
        }
    }

    /// The median, only when it is present and non-zero.
    pub fn usable_median(&self) -> Option<Decimal> {
        self.p50.filter(|p50| !p50.is_zero())
    }

    /// Checks `p25 <= p50 <= p75` over whichever points are present.
    pub fn is_ordered(&self) -> bool {
        let points: Vec<Decimal> = [self.p25, self.p50, self.p75].into_iter().flatten().collect();
        points.windows(2).all(|w| w[0] <= w[1])
    }
}

/// One client metric joined with its industry benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub code: String,
    pub name: String,
    /// `None` is a data gap, not a zero.
    pub client_value: Option<Decimal>,
    pub p25: Option<Decimal>,
    pub p50: Option<Decimal>,
    pub p75: Option<Decimal>,
    pub unit: MetricUnit,
    pub higher_is_better: bool,
}

impl MetricRecord {
    pub fn distribution(&self) -> BenchmarkDistribution {
        BenchmarkDistribution {
            p25: self.p25,
            p50: self.p50,
            p75: self.p75,
        }
    }
}

/// Reference data describing how an industry performs on one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDefinition {
    pub name: String,
    pub unit: MetricUnit,
    pub higher_is_better: bool,
    #[serde(flatten)]
    pub distribution: BenchmarkDistribution,
}

/// All benchmark definitions for one industry classification. Read-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndustryBenchmarkSet {
    pub industry_code: String,
    pub metrics: BTreeMap<String, BenchmarkDefinition>,
}

impl IndustryBenchmarkSet {
    pub fn new(industry_code: impl Into<String>) -> Self {
        Self {
            industry_code: industry_code.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of a definition.
    pub fn with_metric(mut self, code: impl Into<String>, definition: BenchmarkDefinition) -> Self {
        self.metrics.insert(code.into(), definition);
        self
    }

    pub fn get(&self, code: &str) -> Option<&BenchmarkDefinition> {
        self.metrics.get(code)
    }

    /// Rejects a set with no industry code or with quartiles out of order.
    ///
    /// The gap analyzer skips unordered metrics on its own; this lets a caller
    /// report bad reference data before running anything.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.industry_code.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "industry_code".to_string(),
                "must not be empty".to_string(),
            ));
        }
        match self.metrics.iter().find(|(_, def)| !def.distribution.is_ordered()) {
            Some((code, _)) => Err(CoreError::UnorderedDistribution(code.clone())),
            None => Ok(()),
        }
    }

    /// Joins client figures to the benchmark definitions.
    ///
    /// Every benchmarked metric yields a record, in code order, whether or not the
    /// client has a value for it. Client figures without a benchmark are dropped.
    pub fn records_for(&self, client_values: &BTreeMap<String, Decimal>) -> Vec<MetricRecord> {
        self.metrics
            .iter()
            .map(|(code, def)| MetricRecord {
                code: code.clone(),
                name: def.name.clone(),
                client_value: client_values.get(code).copied(),
                p25: def.distribution.p25,
                p50: def.distribution.p50,
                p75: def.distribution.p75,
                unit: def.unit,
                higher_is_better: def.higher_is_better,
            })
            .collect()
    }
}
