//! Analyzer configuration.

use serde::{Deserialize, Serialize};
use valuation_core::{NormalizeOptions, Result, ValuationConfig, ValuationError};

/// Normalizer options and valuation policy in one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Valuation engine policy.
    pub valuation: ValuationConfig,
    /// Statement normalizer options.
    pub normalize: NormalizeOptions,
}

impl AnalyzerConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ValuationError::Parse(format!("Failed to parse config: {e}")))?;
        config.valuation.validate()?;
        Ok(config)
    }
}
