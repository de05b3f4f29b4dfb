//! Policy configuration for normalization and valuation.
//!
//! Both structures deserialize with per-field defaults, so a partial JSON
//! document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};
use crate::types::ModelKind;

/// Default required rate of return for S-RIM, percent.
pub const DEFAULT_REQUIRED_RETURN: f64 = 8.0;

/// Default cap on the growth rate used by the Peter Lynch model, percent.
pub const DEFAULT_GROWTH_CAP: f64 = 30.0;

/// Policy parameters of the valuation engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Required rate of return (cost of equity), percent. Must be positive.
    pub required_return_percent: f64,
    /// Upper bound on EPS growth fed into the Peter Lynch model, percent.
    pub growth_cap_percent: f64,
    /// Models to evaluate, in report order.
    pub models: Vec<ModelKind>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            required_return_percent: DEFAULT_REQUIRED_RETURN,
            growth_cap_percent: DEFAULT_GROWTH_CAP,
            models: ModelKind::ALL.to_vec(),
        }
    }
}

impl ValuationConfig {
    /// Sets the required rate of return, percent.
    #[must_use]
    pub const fn with_required_return(mut self, percent: f64) -> Self {
        self.required_return_percent = percent;
        self
    }

    /// Sets the Peter Lynch growth cap, percent.
    #[must_use]
    pub const fn with_growth_cap(mut self, percent: f64) -> Self {
        self.growth_cap_percent = percent;
        self
    }

    /// Restricts evaluation to the given models.
    #[must_use]
    pub fn with_models(mut self, models: impl Into<Vec<ModelKind>>) -> Self {
        self.models = models.into();
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.required_return_percent.is_finite() || self.required_return_percent <= 0.0 {
            return Err(ValuationError::InvalidParameter(format!(
                "required return must be positive, got {}",
                self.required_return_percent
            )));
        }
        if !self.growth_cap_percent.is_finite() || self.growth_cap_percent <= 0.0 {
            return Err(ValuationError::InvalidParameter(format!(
                "growth cap must be positive, got {}",
                self.growth_cap_percent
            )));
        }
        if self.models.is_empty() {
            return Err(ValuationError::InvalidParameter(
                "at least one model must be selected".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to do when annual columns are not in chronological order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingPolicy {
    /// Keep source order; the rightmost column is the target period.
    #[default]
    Trust,
    /// Sort columns chronologically before selecting the target period.
    Sort,
    /// Reject statements whose columns are not strictly increasing.
    Strict,
}

/// Source-format markers and policies for the statement normalizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Substring marking a quarterly column in any header part.
    pub quarter_marker: String,
    /// Substring marking an analyst estimate in any header part.
    pub estimate_marker: String,
    /// Header substrings that identify an annual-performance table.
    pub annual_header_markers: Vec<String>,
    /// Column ordering policy.
    pub ordering: OrderingPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            quarter_marker: "분기".to_string(),
            estimate_marker: "(E)".to_string(),
            annual_header_markers: vec!["최근 연간 실적".to_string(), "Annual".to_string()],
            ordering: OrderingPolicy::Trust,
        }
    }
}

impl NormalizeOptions {
    /// Sets the ordering policy.
    #[must_use]
    pub const fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the quarterly column marker.
    #[must_use]
    pub fn with_quarter_marker(mut self, marker: impl Into<String>) -> Self {
        self.quarter_marker = marker.into();
        self
    }
}
