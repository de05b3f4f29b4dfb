//! The valuation model trait.

use std::fmt::Debug;

use valuation_core::{Fundamentals, ModelKind};

/// A fair-value model over point-in-time fundamentals.
///
/// Implementations are pure: the same inputs always yield the same value.
/// A result of zero or below means the model's preconditions were not met.
pub trait ValuationModel: Send + Sync + Debug {
    /// Identifies the model.
    fn kind(&self) -> ModelKind;

    /// Display name of the model.
    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Computes the fair value per share.
    fn fair_value(&self, fundamentals: &Fundamentals) -> f64;
}

/// Returns the value when present, finite and strictly positive.
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
