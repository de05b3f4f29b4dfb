//! Graham number.
//!
//! `sqrt(22.5 * EPS * BPS)`: the constant is a ceiling of PER 15 times PBR 1.5.

use valuation_core::{Fundamentals, ModelKind};

use crate::model::{ValuationModel, positive};

/// PER 15 x PBR 1.5.
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// Graham number from EPS and BPS; `0` unless both are positive.
#[must_use]
pub fn graham_number(eps: f64, bps: f64) -> f64 {
    if !(eps > 0.0 && bps > 0.0) {
        return 0.0;
    }
    let value = (GRAHAM_MULTIPLIER * eps * bps).sqrt();
    if value.is_finite() { value } else { 0.0 }
}

/// Graham number model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Graham;

impl ValuationModel for Graham {
    fn kind(&self) -> ModelKind {
        ModelKind::Graham
    }

    fn fair_value(&self, fundamentals: &Fundamentals) -> f64 {
        match (positive(fundamentals.eps), positive(fundamentals.bps)) {
            (Some(eps), Some(bps)) => graham_number(eps, bps),
            _ => 0.0,
        }
    }
}
