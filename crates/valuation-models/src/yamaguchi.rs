//! Yamaguchi composite: ten years of current earnings plus book value.

use valuation_core::{Fundamentals, ModelKind};

use crate::model::{ValuationModel, positive};

/// Years of earnings credited on top of book value.
pub const EARNINGS_YEARS: f64 = 10.0;

/// `EPS * 10 + BPS`; `0` unless EPS is positive.
#[must_use]
pub fn yamaguchi(eps: f64, bps: f64) -> f64 {
    if eps.is_nan() || eps <= 0.0 || !bps.is_finite() {
        return 0.0;
    }
    eps * EARNINGS_YEARS + bps
}

/// Yamaguchi model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Yamaguchi;

impl ValuationModel for Yamaguchi {
    fn kind(&self) -> ModelKind {
        ModelKind::Yamaguchi
    }

    fn fair_value(&self, fundamentals: &Fundamentals) -> f64 {
        match (positive(fundamentals.eps), fundamentals.bps) {
            (Some(eps), Some(bps)) => yamaguchi(eps, bps),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yamaguchi() {
        assert_eq!(yamaguchi(5_000.0, 40_000.0), 90_000.0);
        assert_eq!(yamaguchi(0.0, 40_000.0), 0.0);
        assert_eq!(yamaguchi(-100.0, 40_000.0), 0.0);
    }

    #[test]
    fn test_yamaguchi_model_needs_book_value() {
        let f = Fundamentals::new(1.0).with_eps(100.0);
        assert_eq!(Yamaguchi.fair_value(&f), 0.0);
        assert_eq!(Yamaguchi.fair_value(&f.with_bps(500.0)), 1_500.0);
    }
}
