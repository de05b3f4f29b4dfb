//! S-RIM, a simplified residual-income model.
//!
//! Book value plus the perpetual value of excess returns:
//! `BPS + (BPS * (ROE - r) / 100) / (r / 100)`, which reduces to
//! `BPS * ROE / r`. A company earning below its required return is worth
//! less than book; deep enough below, the value turns non-positive.

use valuation_core::{Fundamentals, ModelKind};

use crate::model::{ValuationModel, positive};

/// Annual excess return per share, `BPS * (ROE - r) / 100`.
#[must_use]
pub fn excess_return(bps: f64, roe: f64, required_return: f64) -> f64 {
    bps * (roe - required_return) / 100.0
}

/// S-RIM fair value; `0` when BPS or the required return is not positive.
///
/// `roe` and `required_return` are percentages.
#[must_use]
pub fn s_rim(bps: f64, roe: f64, required_return: f64) -> f64 {
    if !(bps > 0.0 && required_return > 0.0) || !roe.is_finite() {
        return 0.0;
    }
    let value = bps + excess_return(bps, roe, required_return) / (required_return / 100.0);
    if value.is_finite() { value } else { 0.0 }
}

/// S-RIM model at a fixed required return.
#[derive(Clone, Copy, Debug)]
pub struct SRim {
    required_return: f64,
}

impl SRim {
    /// Creates the model with a required return, percent.
    #[must_use]
    pub const fn new(required_return: f64) -> Self {
        Self { required_return }
    }

    /// Required return, percent.
    #[must_use]
    pub const fn required_return(&self) -> f64 {
        self.required_return
    }
}

impl ValuationModel for SRim {
    fn kind(&self) -> ModelKind {
        ModelKind::SRim
    }

    fn fair_value(&self, fundamentals: &Fundamentals) -> f64 {
        match (positive(fundamentals.bps), fundamentals.roe) {
            (Some(bps), Some(roe)) => s_rim(bps, roe, self.required_return),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s_rim_value_creator() {
        assert!((s_rim(10_000.0, 15.0, 8.0) - 18_750.0).abs() < 1e-6);
        assert!((s_rim(40_000.0, 12.0, 8.0) - 60_000.0).abs() < 1e-6);
        assert!((excess_return(10_000.0, 15.0, 8.0) - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_s_rim_value_destroyer_is_below_book() {
        let value = s_rim(10_000.0, 5.0, 8.0);
        assert!(value > 0.0 && value < 10_000.0);
        assert!((value - 6_250.0).abs() < 1e-6);
        // Negative ROE drives the value below zero: not computable.
        assert!(s_rim(10_000.0, -2.0, 8.0) <= 0.0);
    }

    #[test]
    fn test_s_rim_guards_denominator() {
        assert_eq!(s_rim(10_000.0, 15.0, 0.0), 0.0);
        assert_eq!(s_rim(10_000.0, 15.0, -4.0), 0.0);
        assert_eq!(s_rim(0.0, 15.0, 8.0), 0.0);
        assert_eq!(s_rim(10_000.0, f64::NAN, 8.0), 0.0);
    }

    #[test]
    fn test_s_rim_model_requires_roe() {
        let model = SRim::new(8.0);
        let f = Fundamentals::new(1.0).with_bps(10_000.0);
        assert_eq!(model.fair_value(&f), 0.0);
        assert!((model.fair_value(&f.with_roe(15.0)) - 18_750.0).abs() < 1e-6);
    }
}
