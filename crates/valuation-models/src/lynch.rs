//! Peter Lynch growth multiple and the PEG diagnostic.
//!
//! Fair value is EPS times the EPS growth rate (as a multiple), with the
//! growth rate capped. Non-positive growth never produces a value.

use serde::{Deserialize, Serialize};
use valuation_core::{Fundamentals, ModelKind};

use crate::model::{ValuationModel, positive};

/// Peter Lynch fair value, `EPS * min(growth, cap)`; `0` unless EPS and
/// growth are positive.
#[must_use]
pub fn peter_lynch(eps: f64, growth_rate: f64, growth_cap: f64) -> f64 {
    let capped = growth_rate.min(growth_cap);
    if !(eps > 0.0 && growth_rate > 0.0 && capped > 0.0) {
        return 0.0;
    }
    let value = eps * capped;
    if value.is_finite() { value } else { 0.0 }
}

/// PER over the uncapped EPS growth rate, when both are positive.
#[must_use]
pub fn peg_ratio(per: f64, growth_rate: f64) -> Option<f64> {
    if !(per > 0.0 && growth_rate > 0.0) {
        return None;
    }
    let peg = per / growth_rate;
    peg.is_finite().then_some(peg)
}

/// Conventional reading of a PEG ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PegSignal {
    /// PEG below 0.5.
    StronglyUndervalued,
    /// PEG below 1.0.
    Undervalued,
    /// PEG from 1.0 up to 1.5.
    Fair,
    /// PEG above 1.5.
    Rich,
}

impl PegSignal {
    /// Classifies a PEG ratio.
    #[must_use]
    pub fn classify(peg: f64) -> Self {
        if peg < 0.5 {
            Self::StronglyUndervalued
        } else if peg < 1.0 {
            Self::Undervalued
        } else if peg <= 1.5 {
            Self::Fair
        } else {
            Self::Rich
        }
    }
}

/// A PEG ratio and its reading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PegReading {
    /// PER divided by EPS growth rate.
    pub ratio: f64,
    /// Conventional reading.
    pub signal: PegSignal,
}

impl PegReading {
    /// Computes the reading from fundamentals, when PER and growth are positive.
    #[must_use]
    pub fn from_fundamentals(fundamentals: &Fundamentals) -> Option<Self> {
        let ratio = peg_ratio(fundamentals.per?, fundamentals.eps_growth_rate?)?;
        Some(Self {
            ratio,
            signal: PegSignal::classify(ratio),
        })
    }
}

/// Peter Lynch model with a growth cap.
#[derive(Clone, Copy, Debug)]
pub struct PeterLynch {
    growth_cap: f64,
}

impl PeterLynch {
    /// Creates the model with a growth cap, percent.
    #[must_use]
    pub const fn new(growth_cap: f64) -> Self {
        Self { growth_cap }
    }

    /// Growth cap, percent.
    #[must_use]
    pub const fn growth_cap(&self) -> f64 {
        self.growth_cap
    }
}

impl ValuationModel for PeterLynch {
    fn kind(&self) -> ModelKind {
        ModelKind::PeterLynch
    }

    fn fair_value(&self, fundamentals: &Fundamentals) -> f64 {
        match (positive(fundamentals.eps), positive(fundamentals.eps_growth_rate)) {
            (Some(eps), Some(growth)) => peter_lynch(eps, growth, self.growth_cap),
            _ => 0.0,
        }
    }
}
