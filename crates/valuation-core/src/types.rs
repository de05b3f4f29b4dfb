//! Core data types for valuation.
//!
//! This module defines the records passed between the normalizer, the
//! valuation engine and the caller:
//!
//! - [`Symbol`] - Ticker or exchange code
//! - [`Fundamentals`] - Point-in-time inputs to the valuation models
//! - [`ModelKind`] - Identifies a valuation model
//! - [`ValuationResult`] - One model's fair value and price deviation
//! - [`Verdict`] - Reading of a deviation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading symbol/ticker.
///
/// Symbols are trimmed and uppercased on creation; numeric exchange codes
/// such as `005930` pass through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Point-in-time fundamentals of one symbol.
///
/// Absent data is `None`. Formulas reject `None` explicitly; the `0` display
/// sentinel only appears through [`Fundamentals::sentinel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Current market price, in the statement's currency.
    pub price: Option<f64>,
    /// Earnings per share.
    pub eps: Option<f64>,
    /// Book value per share.
    pub bps: Option<f64>,
    /// Return on equity, percent (`12.5` means 12.5%).
    pub roe: Option<f64>,
    /// Price-to-earnings ratio.
    pub per: Option<f64>,
    /// Price-to-book ratio.
    pub pbr: Option<f64>,
    /// EPS compound annual growth rate, percent.
    pub eps_growth_rate: Option<f64>,
}

impl Fundamentals {
    /// Creates fundamentals with only a market price.
    #[must_use]
    pub const fn new(price: f64) -> Self {
        Self {
            price: Some(price),
            eps: None,
            bps: None,
            roe: None,
            per: None,
            pbr: None,
            eps_growth_rate: None,
        }
    }

    /// Sets earnings per share.
    #[must_use]
    pub const fn with_eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    /// Sets book value per share.
    #[must_use]
    pub const fn with_bps(mut self, bps: f64) -> Self {
        self.bps = Some(bps);
        self
    }

    /// Sets return on equity, percent.
    #[must_use]
    pub const fn with_roe(mut self, roe: f64) -> Self {
        self.roe = Some(roe);
        self
    }

    /// Sets the price-to-earnings ratio.
    #[must_use]
    pub const fn with_per(mut self, per: f64) -> Self {
        self.per = Some(per);
        self
    }

    /// Sets the price-to-book ratio.
    #[must_use]
    pub const fn with_pbr(mut self, pbr: f64) -> Self {
        self.pbr = Some(pbr);
        self
    }

    /// Sets the EPS growth rate, percent.
    #[must_use]
    pub const fn with_eps_growth_rate(mut self, rate: f64) -> Self {
        self.eps_growth_rate = Some(rate);
        self
    }

    /// Returns the price if it is present and positive.
    #[must_use]
    pub fn usable_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Converts an absent value to the `0` display sentinel.
    #[must_use]
    pub fn sentinel(value: Option<f64>) -> f64 {
        value.unwrap_or(0.0)
    }
}

/// Identifies a valuation model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Graham number, `sqrt(22.5 * EPS * BPS)`.
    Graham,
    /// Simplified residual-income model.
    SRim,
    /// Peter Lynch growth-capped earnings multiple.
    PeterLynch,
    /// Ten years of earnings plus book value.
    Yamaguchi,
}

impl ModelKind {
    /// Every model, in report order.
    pub const ALL: [Self; 4] = [Self::Graham, Self::SRim, Self::PeterLynch, Self::Yamaguchi];

    /// Display name of the model.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Graham => "Graham Number",
            Self::SRim => "S-RIM",
            Self::PeterLynch => "Peter Lynch",
            Self::Yamaguchi => "Yamaguchi",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the market price compares with a model's fair value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Price is below fair value.
    Undervalued,
    /// Price equals fair value.
    FairlyValued,
    /// Price is above fair value.
    Overvalued,
    /// The model's preconditions were not met.
    NotComputable,
}

/// Output of one valuation model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// The model that produced this result.
    pub model: ModelKind,
    /// Fair value per share; zero or negative means "not computable".
    pub fair_value: f64,
    /// `(price - fair_value) / fair_value * 100`, only when `fair_value > 0`.
    pub deviation_percent: Option<f64>,
}

impl ValuationResult {
    /// Returns true when the model produced a usable fair value.
    #[must_use]
    pub fn is_computable(&self) -> bool {
        self.fair_value.is_finite() && self.fair_value > 0.0
    }

    /// Fair value, or `None` when the model is not computable.
    #[must_use]
    pub fn usable_fair_value(&self) -> Option<f64> {
        self.is_computable().then_some(self.fair_value)
    }

    /// Classifies the deviation.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.deviation_percent {
            Some(d) if !self.is_computable() || !d.is_finite() => Verdict::NotComputable,
            Some(d) if d < 0.0 => Verdict::Undervalued,
            Some(d) if d > 0.0 => Verdict::Overvalued,
            Some(_) => Verdict::FairlyValued,
            None => Verdict::NotComputable,
        }
    }
}
