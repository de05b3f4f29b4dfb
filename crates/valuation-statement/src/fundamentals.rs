//! Valuation inputs extracted from a normalized statement.

use tracing::debug;
use valuation_core::{Fundamentals, Metric};

use crate::normalize::NormalizedStatement;

/// Builds [`Fundamentals`] from the statement's target period and a market price.
///
/// Per-share figures and ratios use the one-step fallback of
/// [`NormalizedStatement::lookup`]. A non-positive or non-finite price is
/// treated as absent.
#[must_use]
pub fn extract_fundamentals(statement: &NormalizedStatement, price: Option<f64>) -> Fundamentals {
    let target = statement.target_period();
    let fundamentals = Fundamentals {
        price: price.filter(|p| p.is_finite() && *p > 0.0),
        eps: statement.target_value(Metric::Eps),
        bps: statement.target_value(Metric::Bps),
        roe: statement.target_value(Metric::Roe),
        per: statement.target_value(Metric::Per),
        pbr: statement.target_value(Metric::Pbr),
        eps_growth_rate: eps_growth_rate(statement),
    };
    debug!(period = %target, ?fundamentals, "Extracted fundamentals");
    fundamentals
}

/// EPS compound annual growth rate, percent.
///
/// Measured from the earliest period to the period the target EPS was
/// actually read from. Requires positive EPS at both ends and a positive
/// time span; growth from or to a loss has no CAGR.
#[must_use]
pub fn eps_growth_rate(statement: &NormalizedStatement) -> Option<f64> {
    let first = *statement.periods().first()?;
    let start = statement.row(Metric::Eps)?.values.first().copied().flatten()?;
    let end = statement.lookup(Metric::Eps, &statement.target_period())?;

    let years = end.period.years_since(&first);
    compound_growth(start, end.value, years)
}

/// `((end / start)^(1 / years) - 1) * 100`, when defined.
#[must_use]
pub fn compound_growth(start: f64, end: f64, years: f64) -> Option<f64> {
    if start <= 0.0 || end <= 0.0 || years <= 0.0 {
        return None;
    }
    let rate = ((end / start).powf(1.0 / years) - 1.0) * 100.0;
    rate.is_finite().then_some(rate)
}
