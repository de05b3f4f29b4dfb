//! Metric value resolution with one-step fallback.
//!
//! A missing target cell (blank, dash, non-numeric) falls back to the
//! immediately preceding period, once. Forecast columns are often blank for
//! per-share figures, so this reads the last confirmed actual instead.

use serde::Serialize;
use valuation_core::{Metric, PeriodKey};

use crate::normalize::{NormalizedStatement, StatementRow};

/// A resolved value together with the period it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Resolved {
    /// The value.
    pub value: f64,
    /// The period the value came from; differs from the requested period on fallback.
    pub period: PeriodKey,
}

impl NormalizedStatement {
    /// Returns the row for `metric`, choosing by alias priority.
    #[must_use]
    pub fn row(&self, metric: Metric) -> Option<&StatementRow> {
        metric
            .aliases()
            .iter()
            .find_map(|alias| self.rows.iter().find(|row| row.label.trim() == *alias))
    }

    /// Returns the first row whose label contains `label`.
    #[must_use]
    pub fn row_containing(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|row| row.label.contains(label))
    }

    /// Resolves `metric` at `period`, falling back one period.
    #[must_use]
    pub fn lookup(&self, metric: Metric, period: &PeriodKey) -> Option<Resolved> {
        self.lookup_row(self.row(metric)?, period)
    }

    /// Resolves `metric` at `period` without reporting the source period.
    #[must_use]
    pub fn value(&self, metric: Metric, period: &PeriodKey) -> Option<f64> {
        self.lookup(metric, period).map(|r| r.value)
    }

    /// Resolves `metric` at the target period.
    #[must_use]
    pub fn target_value(&self, metric: Metric) -> Option<f64> {
        self.value(metric, &self.target_period())
    }

    /// Resolves `metric` at `period`, returning `0` when it cannot be resolved.
    #[must_use]
    pub fn resolve(&self, metric: Metric, period: &PeriodKey) -> f64 {
        self.value(metric, period).unwrap_or(0.0)
    }

    /// Resolves the first row whose label contains `label`, returning `0`
    /// when it cannot be resolved.
    ///
    /// Overlapping labels make this ambiguous (`영업이익` also matches
    /// `영업이익률`); prefer [`resolve`](Self::resolve) for known metrics.
    #[must_use]
    pub fn resolve_label(&self, label: &str, period: &PeriodKey) -> f64 {
        self.row_containing(label)
            .and_then(|row| self.lookup_row(row, period))
            .map_or(0.0, |r| r.value)
    }

    fn lookup_row(&self, row: &StatementRow, period: &PeriodKey) -> Option<Resolved> {
        let idx = self.period_index(period)?;
        let at = |i: usize| {
            row.values.get(i).copied().flatten().map(|value| Resolved {
                value,
                period: self.periods[i],
            })
        };
        at(idx).or_else(|| idx.checked_sub(1).and_then(at))
    }
}
