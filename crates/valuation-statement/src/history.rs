//! Headline-metric history for display and export.
//!
//! Values are the raw parsed cells of each period; no fallback applies here.

use polars::prelude::{Column, DataFrame, PlSmallStr};
use serde::Serialize;
use valuation_core::{Metric, PeriodKey, Result, ValuationError};

use crate::normalize::NormalizedStatement;

/// One headline metric across all periods.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryRow {
    /// The metric.
    pub metric: Metric,
    /// Label of the source row it was read from.
    pub label: String,
    /// Values aligned with [`HistoryTable::periods`].
    pub values: Vec<Option<f64>>,
}

/// Headline metrics of a statement, in [`Metric::HEADLINE`] order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryTable {
    /// Annual periods.
    pub periods: Vec<PeriodKey>,
    /// One row per headline metric present in the statement.
    pub rows: Vec<HistoryRow>,
}

impl HistoryTable {
    /// Returns the row for `metric`, if the statement had one.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&HistoryRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }

    /// Renders the table as a DataFrame.
    ///
    /// Columns: `metric` (display name), then one nullable `f64` column per
    /// period named `YYYY.MM` or `YYYY.MM(E)`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.periods.len() + 1);
        columns.push(Column::new(
            PlSmallStr::from("metric"),
            self.rows
                .iter()
                .map(|row| row.metric.name())
                .collect::<Vec<_>>(),
        ));

        for (idx, period) in self.periods.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|row| row.values.get(idx).copied().flatten())
                .collect();
            columns.push(Column::new(PlSmallStr::from(period.to_string()), values));
        }

        DataFrame::new(columns).map_err(|e| ValuationError::Frame(e.to_string()))
    }
}

impl NormalizedStatement {
    /// Projects the headline metrics (revenue through PBR).
    #[must_use]
    pub fn history(&self) -> HistoryTable {
        let rows = Metric::HEADLINE
            .iter()
            .filter_map(|metric| {
                self.row(*metric).map(|row| HistoryRow {
                    metric: *metric,
                    label: row.label.clone(),
                    values: row.values.clone(),
                })
            })
            .collect();

        HistoryTable {
            periods: self.periods.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, tests::portal_table};
    use valuation_core::{ColumnLabel, RawCell, RawStatement};

    #[test]
    fn test_history_covers_headline_metrics() {
        let stmt = normalize(&portal_table()).unwrap();
        let history = stmt.history();

        let metrics: Vec<Metric> = history.rows.iter().map(|r| r.metric).collect();
        assert_eq!(metrics, Metric::HEADLINE.to_vec());
        assert_eq!(history.get(Metric::Roe).unwrap().label, "ROE(지배주주)");
        // No fallback in history.
        assert_eq!(history.get(Metric::Eps).unwrap().values[3], None);
    }

    #[test]
    fn test_history_skips_non_headline_rows() {
        let raw = RawStatement::new(
            vec![ColumnLabel::flat("항목"), ColumnLabel::flat("2023.12")],
            vec![
                vec![RawCell::from("매출액"), RawCell::from("10")],
                vec![RawCell::from("유보율"), RawCell::from("30,000")],
            ],
        );
        let history = normalize(&raw).unwrap().history();
        assert_eq!(history.rows.len(), 1);
        assert_eq!(history.rows[0].metric, Metric::Revenue);
    }

    #[test]
    fn test_to_frame() {
        let stmt = normalize(&portal_table()).unwrap();
        let frame = stmt.history().to_frame().unwrap();

        assert_eq!(frame.height(), 10);
        assert_eq!(frame.width(), 5);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ["metric", "2021.12", "2022.12", "2023.12", "2024.12(E)"]);

        let latest = frame.column("2023.12").unwrap().f64().unwrap();
        assert_eq!(latest.get(0), Some(2_589_355.0));
        let estimate = frame.column("2024.12(E)").unwrap().f64().unwrap();
        assert_eq!(estimate.get(6), None);
    }
}
