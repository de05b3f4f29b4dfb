//! Statement normalization.
//!
//! [`StatementNormalizer`] turns a [`RawStatement`] into a
//! [`NormalizedStatement`]: quarterly and non-data columns dropped, annual
//! columns renamed to canonical [`PeriodKey`]s, and every row's cells parsed.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use valuation_core::{
    NormalizeOptions, OrderingPolicy, PeriodKey, PeriodType, RawStatement, Result, ValuationError,
};

use crate::classify::{ColumnKind, classify, label_column, locate_statement, looks_like_statement};

/// One metric row of a normalized statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatementRow {
    /// Row label as it appeared in the source.
    pub label: String,
    /// Parsed values, aligned with [`NormalizedStatement::periods`].
    pub values: Vec<Option<f64>>,
}

/// A clean per-period view of an annual financial statement.
///
/// `periods` is never empty; the last period is the target period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedStatement {
    pub(crate) periods: Vec<PeriodKey>,
    pub(crate) rows: Vec<StatementRow>,
}

impl NormalizedStatement {
    /// Annual periods, in the order selected by the ordering policy.
    #[must_use]
    pub fn periods(&self) -> &[PeriodKey] {
        &self.periods
    }

    /// Metric rows, in source order.
    #[must_use]
    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    /// The most recent annual period (the rightmost column).
    #[must_use]
    pub fn target_period(&self) -> PeriodKey {
        // `normalize` never builds a statement without periods.
        self.periods[self.periods.len() - 1]
    }

    /// Returns true if the target period is an analyst estimate.
    #[must_use]
    pub fn is_estimate(&self) -> bool {
        self.target_period().is_estimate()
    }

    /// Position of `period` in [`periods`](Self::periods).
    #[must_use]
    pub fn period_index(&self, period: &PeriodKey) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }
}

/// Normalizes raw statement tables.
#[derive(Clone, Debug, Default)]
pub struct StatementNormalizer {
    options: NormalizeOptions,
}

impl StatementNormalizer {
    /// Creates a normalizer with the given options.
    #[must_use]
    pub const fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Returns the options in use.
    #[must_use]
    pub const fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalizes a single table.
    ///
    /// Fails with [`ValuationError::StatementNotFound`] when the table does not
    /// resemble a financial statement, and with
    /// [`ValuationError::PeriodsUnidentifiable`] when no annual column is found.
    /// When several columns share a period (consolidated and separate
    /// filings), only the leftmost is kept.
    pub fn normalize(&self, raw: &RawStatement) -> Result<NormalizedStatement> {
        if raw.columns.is_empty() || raw.rows.is_empty() {
            return Err(ValuationError::StatementNotFound);
        }

        let kinds: Vec<ColumnKind> = raw
            .columns
            .iter()
            .map(|c| classify(c, &self.options))
            .collect();
        let label_col = label_column(&kinds);

        if !looks_like_statement(raw, label_col, &self.options) {
            return Err(ValuationError::StatementNotFound);
        }

        let mut annual: Vec<(usize, PeriodKey)> = Vec::new();
        for (idx, kind) in kinds.iter().enumerate() {
            if idx == label_col {
                continue;
            }
            match kind {
                ColumnKind::Period(PeriodType::Annual, Some(key)) => annual.push((idx, *key)),
                ColumnKind::Period(PeriodType::Quarterly, _) => {
                    debug!(column = %raw.columns[idx], "Dropping quarterly column");
                }
                _ => {
                    debug!(column = %raw.columns[idx], "Dropping non-data column");
                }
            }
        }

        let mut seen = HashSet::new();
        annual.retain(|(idx, key)| {
            let first = seen.insert((key.year(), key.month()));
            if !first {
                warn!(
                    column = %raw.columns[*idx],
                    period = %key,
                    "Dropping duplicate period column"
                );
            }
            first
        });

        if annual.is_empty() {
            return Err(ValuationError::PeriodsUnidentifiable);
        }

        self.apply_ordering(&mut annual)?;

        let rows = raw
            .rows
            .iter()
            .filter_map(|row| {
                let label = row.get(label_col)?.text().trim().to_string();
                if label.is_empty() {
                    return None;
                }
                let values = annual
                    .iter()
                    .map(|(idx, _)| row.get(*idx).and_then(|cell| cell.as_number()))
                    .collect();
                Some(StatementRow { label, values })
            })
            .collect();

        let periods: Vec<PeriodKey> = annual.into_iter().map(|(_, key)| key).collect();
        debug!(
            periods = periods.len(),
            target_period = %periods[periods.len() - 1],
            "Normalized statement"
        );

        Ok(NormalizedStatement { periods, rows })
    }

    /// Normalizes the first table that resembles a financial statement.
    pub fn normalize_first(&self, tables: &[RawStatement]) -> Result<NormalizedStatement> {
        let raw = locate_statement(tables, &self.options).ok_or_else(|| {
            debug!(tables = tables.len(), "No statement table among candidates");
            ValuationError::StatementNotFound
        })?;
        self.normalize(raw)
    }

    fn apply_ordering(&self, annual: &mut [(usize, PeriodKey)]) -> Result<()> {
        let in_order = |a: &PeriodKey, b: &PeriodKey| (a.year(), a.month()) < (b.year(), b.month());

        match self.options.ordering {
            OrderingPolicy::Trust => Ok(()),
            OrderingPolicy::Sort => {
                if annual.windows(2).any(|w| !in_order(&w[0].1, &w[1].1)) {
                    warn!("Annual columns out of chronological order, sorting");
                    annual.sort_by_key(|(_, key)| (key.year(), key.month()));
                }
                Ok(())
            }
            OrderingPolicy::Strict => {
                match annual.windows(2).find(|w| !in_order(&w[0].1, &w[1].1)) {
                    Some(w) => Err(ValuationError::PeriodsOutOfOrder {
                        previous: w[0].1.to_string(),
                        next: w[1].1.to_string(),
                    }),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Normalizes a single table with default options.
pub fn normalize(raw: &RawStatement) -> Result<NormalizedStatement> {
    StatementNormalizer::default().normalize(raw)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use valuation_core::{ColumnLabel, Metric, RawCell};

    /// A statement shaped like a Korean portal's "기업실적분석" table.
    pub(crate) fn portal_table() -> RawStatement {
        let annual = |date: &str| ColumnLabel::composite(["최근 연간 실적", date, "IFRS연결"]);
        let quarter = |date: &str| ColumnLabel::composite(["최근 분기 실적", date, "IFRS연결"]);
        let columns = vec![
            ColumnLabel::composite(["주요재무정보", "주요재무정보", "주요재무정보"]),
            annual("2021.12"),
            annual("2022.12"),
            annual("2023.12"),
            annual("2024.12(E)"),
            quarter("2024.03"),
            quarter("2024.06"),
        ];
        let row = |label: &str, cells: [&str; 6]| {
            let mut row = vec![RawCell::from(label)];
            row.extend(cells.iter().map(|c| RawCell::from(*c)));
            row
        };
        let rows = vec![
            row("매출액", ["2,796,048", "3,022,314", "2,589,355", "3,008,709", "719,156", "740,683"]),
            row("영업이익", ["516,339", "433,766", "65,670", "325,726", "66,060", "104,439"]),
            row("영업이익률", ["18.47", "14.35", "2.54", "10.83", "9.19", "14.10"]),
            row("당기순이익", ["399,074", "556,541", "154,871", "", "67,547", "98,413"]),
            row("부채비율", ["39.92", "26.41", "25.36", "-", "27.01", "26.48"]),
            row("ROE(지배주주)", ["13.92", "17.07", "4.15", "", "", ""]),
            row("EPS(원)", ["5,777", "8,057", "2,131", "", "1,013", "1,407"]),
            row("PER(배)", ["13.55", "6.86", "36.84", "", "", ""]),
            row("BPS(원)", ["43,611", "50,817", "52,002", "", "", ""]),
            row("PBR(배)", ["1.80", "1.09", "1.51", "", "", ""]),
        ];
        RawStatement::new(columns, rows)
    }

    #[test]
    fn test_drops_quarters_and_labels() {
        let stmt = normalize(&portal_table()).unwrap();
        let periods: Vec<String> = stmt.periods().iter().map(ToString::to_string).collect();
        assert_eq!(periods, ["2021.12", "2022.12", "2023.12", "2024.12(E)"]);
        assert_eq!(stmt.rows().len(), 10);
        assert!(stmt.rows().iter().all(|r| r.values.len() == 4));
        assert_eq!(stmt.rows()[0].label, "매출액");
        assert_eq!(stmt.rows()[0].values[0], Some(2_796_048.0));
    }

    #[test]
    fn test_target_period_is_last() {
        let stmt = normalize(&portal_table()).unwrap();
        assert_eq!(stmt.target_period(), *stmt.periods().last().unwrap());
        assert!(stmt.is_estimate());
        assert_eq!(stmt.target_period().to_string(), "2024.12(E)");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = portal_table();
        assert_eq!(normalize(&raw).unwrap(), normalize(&raw).unwrap());
    }

    #[test]
    fn test_statement_not_found() {
        let raw = RawStatement::new(
            vec![ColumnLabel::flat("종목"), ColumnLabel::flat("2023.12")],
            vec![vec![RawCell::from("외국인"), RawCell::from("50.1")]],
        );
        assert_eq!(normalize(&raw), Err(ValuationError::StatementNotFound));
        assert_eq!(
            normalize(&RawStatement::default()),
            Err(ValuationError::StatementNotFound)
        );
    }

    #[test]
    fn test_periods_unidentifiable() {
        let raw = RawStatement::new(
            vec![
                ColumnLabel::flat("항목"),
                ColumnLabel::flat("작년"),
                ColumnLabel::composite(["최근 분기 실적", "2024.06"]),
            ],
            vec![vec![
                RawCell::from("매출액"),
                RawCell::from("100"),
                RawCell::from("30"),
            ]],
        );
        assert_eq!(normalize(&raw), Err(ValuationError::PeriodsUnidentifiable));
    }

    #[test]
    fn test_first_column_used_when_all_dated() {
        let raw = RawStatement::new(
            vec![ColumnLabel::flat("2022.12"), ColumnLabel::flat("2023.12")],
            vec![vec![RawCell::from("매출액"), RawCell::from("1,000")]],
        );
        let stmt = normalize(&raw).unwrap();
        assert_eq!(stmt.periods().len(), 1);
        assert_eq!(stmt.rows()[0].label, "매출액");
        assert_eq!(stmt.rows()[0].values, vec![Some(1_000.0)]);
    }

    fn shuffled() -> RawStatement {
        RawStatement::new(
            vec![
                ColumnLabel::flat("항목"),
                ColumnLabel::flat("2023.12"),
                ColumnLabel::flat("2021.12"),
                ColumnLabel::flat("2022.12"),
            ],
            vec![vec![
                RawCell::from("매출액"),
                RawCell::from("3"),
                RawCell::from("1"),
                RawCell::from("2"),
            ]],
        )
    }

    #[test]
    fn test_ordering_trust_keeps_source_order() {
        let stmt = normalize(&shuffled()).unwrap();
        assert_eq!(stmt.target_period().to_string(), "2022.12");
        assert!(!stmt.is_estimate());
    }

    #[test]
    fn test_duplicate_period_keeps_leftmost() {
        let raw = RawStatement::new(
            vec![
                ColumnLabel::flat("항목"),
                ColumnLabel::composite(["최근 연간 실적", "2022.12", "IFRS연결"]),
                ColumnLabel::composite(["최근 연간 실적", "2023.12", "IFRS연결"]),
                ColumnLabel::composite(["최근 연간 실적", "2023.12", "IFRS별도"]),
            ],
            vec![vec![
                RawCell::from("매출액"),
                RawCell::from("80"),
                RawCell::from("100"),
                RawCell::from("90"),
            ]],
        );

        for ordering in [OrderingPolicy::Trust, OrderingPolicy::Sort, OrderingPolicy::Strict] {
            let normalizer =
                StatementNormalizer::new(NormalizeOptions::default().with_ordering(ordering));
            let stmt = normalizer.normalize(&raw).unwrap();
            let periods: Vec<String> = stmt.periods().iter().map(ToString::to_string).collect();
            assert_eq!(periods, ["2022.12", "2023.12"]);
            assert_eq!(stmt.rows()[0].values, vec![Some(80.0), Some(100.0)]);
            assert_eq!(stmt.value(Metric::Revenue, &stmt.target_period()), Some(100.0));
            assert_eq!(stmt.history().to_frame().unwrap().width(), 3);
        }
    }

    #[test]
    fn test_ordering_sort() {
        let normalizer =
            StatementNormalizer::new(NormalizeOptions::default().with_ordering(OrderingPolicy::Sort));
        let stmt = normalizer.normalize(&shuffled()).unwrap();
        assert_eq!(stmt.target_period().to_string(), "2023.12");
        assert_eq!(stmt.rows()[0].values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_ordering_strict() {
        let normalizer = StatementNormalizer::new(
            NormalizeOptions::default().with_ordering(OrderingPolicy::Strict),
        );
        assert_eq!(
            normalizer.normalize(&shuffled()),
            Err(ValuationError::PeriodsOutOfOrder {
                previous: "2023.12".to_string(),
                next: "2021.12".to_string(),
            })
        );
        assert!(normalizer.normalize(&portal_table()).is_ok());
    }

    #[test]
    fn test_normalize_first() {
        let noise = RawStatement::new(
            vec![ColumnLabel::flat("구분")],
            vec![vec![RawCell::from("시가총액")]],
        );
        let normalizer = StatementNormalizer::default();
        let stmt = normalizer
            .normalize_first(&[noise.clone(), portal_table()])
            .unwrap();
        assert_eq!(stmt.periods().len(), 4);
        assert_eq!(
            normalizer.normalize_first(&[noise]),
            Err(ValuationError::StatementNotFound)
        );
    }
}
