//! Column classification and statement detection.

use regex::Regex;
use std::sync::LazyLock;

use valuation_core::{ColumnLabel, Metric, NormalizeOptions, PeriodKey, PeriodType, RawStatement};

/// Four-digit year, a dot, two-digit month.
static PERIOD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\.(\d{2})").expect("valid period pattern"));

/// Role of a statement column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// A reporting-period column.
    Period(PeriodType, Option<PeriodKey>),
    /// Neither quarterly nor dated: labels or other non-data content.
    NonData,
}

/// Classifies one column label.
///
/// A quarter marker in any part wins over a date token, so quarterly columns
/// are always dropped even when they carry a parseable date.
#[must_use]
pub fn classify(label: &ColumnLabel, options: &NormalizeOptions) -> ColumnKind {
    let estimate = label.contains(&options.estimate_marker);
    let key = label.parts().iter().find_map(|part| period_token(part));

    if label.contains(&options.quarter_marker) {
        return ColumnKind::Period(PeriodType::Quarterly, key);
    }

    match key {
        Some(key) if estimate => ColumnKind::Period(PeriodType::Annual, Some(key.estimated())),
        Some(key) => ColumnKind::Period(PeriodType::Annual, Some(key)),
        None => ColumnKind::NonData,
    }
}

/// Extracts the first `YYYY.MM` token of `text`.
#[must_use]
pub fn period_token(text: &str) -> Option<PeriodKey> {
    let caps = PERIOD_TOKEN.captures(text)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    PeriodKey::new(year, month)
}

/// Index of the column holding metric labels.
///
/// The first non-data column, or column 0 when every column is dated.
#[must_use]
pub fn label_column(kinds: &[ColumnKind]) -> usize {
    kinds
        .iter()
        .position(|k| *k == ColumnKind::NonData)
        .unwrap_or(0)
}

/// Returns true if the table resembles an annual financial statement.
///
/// Either a header carries an annual-performance marker, or the label column
/// mentions a revenue-like row.
#[must_use]
pub fn looks_like_statement(
    raw: &RawStatement,
    label_col: usize,
    options: &NormalizeOptions,
) -> bool {
    let header_match = raw.columns.iter().any(|column| {
        options
            .annual_header_markers
            .iter()
            .any(|marker| column.contains(marker))
    });
    if header_match {
        return true;
    }

    raw.rows.iter().any(|row| {
        row.get(label_col).is_some_and(|cell| {
            let text = cell.text();
            Metric::Revenue
                .aliases()
                .iter()
                .any(|alias| text.contains(*alias))
        })
    })
}

/// Returns the first table that resembles an annual financial statement.
#[must_use]
pub fn locate_statement<'a>(
    tables: &'a [RawStatement],
    options: &NormalizeOptions,
) -> Option<&'a RawStatement> {
    tables.iter().find(|raw| {
        let kinds: Vec<ColumnKind> = raw.columns.iter().map(|c| classify(c, options)).collect();
        looks_like_statement(raw, label_column(&kinds), options)
    })
}
