//! Raw statement tables as supplied by external extractors.
//!
//! A [`RawStatement`] is an unprocessed grid: column labels that may be flat or
//! multi-level, and rows of loosely typed cells. One column usually holds the
//! metric labels; the others hold periods in mixed formats.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Cell texts that mean "no data".
const PLACEHOLDERS: &[&str] = &["", "-", "--", "—", "N/A", "n/a", "NaN", "nan", "None"];

/// A column label, either flat or composed of header levels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LabelRepr", into = "LabelRepr")]
pub struct ColumnLabel {
    parts: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Flat(String),
    Composite(Vec<String>),
}

impl From<LabelRepr> for ColumnLabel {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Flat(s) => Self::flat(s),
            LabelRepr::Composite(parts) => Self::composite(parts),
        }
    }
}

impl From<ColumnLabel> for LabelRepr {
    fn from(label: ColumnLabel) -> Self {
        match <[String; 1]>::try_from(label.parts) {
            Ok([single]) => Self::Flat(single),
            Err(parts) => Self::Composite(parts),
        }
    }
}

impl ColumnLabel {
    /// Creates a single-level label.
    #[must_use]
    pub fn flat(label: impl Into<String>) -> Self {
        Self {
            parts: vec![label.into()],
        }
    }

    /// Creates a multi-level label from its header parts, outermost first.
    #[must_use]
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the header parts.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns true if any part contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.parts.iter().any(|p| p.contains(needle))
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(" / "))
    }
}

impl From<&str> for ColumnLabel {
    fn from(s: &str) -> Self {
        Self::flat(s)
    }
}

impl From<String> for ColumnLabel {
    fn from(s: String) -> Self {
        Self::flat(s)
    }
}

/// A single cell of a raw statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    /// An already-numeric value.
    Number(f64),
    /// Text, possibly numeric with thousands separators.
    Text(String),
    /// No value.
    #[default]
    Empty,
}

impl RawCell {
    /// Parses the cell as a decimal number.
    ///
    /// Thousands separators, surrounding whitespace and a trailing `%` are
    /// stripped. Placeholders, non-numeric text and non-finite values yield
    /// `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => parse_number(s),
            Self::Empty => None,
        }
    }

    /// Returns the cell as label text.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Empty => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<Self>> From<Option<T>> for RawCell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if PLACEHOLDERS.contains(&trimmed) {
        return None;
    }
    let cleaned: String = trimmed
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// An unprocessed statement table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatement {
    /// Column labels, left to right.
    pub columns: Vec<ColumnLabel>,
    /// Rows of cells; a short row is padded with empty cells.
    pub rows: Vec<Vec<RawCell>>,
}

impl RawStatement {
    /// Creates a statement from a column header and rows.
    #[must_use]
    pub const fn new(columns: Vec<ColumnLabel>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { columns, rows }
    }

    /// Builds a grid from `(metric_label, [(period_label, cell)])` rows.
    ///
    /// The first column holds the metric labels under an empty header. Period
    /// columns appear in first-seen order; cells a row does not mention are
    /// empty.
    #[must_use]
    pub fn from_rows<I, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = (ColumnLabel, RawCell)>,
    {
        let mut columns = vec![ColumnLabel::flat("")];
        let mut grid: Vec<Vec<RawCell>> = Vec::new();

        for (label, cells) in rows {
            let mut row = vec![RawCell::Text(label)];
            for (column, cell) in cells {
                let idx = match columns.iter().position(|c| *c == column) {
                    Some(idx) => idx,
                    None => {
                        columns.push(column);
                        columns.len() - 1
                    }
                };
                if row.len() <= idx {
                    row.resize(idx + 1, RawCell::Empty);
                }
                row[idx] = cell;
            }
            grid.push(row);
        }

        Self::new(columns, grid)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at `row`, `col`, if present.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.rows.get(row)?.get(col)
    }
}
