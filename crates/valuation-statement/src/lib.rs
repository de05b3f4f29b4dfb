#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Annual financial-statement normalization.
//!
//! - [`StatementNormalizer`] - Raw table to [`NormalizedStatement`]
//! - [`NormalizedStatement::lookup`] - Metric resolution with one-step fallback
//! - [`extract_fundamentals`] - Valuation inputs for the target period
//! - [`HistoryTable`] - Headline metrics across periods

/// Column classification and statement detection.
pub mod classify;
/// Valuation inputs.
pub mod fundamentals;
/// Headline-metric history.
pub mod history;
/// Metric value resolution.
pub mod lookup;
/// Statement normalization.
pub mod normalize;

pub use classify::{ColumnKind, locate_statement};
pub use fundamentals::{compound_growth, eps_growth_rate, extract_fundamentals};
pub use history::{HistoryRow, HistoryTable};
pub use lookup::Resolved;
pub use normalize::{NormalizedStatement, StatementNormalizer, StatementRow, normalize};
