#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for equity valuation.
//!
//! This crate provides the foundations shared by the normalizer and the
//! valuation engine:
//!
//! - [`RawStatement`](statement::RawStatement) - Unprocessed statement grid
//! - [`PeriodKey`](period::PeriodKey) - Canonical annual period identifier
//! - [`Metric`](metric::Metric) - Headline metrics and their label aliases
//! - [`Fundamentals`](types::Fundamentals) - Inputs to the valuation models
//! - [`ValuationConfig`](config::ValuationConfig) - Engine policy parameters
//! - [`StatementSource`](source::StatementSource) / [`PriceSource`](source::PriceSource) - Data collaborators

/// Policy configuration.
pub mod config;
/// Error types for normalization and valuation.
pub mod error;
/// Statement metrics and label aliases.
pub mod metric;
/// Reporting period definitions.
pub mod period;
/// Source traits for external data.
pub mod source;
/// Raw statement tables.
pub mod statement;
/// Core data types (Symbol, Fundamentals, ValuationResult, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use config::{NormalizeOptions, OrderingPolicy, ValuationConfig};
pub use error::{Result, ValuationError};
pub use metric::Metric;
pub use period::{PeriodKey, PeriodType};
pub use source::{DataSource, PriceSource, StatementSource};
pub use statement::{ColumnLabel, RawCell, RawStatement};
pub use types::{Fundamentals, ModelKind, Symbol, ValuationResult, Verdict};
