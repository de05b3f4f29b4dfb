//! Error types for normalization and valuation.
//!
//! This module defines [`ValuationError`] which covers the hard failures of the
//! workspace. Soft conditions (an unresolvable metric, a model whose inputs do not
//! qualify) are never errors; they degrade to `None` or a non-positive fair value.

use thiserror::Error;

/// Errors that can occur while normalizing statements or running valuations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// A data source could not supply its payload.
    #[error("Source unavailable ({source_name}): {reason}")]
    SourceUnavailable {
        /// The source that failed.
        source_name: String,
        /// Why it failed.
        reason: String,
    },

    /// No table in the input resembles a financial statement.
    #[error("Financial statement table not found")]
    StatementNotFound,

    /// A statement was found but no column carries an annual period label.
    #[error("Annual period columns could not be identified")]
    PeriodsUnidentifiable,

    /// Annual columns are not in chronological order under a strict ordering policy.
    #[error("Period columns out of order: {previous} precedes {next}")]
    PeriodsOutOfOrder {
        /// The earlier column's period.
        previous: String,
        /// The later column's period, which is not after `previous`.
        next: String,
    },

    /// No usable market price for the symbol.
    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    /// An invalid policy parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error parsing a payload.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error building a data frame.
    #[error("Frame error: {0}")]
    Frame(String),

    /// No source of the required kind was registered.
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Result type alias using [`ValuationError`].
pub type Result<T> = std::result::Result<T, ValuationError>;
