//! Source traits for external data collaborators.
//!
//! Fetching is outside this workspace. These traits describe what a fetcher
//! must hand over: the tables found on a symbol's statement page, and a
//! current market price.
//!
//! - [`DataSource`] - Base trait for all sources
//! - [`StatementSource`] - Raw annual statement tables
//! - [`PriceSource`] - Current market price

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, statement::RawStatement, types::Symbol};

/// Base trait for all data sources.
pub trait DataSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Naver Finance").
    fn name(&self) -> &str;

    /// Returns a description of this source.
    fn description(&self) -> &str;
}

/// Source of raw financial-statement tables.
#[async_trait]
pub trait StatementSource: DataSource {
    /// Fetches every table extracted from the symbol's statement page.
    ///
    /// The normalizer picks the one that looks like an annual statement, so
    /// sources may return unrelated tables alongside it.
    async fn fetch_statements(&self, symbol: &Symbol) -> Result<Vec<RawStatement>>;
}

/// Source of current market prices.
#[async_trait]
pub trait PriceSource: DataSource {
    /// Fetches the latest price of the symbol, in its trading currency.
    async fn fetch_price(&self, symbol: &Symbol) -> Result<f64>;
}
