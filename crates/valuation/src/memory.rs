//! Offline source backed by pre-downloaded payloads.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use valuation_core::{
    DataSource, PriceSource, RawStatement, Result, StatementSource, Symbol, ValuationError,
};

/// Payload held for one symbol.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct Entry {
    statements: Vec<RawStatement>,
    price: Option<f64>,
}

/// In-memory statement and price source.
///
/// Useful for tests, replays and offline analysis. The JSON form maps each
/// symbol to its tables and price:
///
/// ```json
/// {
///   "005930": {
///     "price": 71000,
///     "statements": [{"columns": ["", "2023.12"], "rows": [["EPS(원)", "2,131"]]}]
///   }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct StaticSource {
    name: String,
    entries: HashMap<Symbol, Entry>,
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new("Static")
    }
}

impl StaticSource {
    /// Creates an empty source with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Parses a symbol-keyed JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: HashMap<String, Entry> = serde_json::from_str(json)
            .map_err(|e| ValuationError::Parse(format!("Failed to parse payload: {e}")))?;
        let entries = payload
            .into_iter()
            .map(|(symbol, entry)| (Symbol::new(symbol), entry))
            .collect();
        Ok(Self {
            entries,
            ..Self::default()
        })
    }

    /// Adds a statement table for `symbol`.
    #[must_use]
    pub fn with_statement(mut self, symbol: &Symbol, statement: RawStatement) -> Self {
        self.entries
            .entry(symbol.clone())
            .or_default()
            .statements
            .push(statement);
        self
    }

    /// Sets the price of `symbol`.
    #[must_use]
    pub fn with_price(mut self, symbol: &Symbol, price: f64) -> Self {
        self.entries.entry(symbol.clone()).or_default().price = Some(price);
        self
    }

    /// Symbols with any payload.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.keys()
    }

    fn unavailable(&self, reason: String) -> ValuationError {
        ValuationError::SourceUnavailable {
            source_name: self.name.clone(),
            reason,
        }
    }
}

impl DataSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Pre-downloaded statements and prices held in memory"
    }
}

#[async_trait]
impl StatementSource for StaticSource {
    #[instrument(skip(self), fields(source = %self.name, symbol = %symbol))]
    async fn fetch_statements(&self, symbol: &Symbol) -> Result<Vec<RawStatement>> {
        match self.entries.get(symbol) {
            Some(entry) if !entry.statements.is_empty() => {
                debug!(count = entry.statements.len(), "Serving stored statements");
                Ok(entry.statements.clone())
            }
            _ => Err(self.unavailable(format!("no statements for {symbol}"))),
        }
    }
}

#[async_trait]
impl PriceSource for StaticSource {
    #[instrument(skip(self), fields(source = %self.name, symbol = %symbol))]
    async fn fetch_price(&self, symbol: &Symbol) -> Result<f64> {
        self.entries
            .get(symbol)
            .and_then(|entry| entry.price)
            .ok_or_else(|| self.unavailable(format!("no price for {symbol}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::ColumnLabel;

    const PAYLOAD: &str = r#"{
        "aapl": {"price": 190.5},
        "005930": {
            "statements": [{"columns": ["", "2023.12"], "rows": [["EPS(원)", "2,131"]]}]
        }
    }"#;

    #[tokio::test]
    async fn test_from_json() {
        let source = StaticSource::from_json(PAYLOAD).unwrap();
        assert_eq!(source.name(), "Static");
        assert_eq!(source.symbols().count(), 2);

        let price = source.fetch_price(&Symbol::new("AAPL")).await.unwrap();
        assert_eq!(price, 190.5);

        let tables = source.fetch_statements(&Symbol::new("005930")).await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns[1], ColumnLabel::flat("2023.12"));
        assert_eq!(tables[0].rows[0][1].as_number(), Some(2131.0));
    }

    #[tokio::test]
    async fn test_missing_payload() {
        let source = StaticSource::from_json(PAYLOAD).unwrap();

        let err = source.fetch_statements(&Symbol::new("AAPL")).await.unwrap_err();
        assert!(matches!(err, ValuationError::SourceUnavailable { .. }));

        let err = source.fetch_price(&Symbol::new("005930")).await.unwrap_err();
        assert_eq!(
            err,
            ValuationError::SourceUnavailable {
                source_name: "Static".to_string(),
                reason: "no price for 005930".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_builders() {
        let symbol = Symbol::new("msft");
        let source = StaticSource::new("Fixture")
            .with_statement(&symbol, RawStatement::default())
            .with_statement(&symbol, RawStatement::default())
            .with_price(&symbol, 410.0);

        assert_eq!(source.name(), "Fixture");
        assert_eq!(source.fetch_statements(&symbol).await.unwrap().len(), 2);
        assert_eq!(source.fetch_price(&symbol).await.unwrap(), 410.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            StaticSource::from_json("[1, 2]"),
            Err(ValuationError::Parse(_))
        ));
    }
}
