//! Source orchestration: fetch, normalize, value.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use valuation_core::{
    Fundamentals, PeriodKey, PriceSource, RawStatement, Result, StatementSource, Symbol,
    ValuationError,
};
use valuation_models::{Valuation, ValuationEngine};
use valuation_statement::{
    HistoryTable, NormalizedStatement, StatementNormalizer, extract_fundamentals,
};

use crate::config::AnalyzerConfig;
use crate::memory::StaticSource;

/// Outcome of analyzing one symbol.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    /// The analyzed symbol.
    pub symbol: Symbol,
    /// The normalized annual statement.
    pub statement: NormalizedStatement,
    /// Inputs extracted for the target period.
    pub fundamentals: Fundamentals,
    /// Per-model fair values and deviations.
    pub valuation: Valuation,
}

impl Analysis {
    /// The period the fundamentals describe.
    #[must_use]
    pub fn target_period(&self) -> PeriodKey {
        self.statement.target_period()
    }

    /// Closing date of the target period.
    #[must_use]
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.target_period().period_end()
    }

    /// Headline metrics across every annual period.
    #[must_use]
    pub fn history(&self) -> HistoryTable {
        self.statement.history()
    }
}

/// Runs statement and price sources through the normalizer and the engine.
///
/// Sources of each kind are tried in registration order until one succeeds.
///
/// # Example
///
/// ```rust,ignore
/// use valuation::{Analyzer, StaticSource, Symbol};
///
/// let analyzer = Analyzer::new().with_static(StaticSource::from_json(payload)?);
/// let analysis = analyzer.analyze(&Symbol::new("005930")).await?;
/// if let Some(best) = analysis.valuation.best_margin() {
///     println!("{}: {:?}", best.model, best.deviation_percent);
/// }
/// ```
#[derive(Default)]
pub struct Analyzer {
    statement_sources: Vec<Arc<dyn StatementSource>>,
    price_sources: Vec<Arc<dyn PriceSource>>,
    normalizer: StatementNormalizer,
    engine: ValuationEngine,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field(
                "statement_sources",
                &self
                    .statement_sources
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "price_sources",
                &self
                    .price_sources
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
            )
            .field("normalizer", &self.normalizer)
            .field("engine", &self.engine)
            .finish()
    }
}

impl Analyzer {
    /// Create an analyzer with default policy and no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with the given policy.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            normalizer: StatementNormalizer::new(config.normalize),
            engine: ValuationEngine::new(config.valuation)?,
            ..Default::default()
        })
    }

    /// Register a statement source.
    pub fn register_statement(&mut self, source: Arc<dyn StatementSource>) {
        debug!(source = source.name(), "Registering statement source");
        self.statement_sources.push(source);
    }

    /// Register a price source.
    pub fn register_price(&mut self, source: Arc<dyn PriceSource>) {
        debug!(source = source.name(), "Registering price source");
        self.price_sources.push(source);
    }

    /// Register a [`StaticSource`] for both statements and prices.
    #[must_use]
    pub fn with_static(mut self, source: StaticSource) -> Self {
        let source = Arc::new(source);
        self.register_statement(source.clone());
        self.register_price(source);
        self
    }

    /// The statement normalizer in use.
    #[must_use]
    pub const fn normalizer(&self) -> &StatementNormalizer {
        &self.normalizer
    }

    /// The valuation engine in use.
    #[must_use]
    pub const fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Fetch statement tables, trying sources in order until one succeeds.
    pub async fn fetch_statements(&self, symbol: &Symbol) -> Result<Vec<RawStatement>> {
        if self.statement_sources.is_empty() {
            return Err(ValuationError::NotConfigured(
                "No statement sources registered".to_string(),
            ));
        }

        let mut last_error = None;
        for source in &self.statement_sources {
            debug!(source = source.name(), symbol = %symbol, "Fetching statements");

            match source.fetch_statements(symbol).await {
                Ok(tables) => return Ok(tables),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Source failed, trying next");
                    last_error = Some(unavailable(source.name(), e));
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| unavailable("statements", ValuationError::StatementNotFound)))
    }

    /// Fetch the market price, trying sources in order until one returns a
    /// positive, finite price.
    pub async fn fetch_price(&self, symbol: &Symbol) -> Result<f64> {
        if self.price_sources.is_empty() {
            return Err(ValuationError::NotConfigured(
                "No price sources registered".to_string(),
            ));
        }

        let mut last_error = None;
        for source in &self.price_sources {
            debug!(source = source.name(), symbol = %symbol, "Fetching price");

            match source.fetch_price(symbol).await {
                Ok(price) if price.is_finite() && price > 0.0 => return Ok(price),
                Ok(price) => {
                    warn!(source = source.name(), price, "Unusable price, trying next");
                    last_error = Some(ValuationError::SourceUnavailable {
                        source_name: source.name().to_string(),
                        reason: format!("unusable price {price} for {symbol}"),
                    });
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Source failed, trying next");
                    last_error = Some(unavailable(source.name(), e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            unavailable("prices", ValuationError::PriceUnavailable(symbol.to_string()))
        }))
    }

    /// Fetch, normalize and value one symbol.
    ///
    /// Statements and price are fetched concurrently. A missing statement or
    /// price is a hard failure; models whose inputs do not qualify are not.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn analyze(&self, symbol: &Symbol) -> Result<Analysis> {
        let (tables, price) =
            tokio::join!(self.fetch_statements(symbol), self.fetch_price(symbol));
        self.analyze_tables(symbol, &tables?, price?)
    }

    /// Analyze several symbols concurrently.
    ///
    /// Results are returned in input order; one symbol failing does not
    /// affect the others.
    pub async fn analyze_batch(&self, symbols: &[Symbol]) -> Vec<Result<Analysis>> {
        debug!(symbol_count = symbols.len(), "Analyzing batch");
        join_all(symbols.iter().map(|symbol| self.analyze(symbol))).await
    }

    /// Analyze already-fetched tables against a known price.
    pub fn analyze_tables(
        &self,
        symbol: &Symbol,
        tables: &[RawStatement],
        price: f64,
    ) -> Result<Analysis> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ValuationError::PriceUnavailable(symbol.to_string()));
        }

        let statement = self.normalizer.normalize_first(tables)?;
        let fundamentals = extract_fundamentals(&statement, Some(price));
        let valuation = self.engine.evaluate(&fundamentals);
        debug!(
            symbol = %symbol,
            period = %statement.target_period(),
            as_of = ?statement.target_period().period_end(),
            computable = valuation.computable().count(),
            "Valuation complete"
        );

        Ok(Analysis {
            symbol: symbol.clone(),
            statement,
            fundamentals,
            valuation,
        })
    }
}

fn unavailable(source_name: &str, error: ValuationError) -> ValuationError {
    match error {
        ValuationError::SourceUnavailable { .. } => error,
        other => ValuationError::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: other.to_string(),
        },
    }
}
