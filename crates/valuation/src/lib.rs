#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Equity valuation from annual financial statements.
//!
//! This crate re-exports the core types, the statement normalizer and the
//! valuation models, and provides an [`Analyzer`] that pulls raw tables and
//! a price from registered sources with ordered fallback.
//!
//! # Example
//!
//! ```rust,ignore
//! use valuation::{Analyzer, AnalyzerConfig, StaticSource, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> valuation::Result<()> {
//!     let config = AnalyzerConfig::from_json(r#"{"valuation": {"required_return_percent": 9.0}}"#)?;
//!     let analyzer = Analyzer::with_config(config)?
//!         .with_static(StaticSource::from_json(&std::fs::read_to_string("payload.json").unwrap())?);
//!
//!     let analysis = analyzer.analyze(&Symbol::new("005930")).await?;
//!     println!("{}", analysis.history().to_frame()?);
//!     for result in analysis.valuation.computable() {
//!         println!("{}: {:.0} ({:?})", result.model, result.fair_value, result.verdict());
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Source orchestration and analysis records.
pub mod analyzer;
/// Analyzer configuration.
pub mod config;
/// Offline in-memory source.
pub mod memory;

// Core types and traits
pub use valuation_core::*;

// Normalizer and engine
pub use valuation_models::{
    PegReading, PegSignal, Valuation, ValuationEngine, ValuationModel, deviation_percent,
    graham_number, peg_ratio, peter_lynch, s_rim, yamaguchi,
};
pub use valuation_statement::{
    HistoryRow, HistoryTable, NormalizedStatement, StatementNormalizer, StatementRow,
    extract_fundamentals, normalize,
};

pub use analyzer::{Analysis, Analyzer};
pub use config::AnalyzerConfig;
pub use memory::StaticSource;
