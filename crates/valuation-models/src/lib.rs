#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fair-value models and the valuation engine.
//!
//! Every formula is a pure free function and also a [`ValuationModel`]:
//!
//! - [`graham_number`] / [`Graham`]
//! - [`s_rim`] / [`SRim`]
//! - [`peter_lynch`] / [`PeterLynch`], with [`peg_ratio`] as a diagnostic
//! - [`yamaguchi`] / [`Yamaguchi`]
//!
//! [`ValuationEngine`] evaluates the configured models and the price
//! deviation from each.

/// Price deviation from fair value.
pub mod deviation;
/// Configured model evaluation.
pub mod engine;
/// Graham number.
pub mod graham;
/// Peter Lynch model and PEG.
pub mod lynch;
/// The valuation model trait.
pub mod model;
/// Simplified residual-income model.
pub mod srim;
/// Yamaguchi composite.
pub mod yamaguchi;

pub use deviation::deviation_percent;
pub use engine::{Valuation, ValuationEngine};
pub use graham::{GRAHAM_MULTIPLIER, Graham, graham_number};
pub use lynch::{PegReading, PegSignal, PeterLynch, peg_ratio, peter_lynch};
pub use model::ValuationModel;
pub use srim::{SRim, excess_return, s_rim};
pub use yamaguchi::{Yamaguchi, yamaguchi};
