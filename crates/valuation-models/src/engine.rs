//! Evaluation of the configured models.

use serde::Serialize;
use tracing::debug;

use valuation_core::{Fundamentals, ModelKind, Result, ValuationConfig, ValuationResult};

use crate::deviation::deviation_percent;
use crate::graham::Graham;
use crate::lynch::{PegReading, PeterLynch};
use crate::model::ValuationModel;
use crate::srim::SRim;
use crate::yamaguchi::Yamaguchi;

/// Results of every configured model for one set of fundamentals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Valuation {
    /// Market price the deviations were measured against.
    pub price: Option<f64>,
    /// One result per configured model, in configuration order.
    pub results: Vec<ValuationResult>,
    /// PEG diagnostic, when PER and growth are positive.
    pub peg: Option<PegReading>,
}

impl Valuation {
    /// Returns the result of `model`, if it was evaluated.
    #[must_use]
    pub fn get(&self, model: ModelKind) -> Option<&ValuationResult> {
        self.results.iter().find(|r| r.model == model)
    }

    /// Iterates over results with a usable fair value.
    pub fn computable(&self) -> impl Iterator<Item = &ValuationResult> {
        self.results.iter().filter(|r| r.is_computable())
    }

    /// The result with the deepest discount (most negative deviation).
    #[must_use]
    pub fn best_margin(&self) -> Option<&ValuationResult> {
        self.results
            .iter()
            .filter_map(|r| r.deviation_percent.map(|d| (r, d)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(r, _)| r)
    }
}

/// Runs the configured valuation models.
///
/// Stateless apart from its validated policy; safe to share across threads.
#[derive(Clone, Debug, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Builds the model for `kind` with this engine's policy.
    #[must_use]
    pub fn model(&self, kind: ModelKind) -> Box<dyn ValuationModel> {
        match kind {
            ModelKind::Graham => Box::new(Graham),
            ModelKind::SRim => Box::new(SRim::new(self.config.required_return_percent)),
            ModelKind::PeterLynch => Box::new(PeterLynch::new(self.config.growth_cap_percent)),
            ModelKind::Yamaguchi => Box::new(Yamaguchi),
        }
    }

    /// Evaluates one model and its deviation from the market price.
    #[must_use]
    pub fn evaluate_model(&self, kind: ModelKind, fundamentals: &Fundamentals) -> ValuationResult {
        let fair_value = self.model(kind).fair_value(fundamentals);
        let deviation = fundamentals
            .usable_price()
            .and_then(|price| deviation_percent(price, fair_value));

        if fair_value <= 0.0 {
            debug!(model = %kind, fair_value, "Model not computable");
        }

        ValuationResult {
            model: kind,
            fair_value,
            deviation_percent: deviation,
        }
    }

    /// Evaluates every configured model.
    #[must_use]
    pub fn evaluate(&self, fundamentals: &Fundamentals) -> Valuation {
        let results = self
            .config
            .models
            .iter()
            .map(|kind| self.evaluate_model(*kind, fundamentals))
            .collect();

        Valuation {
            price: fundamentals.usable_price(),
            results,
            peg: PegReading::from_fundamentals(fundamentals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lynch::PegSignal;
    use valuation_core::{ValuationError, Verdict};

    fn scenario() -> Fundamentals {
        Fundamentals::new(70_000.0)
            .with_eps(5_000.0)
            .with_bps(40_000.0)
            .with_roe(12.0)
            .with_eps_growth_rate(10.0)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let engine = ValuationEngine::default();
        let valuation = engine.evaluate(&scenario());

        let graham = valuation.get(ModelKind::Graham).unwrap();
        assert!((graham.fair_value - 67_082.039).abs() < 1e-2);
        let srim = valuation.get(ModelKind::SRim).unwrap();
        assert!((srim.fair_value - 60_000.0).abs() < 1e-6);
        let lynch = valuation.get(ModelKind::PeterLynch).unwrap();
        assert_eq!(lynch.fair_value, 50_000.0);

        for kind in [ModelKind::Graham, ModelKind::SRim, ModelKind::PeterLynch] {
            let result = valuation.get(kind).unwrap();
            assert!(result.is_computable());
            assert!(result.deviation_percent.unwrap() > 0.0);
            assert_eq!(result.verdict(), Verdict::Overvalued);
        }
        assert!((lynch.deviation_percent.unwrap() - 40.0).abs() < 1e-9);
        assert!((srim.deviation_percent.unwrap() - 16.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_results_follow_configured_order() {
        let config = ValuationConfig::default()
            .with_models(vec![ModelKind::PeterLynch, ModelKind::Graham]);
        let engine = ValuationEngine::new(config).unwrap();
        let kinds: Vec<ModelKind> = engine
            .evaluate(&scenario())
            .results
            .iter()
            .map(|r| r.model)
            .collect();
        assert_eq!(kinds, [ModelKind::PeterLynch, ModelKind::Graham]);
    }

    #[test]
    fn test_non_computable_models_have_no_deviation() {
        let loss_maker = Fundamentals::new(10_000.0)
            .with_eps(-500.0)
            .with_bps(20_000.0)
            .with_roe(3.0)
            .with_eps_growth_rate(-5.0);
        let valuation = ValuationEngine::default().evaluate(&loss_maker);

        for kind in [ModelKind::Graham, ModelKind::PeterLynch, ModelKind::Yamaguchi] {
            let result = valuation.get(kind).unwrap();
            assert_eq!(result.fair_value, 0.0);
            assert_eq!(result.deviation_percent, None);
            assert_eq!(result.verdict(), Verdict::NotComputable);
        }
        // S-RIM still values the book, below it.
        let srim = valuation.get(ModelKind::SRim).unwrap();
        assert!(srim.is_computable() && srim.fair_value < 20_000.0);
        assert_eq!(valuation.computable().count(), 1);
    }

    #[test]
    fn test_missing_price_yields_no_deviation() {
        let mut f = scenario();
        f.price = None;
        let valuation = ValuationEngine::default().evaluate(&f);
        assert!(valuation.results.iter().all(|r| r.deviation_percent.is_none()));
        assert!(valuation.get(ModelKind::Graham).unwrap().is_computable());
        assert_eq!(valuation.best_margin(), None);
    }

    #[test]
    fn test_best_margin() {
        let f = Fundamentals::new(55_000.0)
            .with_eps(5_000.0)
            .with_bps(40_000.0)
            .with_roe(12.0)
            .with_eps_growth_rate(10.0);
        let valuation = ValuationEngine::default().evaluate(&f);
        // Yamaguchi: 5,000 * 10 + 40,000 = 90,000, the largest fair value.
        assert_eq!(valuation.best_margin().unwrap().model, ModelKind::Yamaguchi);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let config = ValuationConfig::default().with_required_return(0.0);
        assert!(matches!(
            ValuationEngine::new(config),
            Err(ValuationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_peg_reading_is_reported() {
        let valuation = ValuationEngine::default().evaluate(&scenario().with_per(14.0));
        let peg = valuation.peg.unwrap();
        assert!((peg.ratio - 1.4).abs() < 1e-12);
        assert_eq!(peg.signal, PegSignal::Fair);
    }
}
