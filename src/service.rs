use serde::Serialize;
use std::sync::Arc;

use crate::error::PredictError;
use crate::features::FeatureVector;
use crate::model::{Predictor, Scaler};
use crate::present::{price_text, Gauge, InputSummary};
use crate::types::CarInputs;

/// Everything the page renders after a successful prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub price: f64,
    pub price_text: String,
    pub gauge: Gauge,
    pub summary: InputSummary,
    pub features: FeatureVector,
}

/// Read-only scoring pipeline shared by every request.
#[derive(Clone)]
pub struct PriceService {
    predictor: Arc<dyn Predictor>,
    scaler: Option<Arc<Scaler>>,
    log_features: bool,
}

impl PriceService {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor, scaler: None, log_features: false }
    }

    /// Standardize rows with `scaler` before scoring.
    pub fn with_scaler(mut self, scaler: Arc<Scaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn with_feature_logging(mut self, on: bool) -> Self {
        self.log_features = on;
        self
    }

    pub fn scales_features(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn predict(&self, inputs: &CarInputs) -> Result<PredictionReport, PredictError> {
        let features = FeatureVector::build(inputs);
        let mut row = features.to_row();
        if let Some(scaler) = &self.scaler {
            row = scaler.transform(&row);
        }

        if self.log_features {
            let nz = row.iter().filter(|x| **x != 0.0).count();
            let sample: Vec<String> = features
                .iter()
                .zip(row.iter())
                .map(|((name, _), v)| format!("{}={:.3}", name, v))
                .collect();
            tracing::info!("features nonzero={} [{}]", nz, sample.join(", "));
        }

        let price = self.predictor.predict(&row)?;
        if !price.is_finite() {
            return Err(PredictError::NonFinite(price));
        }
        tracing::debug!(price, "prediction ok");

        Ok(PredictionReport {
            price,
            price_text: price_text(price),
            gauge: Gauge::new(price),
            summary: InputSummary::new(inputs),
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use crate::model::LinearModel;
    use crate::types::{FuelType, SellingType, Transmission};

    fn inputs() -> CarInputs {
        CarInputs {
            year: 2020,
            present_price: 5.0,
            driven_kms: 50_000,
            fuel_type: FuelType::Petrol,
            owner: 0,
            selling_type: SellingType::Individual,
            transmission: Transmission::Manual,
        }
    }

    #[test]
    fn scaler_is_applied_only_when_attached() {
        let mut w = [0.0; FEATURE_COUNT];
        w[0] = 1.0; // price == (scaled) Year
        let model: Arc<dyn Predictor> = Arc::new(LinearModel::new(w, 0.0));

        let raw = PriceService::new(model.clone());
        assert_eq!(raw.predict(&inputs()).unwrap().price, 2020.0);

        let mut mean = [0.0; FEATURE_COUNT];
        mean[0] = 2010.0;
        let scaled = PriceService::new(model)
            .with_scaler(Arc::new(Scaler::new(mean, [1.0; FEATURE_COUNT])));
        assert!(scaled.scales_features());
        assert_eq!(scaled.predict(&inputs()).unwrap().price, 10.0);
    }

    #[test]
    fn report_keeps_unscaled_features() {
        let model: Arc<dyn Predictor> = Arc::new(LinearModel::new([0.0; FEATURE_COUNT], 3.0));
        let svc = PriceService::new(model)
            .with_scaler(Arc::new(Scaler::new([1.0; FEATURE_COUNT], [2.0; FEATURE_COUNT])));
        let report = svc.predict(&inputs()).unwrap();
        assert_eq!(report.features.year, 2020);
        assert_eq!(report.price_text, "₹3.00 Lakhs");
    }

    struct ConstPrice(f64);

    impl Predictor for ConstPrice {
        fn predict(&self, _row: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError> {
            Ok(self.0)
        }
    }

    #[test]
    fn non_finite_price_is_a_failure() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let svc = PriceService::new(Arc::new(ConstPrice(bad)));
            match svc.predict(&inputs()) {
                Err(PredictError::NonFinite(p)) => assert!(!p.is_finite()),
                other => panic!(
                    "expected NonFinite for {}, got {:?}",
                    bad,
                    other.map(|r| r.price_text)
                ),
            }
        }
    }

    #[test]
    fn overflowing_linear_model_is_a_failure() {
        let model = LinearModel::new([f64::MAX; FEATURE_COUNT], f64::MAX);
        let svc = PriceService::new(Arc::new(model));
        assert!(matches!(svc.predict(&inputs()), Err(PredictError::NonFinite(_))));
    }

    #[test]
    fn feature_logging_does_not_change_the_report() {
        let model: Arc<dyn Predictor> = Arc::new(ConstPrice(7.35));
        let quiet = PriceService::new(model.clone()).predict(&inputs()).unwrap();
        let logged = PriceService::new(model)
            .with_feature_logging(true)
            .predict(&inputs())
            .unwrap();
        assert_eq!(logged.price_text, quiet.price_text);
        assert_eq!(logged.features, quiet.features);
    }
}
