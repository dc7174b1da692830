//! Resale price predictor for used cars.
//!
//! A form collects car attributes, [`features::FeatureVector`] encodes them
//! into the column layout the pre-trained linear model expects, and
//! [`service::PriceService`] scores the row and prepares the price text,
//! gauge and input summary served by [`server`].

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod present;
pub mod server;
pub mod service;
pub mod types;

pub use error::{ArtifactError, FeatureError, PredictError};
pub use features::{FeatureVector, FEATURE_NAMES, REFERENCE_YEAR};
pub use model::{LinearModel, Predictor, Scaler};
pub use service::{PredictionReport, PriceService};
pub use types::{CarInputs, FuelType, PredictRequest, SellingType, Transmission};
