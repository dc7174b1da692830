//! Fixed-schema feature vector consumed by the price model.
//!
//! The model was fit against exactly these ten columns in exactly this order.
//! It performs no schema check of its own, so a reordered or renamed column
//! produces a wrong price rather than an error.

use serde::Serialize;

use crate::types::{CarInputs, SellingType, Transmission};

/// Year the training data treated as "now" when deriving `car_age`.
pub const REFERENCE_YEAR: i64 = 2024;

pub const FEATURE_COUNT: usize = 10;

/// Column names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Year",
    "Present_Price",
    "Driven_kms",
    "Fuel_Type",
    "Owner",
    "car_age",
    "Selling_type_Dealer",
    "Selling_type_Individual",
    "Transmission_Automatic",
    "Transmission_Manual",
];

/// One row of model input. Serializes as an ordered object keyed by
/// [`FEATURE_NAMES`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Present_Price")]
    pub present_price: f64,
    #[serde(rename = "Driven_kms")]
    pub driven_kms: i64,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: i64,
    #[serde(rename = "Owner")]
    pub owner: i64,
    pub car_age: i64,
    #[serde(rename = "Selling_type_Dealer")]
    pub selling_type_dealer: u8,
    #[serde(rename = "Selling_type_Individual")]
    pub selling_type_individual: u8,
    #[serde(rename = "Transmission_Automatic")]
    pub transmission_automatic: u8,
    #[serde(rename = "Transmission_Manual")]
    pub transmission_manual: u8,
}

impl FeatureVector {
    pub fn build(inputs: &CarInputs) -> Self {
        Self {
            year: inputs.year,
            present_price: inputs.present_price,
            driven_kms: inputs.driven_kms,
            fuel_type: inputs.fuel_type.code(),
            owner: inputs.owner,
            car_age: REFERENCE_YEAR - inputs.year,
            selling_type_dealer: one_hot(inputs.selling_type == SellingType::Dealer),
            selling_type_individual: one_hot(inputs.selling_type == SellingType::Individual),
            transmission_automatic: one_hot(inputs.transmission == Transmission::Automatic),
            transmission_manual: one_hot(inputs.transmission == Transmission::Manual),
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.year as f64,
            self.present_price,
            self.driven_kms as f64,
            self.fuel_type as f64,
            self.owner as f64,
            self.car_age as f64,
            f64::from(self.selling_type_dealer),
            f64::from(self.selling_type_individual),
            f64::from(self.transmission_automatic),
            f64::from(self.transmission_manual),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_row())
    }
}

fn one_hot(hit: bool) -> u8 {
    u8::from(hit)
}
