use serde::Deserialize;
use std::{fmt, ops::RangeInclusive, str::FromStr};

use crate::error::FeatureError;

// ---------- Widget ranges ----------

pub const YEAR_RANGE: RangeInclusive<i64> = 2000..=2024;
pub const PRESENT_PRICE_RANGE: RangeInclusive<f64> = 1.0..=50.0;
pub const DRIVEN_KMS_RANGE: RangeInclusive<i64> = 0..=500_000;
pub const OWNER_RANGE: RangeInclusive<i64> = 0..=3;

// ---------- Categorical fields ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Cng,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Petrol, FuelType::Diesel, FuelType::Cng];

    pub fn label(self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Cng => "CNG",
        }
    }

    /// Integer code the model was trained on.
    pub fn code(self) -> i64 {
        match self {
            FuelType::Petrol => 0,
            FuelType::Diesel => 1,
            FuelType::Cng => 2,
        }
    }
}

impl FromStr for FuelType {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| FeatureError::UnsupportedLabel {
                field: "fuel_type",
                label: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellingType {
    Individual,
    Dealer,
}

impl SellingType {
    pub const ALL: [SellingType; 2] = [SellingType::Individual, SellingType::Dealer];

    pub fn label(self) -> &'static str {
        match self {
            SellingType::Individual => "Individual",
            SellingType::Dealer => "Dealer",
        }
    }
}

impl FromStr for SellingType {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| FeatureError::UnsupportedLabel {
                field: "selling_type",
                label: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    pub fn label(self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

impl FromStr for Transmission {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| FeatureError::UnsupportedLabel {
                field: "transmission",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SellingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------- Inputs ----------

/// Raw car attributes as chosen on the form, already inside widget ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct CarInputs {
    pub year: i64,
    pub present_price: f64,
    pub driven_kms: i64,
    pub fuel_type: FuelType,
    pub owner: i64,
    pub selling_type: SellingType,
    pub transmission: Transmission,
}

impl CarInputs {
    /// Values the form starts with.
    pub fn form_defaults() -> Self {
        Self {
            year: 2020,
            present_price: 5.0,
            driven_kms: 50_000,
            fuel_type: FuelType::Petrol,
            owner: 0,
            selling_type: SellingType::Individual,
            transmission: Transmission::Manual,
        }
    }
}

/// Wire form of [`CarInputs`]. Labels stay strings here so an unknown label
/// comes back as a `FeatureError` rather than a deserializer rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub year: i64,
    pub present_price: f64,
    pub driven_kms: i64,
    pub fuel_type: String,
    pub owner: i64,
    pub selling_type: String,
    pub transmission: String,
}

impl PredictRequest {
    /// Parse labels and clamp numbers to the widget ranges.
    pub fn into_inputs(self) -> Result<CarInputs, FeatureError> {
        if !self.present_price.is_finite() {
            return Err(FeatureError::InvalidInput {
                field: "present_price",
                reason: format!("{} is not a finite number", self.present_price),
            });
        }

        Ok(CarInputs {
            year: clamp_to(self.year, &YEAR_RANGE),
            present_price: self
                .present_price
                .clamp(*PRESENT_PRICE_RANGE.start(), *PRESENT_PRICE_RANGE.end()),
            driven_kms: clamp_to(self.driven_kms, &DRIVEN_KMS_RANGE),
            fuel_type: self.fuel_type.parse()?,
            owner: clamp_to(self.owner, &OWNER_RANGE),
            selling_type: self.selling_type.parse()?,
            transmission: self.transmission.parse()?,
        })
    }
}

fn clamp_to(v: i64, range: &RangeInclusive<i64>) -> i64 {
    v.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictRequest {
        PredictRequest {
            year: 2020,
            present_price: 5.0,
            driven_kms: 50_000,
            fuel_type: "Petrol".into(),
            owner: 0,
            selling_type: "Individual".into(),
            transmission: "Manual".into(),
        }
    }

    #[test]
    fn labels_parse_exactly() {
        assert_eq!("CNG".parse::<FuelType>().unwrap(), FuelType::Cng);
        assert_eq!("Dealer".parse::<SellingType>().unwrap(), SellingType::Dealer);
        assert_eq!("Automatic".parse::<Transmission>().unwrap(), Transmission::Automatic);
        assert!("cng".parse::<FuelType>().is_err());
        assert!("Electric".parse::<FuelType>().is_err());
    }

    #[test]
    fn unknown_label_names_the_field() {
        let mut req = request();
        req.transmission = "CVT".into();
        match req.into_inputs() {
            Err(FeatureError::UnsupportedLabel { field, label }) => {
                assert_eq!(field, "transmission");
                assert_eq!(label, "CVT");
            }
            other => panic!("expected UnsupportedLabel, got {:?}", other),
        }
    }

    #[test]
    fn numbers_are_clamped_to_widget_ranges() {
        let mut req = request();
        req.year = 1995;
        req.present_price = 80.0;
        req.driven_kms = -10;
        req.owner = 9;
        let inputs = req.into_inputs().unwrap();
        assert_eq!(inputs.year, 2000);
        assert_eq!(inputs.present_price, 50.0);
        assert_eq!(inputs.driven_kms, 0);
        assert_eq!(inputs.owner, 3);
    }

    #[test]
    fn default_request_matches_form_defaults() {
        assert_eq!(request().into_inputs().unwrap(), CarInputs::form_defaults());
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let mut req = request();
        req.present_price = f64::NAN;
        assert!(matches!(
            req.into_inputs(),
            Err(FeatureError::InvalidInput { field: "present_price", .. })
        ));
    }
}
