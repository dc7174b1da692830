use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{ArtifactError, PredictError};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

// ---------- Artifact files ----------

#[derive(Deserialize)]
struct LinearModelJson {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Deserialize)]
struct ScalerJson {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ArtifactError> {
    let txt = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&txt).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn check_names(artifact: &'static str, names: Vec<String>) -> Result<(), ArtifactError> {
    if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
        return Err(ArtifactError::SchemaMismatch { artifact, got: names });
    }
    Ok(())
}

fn to_array(
    artifact: &'static str,
    field: &'static str,
    v: Vec<f64>,
) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let got = v.len();
    v.try_into().map_err(|_| ArtifactError::LengthMismatch {
        artifact,
        field,
        got,
        expected: FEATURE_COUNT,
    })
}

// ---------- Predictor ----------

/// Maps one ordered feature row to a price in Lakhs.
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError>;
}

/// Ordinary least squares model exported from training.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    /// Loads `linear_model.json`, rejecting any column list other than the
    /// feature schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let raw: LinearModelJson = read_json(path.as_ref())?;
        check_names("model", raw.feature_names)?;
        Ok(Self {
            coefficients: to_array("model", "coefficients", raw.coefficients)?,
            intercept: raw.intercept,
        })
    }

}

impl Predictor for LinearModel {
    fn predict(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError> {
        Ok(self
            .coefficients
            .iter()
            .zip(row.iter())
            .fold(self.intercept, |acc, (w, x)| acc + w * x))
    }
}

// ---------- Scaler ----------

/// Standardization `(x - mean) / scale` fit alongside the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl Scaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self { mean, scale }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let raw: ScalerJson = read_json(path.as_ref())?;
        check_names("scaler", raw.feature_names)?;
        Ok(Self {
            mean: to_array("scaler", "mean", raw.mean)?,
            scale: to_array("scaler", "scale", raw.scale)?,
        })
    }

    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = *row;
        for (i, x) in out.iter_mut().enumerate() {
            // zero-variance columns were left unscaled at fit time
            let s = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *x = (*x - self.mean[i]) / s;
        }
        out
    }
}
