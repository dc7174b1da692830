use thiserror::Error;

/// Raised while turning request fields into typed car inputs.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("unsupported {field} label: {label:?}")]
    UnsupportedLabel { field: &'static str, label: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

/// Raised while loading the model/scaler artifacts at boot.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} feature_names do not match the expected schema: got {got:?}")]
    SchemaMismatch { artifact: &'static str, got: Vec<String> },

    #[error("{artifact} {field} has {got} entries, expected {expected}")]
    LengthMismatch {
        artifact: &'static str,
        field: &'static str,
        got: usize,
        expected: usize,
    },
}

/// Anything that goes wrong between a request and a price.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("model returned a non-finite price: {0}")]
    NonFinite(f64),

    #[error("model failure: {0}")]
    Model(String),
}
