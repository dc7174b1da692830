use serde::Deserialize;
use std::{fs, net::SocketAddr, path::PathBuf};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    /// Standardize features with the scaler before scoring.
    pub apply_scaler: bool,
    /// Log every feature row that reaches the model.
    pub log_features: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts/linear_model.json"),
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            bind_addr: "0.0.0.0".to_string(),
            port: 8501,
            apply_scaler: false,
            log_features: false,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path))?;
        serde_json::from_str(&data).with_context(|| format!("invalid config JSON in {}", path))
    }

    /// `CONFIG_PATH` file (if any), then individual environment overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        let base = match std::env::var("CONFIG_PATH") {
            Ok(p) => Self::load(&p)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_overrides(|k| std::env::var(k).ok()))
    }

    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(p) = var("MODEL_PATH") {
            self.model_path = p.into();
        }
        if let Some(p) = var("SCALER_PATH") {
            self.scaler_path = p.into();
        }
        if let Some(a) = var("BIND_ADDR") {
            self.bind_addr = a;
        }
        if let Some(port) = var("PORT").and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Some(v) = var("APPLY_SCALER") {
            self.apply_scaler = flag(&v);
        }
        if let Some(v) = var("LOG_PRED") {
            self.log_features = flag(&v);
        }
        self
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        use anyhow::Context;
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind_addr, self.port))
    }
}

fn flag(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "yes")
}
