use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use car_price_predictor::{
    config::ServerConfig,
    server::{self, AppState},
    CarInputs, LinearModel, PriceService, Scaler, FEATURE_NAMES,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ServerConfig::from_env()?;

    // ---------- Artifacts (loaded once, shared read-only) ----------

    let model = LinearModel::load(&cfg.model_path)
        .with_context(|| format!("failed to load model {}", cfg.model_path.display()))?;
    let scaler = Scaler::load(&cfg.scaler_path)
        .with_context(|| format!("failed to load scaler {}", cfg.scaler_path.display()))?;
    tracing::info!(
        "loaded model {} and scaler {}; feat_list[{}]: {:?}",
        cfg.model_path.display(),
        cfg.scaler_path.display(),
        FEATURE_NAMES.len(),
        FEATURE_NAMES
    );

    let mut service = PriceService::new(Arc::new(model)).with_feature_logging(cfg.log_features);
    if cfg.apply_scaler {
        service = service.with_scaler(Arc::new(scaler));
    } else {
        tracing::warn!(
            "scaler loaded but not applied; features reach the model unscaled \
             (set APPLY_SCALER=1 to standardize)"
        );
    }

    // Warmup on the form defaults so a broken artifact fails at boot
    let warm = service
        .predict(&CarInputs::form_defaults())
        .context("warmup prediction failed")?;
    tracing::info!("warmup forward ok ({})", warm.price_text);

    let app = server::router(AppState { service: Arc::new(service) });

    let addr = cfg.socket_addr()?;
    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
