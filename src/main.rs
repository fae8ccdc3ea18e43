//! Housing Price Prediction Service - Main Entry Point
//!
//! Loads the configured model artifacts once, then serves price predictions
//! over HTTP until shut down.

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use housing_price_service::{
    config::AppConfig,
    encoder::FeatureEncoder,
    metrics::{MetricsReporter, ServiceMetrics},
    models::PriceEngine,
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration first so the logging section can take effect
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG still wins over the configured level
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(config.logging.directive().parse()?);
    if config.logging.json() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Housing Price Prediction Service");
    info!(
        models_dir = %config.models.models_dir,
        modes = ?config.models.modes,
        currency = %config.models.currency,
        "Configuration loaded"
    );

    // Load model artifacts; fatal if none of the configured modes loads
    let engine = Arc::new(PriceEngine::new(&config)?);
    info!(loaded = ?engine.loaded_modes(), "Model artifacts loaded");

    let encoder = FeatureEncoder::new();
    info!(
        feature_count = encoder.feature_count(),
        "Feature encoder initialized"
    );

    let metrics = Arc::new(ServiceMetrics::new());

    // Periodic metrics summary every 30 seconds
    let metrics_clone = metrics.clone();
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics_clone, 30);
        reporter.start().await;
    });

    let state = web::Data::new(AppState {
        engine,
        encoder,
        metrics,
        currency: config.models.currency.clone(),
    });

    let bind_address = (config.server.host.clone(), config.server.port);
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Binding HTTP server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server::json_config())
            .configure(server::routes)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
