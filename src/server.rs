//! HTTP surface of the prediction service

use crate::encoder::FeatureEncoder;
use crate::error::ApiError;
use crate::metrics::ServiceMetrics;
use crate::models::PriceEngine;
use crate::types::{ApiResponse, PriceEstimate, PriceMode, PropertyListing};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Shared state handed to every worker. The engine is loaded once at
/// startup and never mutated afterwards.
pub struct AppState {
    pub engine: Arc<PriceEngine>,
    pub encoder: FeatureEncoder,
    pub metrics: Arc<ServiceMetrics>,
    pub currency: String,
}

/// Register all routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/stats", web::get().to(stats))
        .route("/predict/{mode}", web::post().to(predict));
}

/// JSON extractor configuration mapping malformed or incomplete bodies
/// (missing required fields included) to a 400 with the standard envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ApiResponse::<()>::error(&format!("invalid request body: {}", err));
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
            .into()
    })
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Housing price prediction service is running. POST a listing to /predict/sale or /predict/rent",
    ))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    loaded_modes: Vec<PriceMode>,
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: "ok",
        loaded_modes: state.engine.loaded_modes(),
    }))
}

async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(state.metrics.snapshot()))
}

async fn predict(
    state: web::Data<AppState>,
    path: web::Path<String>,
    listing: web::Json<PropertyListing>,
) -> Result<HttpResponse, ApiError> {
    let start = Instant::now();

    let mode: PriceMode = path.into_inner().parse().map_err(ApiError::UnknownMode)?;

    let listing = listing.into_inner();
    if let Err(e) = listing.validate() {
        state.metrics.record_rejection();
        warn!(mode = %mode, error = %e, "Listing rejected");
        return Err(e.into());
    }

    // Validation passed; only now does the model run
    let features = state.encoder.encode(&listing);
    let engine = state.engine.clone();
    let price = web::block(move || engine.predict(mode, &features))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("inference task failed: {}", e)))??;

    let elapsed = start.elapsed();
    state.metrics.record_prediction(mode, price, elapsed);

    info!(
        mode = %mode,
        predicted_price = price,
        processing_time_us = elapsed.as_micros(),
        "Prediction served"
    );

    let estimate = PriceEstimate::new(mode, price, &state.currency, listing.square_meters);
    Ok(HttpResponse::Ok().json(ApiResponse::success(estimate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn empty_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            engine: Arc::new(PriceEngine::from_models(Vec::new())),
            encoder: FeatureEncoder::new(),
            metrics: Arc::new(ServiceMetrics::new()),
            currency: "PLN".to_string(),
        })
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(json_config())
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_lists_loaded_modes() {
        let app = test_app!(empty_state());
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["loaded_modes"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_unknown_mode_is_client_error() {
        let app = test_app!(empty_state());
        let req = test::TestRequest::post()
            .uri("/predict/lease")
            .set_json(PropertyListing::sample())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_invalid_listing_is_rejected_before_inference() {
        let state = empty_state();
        let app = test_app!(state.clone());

        let mut listing = PropertyListing::sample();
        listing.city = "atlantis".to_string();

        let req = test::TestRequest::post()
            .uri("/predict/sale")
            .set_json(listing)
            .to_request();
        let resp = test::call_service(&app, req).await;

        // Rejected as a client error even though no model is loaded: the
        // validation failure wins because inference is never attempted.
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            state
                .metrics
                .validation_rejections
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[actix_web::test]
    async fn test_missing_field_is_client_error() {
        let app = test_app!(empty_state());
        let req = test::TestRequest::post()
            .uri("/predict/sale")
            .set_json(serde_json::json!({"city": "warszawa", "rooms": 2}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_valid_listing_without_model_is_service_unavailable() {
        let app = test_app!(empty_state());
        let req = test::TestRequest::post()
            .uri("/predict/sale")
            .set_json(PropertyListing::sample())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
