//! HTTP error mapping

use crate::models::inference::EngineError;
use crate::types::listing::ValidationError;
use crate::types::mode::ParseModeError;
use crate::types::response::ApiResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors surfaced to API callers.
///
/// Validation failures and unknown modes are client errors; an unloaded
/// model is a service-unavailable condition that persists until restart;
/// everything else is internal.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownMode(#[from] ParseModeError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnknownMode(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::ModelUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Engine(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ApiResponse::<()>::error(&self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::mode::PriceMode;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::Validation(ValidationError::NotFinite {
            field: "squareMeters",
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_mode_maps_to_bad_request() {
        let err = ApiError::UnknownMode(ParseModeError("lease".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("lease"));
    }

    #[test]
    fn test_unloaded_model_maps_to_service_unavailable() {
        let err = ApiError::Engine(EngineError::ModelUnavailable(PriceMode::Rent));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_non_finite_estimate_maps_to_internal_error() {
        let err = ApiError::Engine(EngineError::NonFiniteEstimate);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
