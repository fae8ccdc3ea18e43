//! Housing Price Prediction Service Library
//!
//! Serves price estimates for Polish apartment listings from models trained
//! offline and exported to ONNX, one artifact per market mode (sale, rent).

pub mod config;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use encoder::FeatureEncoder;
pub use error::ApiError;
pub use metrics::ServiceMetrics;
pub use models::PriceEngine;
pub use types::{PriceEstimate, PriceMode, PropertyListing};
