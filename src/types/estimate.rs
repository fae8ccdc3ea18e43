//! Price estimate returned to callers

use crate::types::mode::PriceMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price estimate. Exists only as a response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Market mode the estimate was made for
    pub mode: PriceMode,

    /// Estimated price in `currency`
    pub predicted_price: f64,

    /// Currency of the estimate
    pub currency: String,

    /// Estimate divided by the listing's floor area
    pub price_per_m2: f64,

    /// When the estimate was computed
    pub timestamp: DateTime<Utc>,
}

impl PriceEstimate {
    /// Build an estimate for a listing with the given floor area.
    ///
    /// Area is validated to be at least 10 m² before inference, so the
    /// per-square-meter figure is always well defined.
    pub fn new(mode: PriceMode, predicted_price: f64, currency: &str, square_meters: f64) -> Self {
        Self {
            mode,
            predicted_price,
            currency: currency.to_string(),
            price_per_m2: predicted_price / square_meters,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_per_m2() {
        let estimate = PriceEstimate::new(PriceMode::Sale, 600_000.0, "PLN", 50.0);
        assert_eq!(estimate.price_per_m2, 12_000.0);
        assert_eq!(estimate.currency, "PLN");
    }

    #[test]
    fn test_estimate_serialization() {
        let estimate = PriceEstimate::new(PriceMode::Rent, 3_200.0, "PLN", 40.0);

        let json = serde_json::to_string(&estimate).unwrap();
        let deserialized: PriceEstimate = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.mode, PriceMode::Rent);
        assert_eq!(deserialized.predicted_price, 3_200.0);
        assert_eq!(deserialized.price_per_m2, 80.0);
    }
}
