//! Market mode (sale vs. rent) dispatch

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A mode string that is neither "sale" nor "rent".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prediction mode '{0}', expected 'sale' or 'rent'")]
pub struct ParseModeError(pub String);

/// Market mode a prediction is made for. Each mode is served by its own
/// model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceMode {
    /// Purchase price
    Sale,
    /// Monthly rental price
    Rent,
}

impl PriceMode {
    /// File name of this mode's model artifact inside the models directory.
    pub fn artifact_name(&self) -> String {
        format!("model_{}.onnx", self)
    }
}

impl fmt::Display for PriceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceMode::Sale => write!(f, "sale"),
            PriceMode::Rent => write!(f, "rent"),
        }
    }
}

impl FromStr for PriceMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(PriceMode::Sale),
            "rent" => Ok(PriceMode::Rent),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("sale".parse(), Ok(PriceMode::Sale));
        assert_eq!("Rent".parse(), Ok(PriceMode::Rent));
    }

    #[test]
    fn test_parse_error_carries_bad_value() {
        let err = "lease".parse::<PriceMode>().unwrap_err();
        assert_eq!(err, ParseModeError("lease".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown prediction mode 'lease', expected 'sale' or 'rent'"
        );
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(PriceMode::Sale.artifact_name(), "model_sale.onnx");
        assert_eq!(PriceMode::Rent.artifact_name(), "model_rent.onnx");
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&PriceMode::Sale).unwrap(), "\"sale\"");
        let mode: PriceMode = serde_json::from_str("\"rent\"").unwrap();
        assert_eq!(mode, PriceMode::Rent);
    }
}
