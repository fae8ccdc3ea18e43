//! Price inference engine over the loaded model artifacts

use crate::config::AppConfig;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::types::mode::PriceMode;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use tracing::{debug, info};

/// Why a prediction could not be made.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The artifact for this mode did not load at startup; every request
    /// for the mode fails this way until the process is restarted.
    #[error("model for {0} mode is not loaded")]
    ModelUnavailable(PriceMode),

    /// The model ran but produced NaN or an infinite value.
    #[error("model produced a non-finite estimate")]
    NonFiniteEstimate,

    /// The ONNX runtime failed.
    #[error(transparent)]
    Inference(#[from] anyhow::Error),
}

/// Inference engine holding one immutable model per served mode.
///
/// Built once at startup and shared read-only across request handlers.
/// Sessions sit behind locks only because the runtime API needs mutable
/// access to run; the fitted models themselves never change.
pub struct PriceEngine {
    models: HashMap<PriceMode, RwLock<LoadedModel>>,
}

impl PriceEngine {
    /// Load the engine from configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.models.onnx_threads)?;
        let models = loader.load_artifacts(&config.models.models_dir, &config.models.modes)?;
        Ok(Self::from_models(models))
    }

    /// Build the engine from already-loaded models.
    pub fn from_models(models: Vec<LoadedModel>) -> Self {
        let models: HashMap<PriceMode, RwLock<LoadedModel>> = models
            .into_iter()
            .map(|m| (m.mode, RwLock::new(m)))
            .collect();

        info!(modes = ?models.keys().collect::<Vec<_>>(), "Price engine initialized");

        Self { models }
    }

    /// Modes this engine can answer for.
    pub fn loaded_modes(&self) -> Vec<PriceMode> {
        let mut modes: Vec<PriceMode> = self.models.keys().copied().collect();
        modes.sort_by_key(|m| m.to_string());
        modes
    }

    /// Whether a model for the given mode is loaded.
    pub fn serves(&self, mode: PriceMode) -> bool {
        self.models.contains_key(&mode)
    }

    /// Run inference for a mode on an encoded feature vector.
    pub fn predict(&self, mode: PriceMode, features: &[f32]) -> Result<f64, EngineError> {
        let model_lock = self
            .models
            .get(&mode)
            .ok_or(EngineError::ModelUnavailable(mode))?;

        let mut model = model_lock
            .write()
            .map_err(|e| EngineError::Inference(anyhow::anyhow!("Lock error: {}", e)))?;

        let estimate = run_model(&mut model, features)?;

        if !estimate.is_finite() {
            return Err(EngineError::NonFiniteEstimate);
        }

        debug!(mode = %mode, estimate = estimate, "Inference complete");
        Ok(estimate)
    }
}

/// Run a single model on an encoded feature vector.
fn run_model(model: &mut LoadedModel, features: &[f32]) -> Result<f64> {
    use ort::value::Tensor;

    // Input tensor shape [1, num_features]
    let shape = vec![1_i64, features.len() as i64];
    let input_tensor =
        Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

    let outputs = model
        .session
        .run(ort::inputs![&model.input_name => input_tensor])?;

    extract_estimate(&outputs, &model.output_name)
}

/// Pull the regression estimate out of the model output.
///
/// skl2onnx regressors emit a float tensor of shape [1, 1]; take the first
/// element and fall back to scanning all outputs if the expected name is
/// absent.
fn extract_estimate(outputs: &ort::session::SessionOutputs, output_name: &str) -> Result<f64> {
    if let Some(output) = outputs.get(output_name) {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            if let Some(&value) = data.first() {
                return Ok(value as f64);
            }
        }
    }

    for (name, output) in outputs.iter() {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            if let Some(&value) = data.first() {
                debug!(output = %name, "Extracted estimate from fallback output");
                return Ok(value as f64);
            }
        }
    }

    anyhow::bail!("No float output found in model result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_engine_reports_unavailable() {
        let engine = PriceEngine::from_models(Vec::new());
        assert!(!engine.serves(PriceMode::Sale));
        assert!(matches!(
            engine.predict(PriceMode::Sale, &[0.0; 46]),
            Err(EngineError::ModelUnavailable(PriceMode::Sale))
        ));
    }

    #[test]
    fn test_loaded_modes_sorted() {
        let engine = PriceEngine::from_models(Vec::new());
        assert!(engine.loaded_modes().is_empty());
    }
}
