//! ONNX model artifact loader

use crate::types::mode::PriceMode;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{info, warn};

/// Loaded price model with metadata
pub struct LoadedModel {
    /// Market mode this model predicts
    pub mode: PriceMode,
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the model
    pub input_name: String,
    /// Output name for the estimate
    pub output_name: String,
}

/// Loader for price model artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a single price model from file
    pub fn load_model<P: AsRef<Path>>(&self, path: P, mode: PriceMode) -> Result<LoadedModel> {
        let path = path.as_ref();

        info!(mode = %mode, path = %path.display(), threads = self.onnx_threads, "Loading price model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // skl2onnx regression exports name the estimate "variable"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("variable") || o.name.contains("output"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "variable".to_string())
            });

        info!(
            mode = %mode,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            mode,
            session,
            input_name,
            output_name,
        })
    }

    /// Load the artifacts for the configured modes from a directory.
    ///
    /// A mode whose artifact is missing or unreadable is skipped with a
    /// warning and answered with 503 at request time. Startup fails only
    /// when no artifact loads at all.
    pub fn load_artifacts<P: AsRef<Path>>(
        &self,
        models_dir: P,
        modes: &[PriceMode],
    ) -> Result<Vec<LoadedModel>> {
        let models_dir = models_dir.as_ref();
        let mut models = Vec::new();

        for &mode in modes {
            let path = models_dir.join(mode.artifact_name());
            if path.exists() {
                match self.load_model(&path, mode) {
                    Ok(model) => models.push(model),
                    Err(e) => {
                        warn!(mode = %mode, error = %e, "Failed to load model, skipping");
                    }
                }
            } else {
                warn!(mode = %mode, path = %path.display(), "Model artifact not found");
            }
        }

        if models.is_empty() {
            anyhow::bail!("No model artifacts loaded from {}", models_dir.display());
        }

        info!(
            count = models.len(),
            "Loaded {} models from {}",
            models.len(),
            models_dir.display()
        );

        Ok(models)
    }
}
