//! Model artifact loading and inference

pub mod inference;
pub mod loader;

pub use inference::{EngineError, PriceEngine};
pub use loader::{LoadedModel, ModelLoader};
