//! Error types for the viewer

use thiserror::Error;

/// Result type for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Non-fatal viewer errors. All of them are logged and leave the scene untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    #[error("Failed to load model '{id}' from {path}: {reason}")]
    LoadFailure {
        id: String,
        path: String,
        reason: String,
    },

    #[error("Cannot switch to '{0}': model is not loaded")]
    UnknownModel(String),

    #[error("Invalid colour '{value}' for model '{id}'")]
    InvalidColor { id: String, value: String },

    #[error("Duplicate catalog id: {0}")]
    DuplicateModel(String),

    #[error("Model '{id}' has non-positive scale {scale}")]
    InvalidScale { id: String, scale: f32 },

    #[error("Mesh for '{0}' has no vertex positions")]
    MissingPositions(String),
}
