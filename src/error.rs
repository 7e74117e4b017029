//! Error types for block model rendering.

use thiserror::Error;

/// Result type alias using RasterError.
pub type Result<T> = std::result::Result<T, RasterError>;

/// Main error type for model resolution and rendering.
///
/// Every variant is fatal to the model resolution that raised it. Resolving
/// an unrelated model afterwards is unaffected.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No definition document exists for the identifier.
    #[error("Definition not found: {0}")]
    DefinitionNotFound(String),

    /// An identifier appeared twice while walking the parent chain.
    #[error("Cyclic definition: {id} (chain: {})", .chain.join(" -> "))]
    CyclicDefinition { id: String, chain: Vec<String> },

    /// A texture alias chain refers back to a name already visited.
    #[error("Texture alias cycle at: {0}")]
    TextureAliasCycle(String),

    /// A texture alias names an entry missing from the texture map.
    #[error("Unresolved texture reference: {0}")]
    UnresolvedTexture(String),

    /// A texture could not be loaded.
    #[error("Failed to load texture {path}: {reason}")]
    TextureLoad { path: String, reason: String },

    /// A definition field is malformed or missing.
    #[error("Invalid field {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Failed to export render output.
    #[error("Export error: {0}")]
    Export(String),
}

impl RasterError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RasterError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
