//! Error types for project state and persistence.

use atelier_types::ComponentId;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors raised by project operators and the persistence archive.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A component with the same id is already present in the project.
    #[error("component {0} already exists in the project")]
    DuplicateComponent(ComponentId),

    /// The referenced component is not part of the project.
    #[error("component {0} not found in the project")]
    ComponentNotFound(ComponentId),

    /// No project is currently loaded in the store.
    #[error("no project is loaded")]
    NoProject,

    /// A record could not be serialized or deserialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence backend failed.
    #[error("backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}
