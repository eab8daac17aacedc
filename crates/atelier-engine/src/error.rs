//! Engine-level error type.

use atelier_history::HistoryError;
use atelier_store::StoreError;

use crate::config::ConfigError;

/// Errors raised while wiring and driving an editing session.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The project store rejected an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The history manager rejected an operation.
    #[error("history error: {0}")]
    History(#[from] HistoryError),

    /// The session has no project loaded.
    #[error("no project is open in this session")]
    NoProject,
}
