//! Error types for the atelier-history crate.

/// Errors that can occur during history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Undo or redo was requested on an exhausted stack.
    #[error("no history available: {context}")]
    NoHistory {
        /// What was attempted and why it could not proceed.
        context: String,
    },

    /// A timeline jump targeted an index outside the snapshot list.
    #[error("snapshot index {index} out of range (history holds {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Current number of retained snapshots.
        len: usize,
    },
}
