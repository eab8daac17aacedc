//! Snapshot-based undo/redo history for the Atelier project engine.
//!
//! The [`HistoryManager`] owns every [`Snapshot`] it creates. Commits are
//! strictly ordered relative to the mutation they capture: the store
//! replaces the project first, then the session commits, then any problem
//! scan is considered fresh.
//!
//! [`Snapshot`]: atelier_types::Snapshot
//! [`HistoryManager`]: manager::HistoryManager

pub mod error;
pub mod manager;

pub use error::HistoryError;
pub use manager::{DEFAULT_MAX_SNAPSHOTS, HistoryManager};
