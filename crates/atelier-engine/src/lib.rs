//! Session wiring, configuration, and auto-save loop.
//!
//! Ties the project store, history manager, problem detector, and
//! constraint solver into one editing session, loads `atelier.yaml`,
//! and runs the periodic auto-save task.

pub mod autosave;
pub mod config;
pub mod error;
pub mod session;

pub use autosave::run_autosave;
pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use session::Session;
