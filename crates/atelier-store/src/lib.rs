//! Canonical project state for the Atelier engine.
//!
//! The store owns the single source of truth for the project being
//! edited. Mutations never happen in place: the pure operators in
//! [`ops`] produce a new [`atelier_types::Project`] value, and the
//! caller installs it with [`ProjectStore::replace`]. Persistence is
//! abstracted behind the [`persist::KeyValueStore`] trait so the same
//! archive layout works against an in-memory map in tests and a real
//! key-value backend in production.

pub mod error;
pub mod memory;
pub mod ops;
pub mod persist;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use ops::{add_component, remove_component, update_component};
pub use persist::{Archive, KeyValueStore, keys};
pub use store::ProjectStore;
