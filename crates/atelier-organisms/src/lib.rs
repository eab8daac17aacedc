//! Enrichment organism population lifecycle for the Atelier project engine.
//!
//! Organisms represent iterative self-improvement cycles: each carries a
//! running question/answer log seeded by AI interaction metadata and an
//! enrichment score in `[0, 1]` that gates replication and deletion.
//!
//! State machine per organism:
//! `Active -> (Replicating | Eligible-for-deletion) -> Deleted`.
//! Deletion is always an explicit operation -- the manager never deletes
//! on its own, keeping destructive action opt-in.
//!
//! All randomness flows through an injected [`rand::Rng`], so tests drive
//! the lifecycle with seeded generators while production uses real
//! entropy.

pub mod error;
pub mod population;

pub use error::OrganismError;
pub use population::{DEFAULT_MAX_ACTIVE, PopulationManager, is_eligible_for_deletion};
