//! Error types for the atelier-organisms crate.

use atelier_types::OrganismId;

/// Errors that can occur during population operations.
#[derive(Debug, thiserror::Error)]
pub enum OrganismError {
    /// The active population is at its cap; no organism can be created.
    #[error("population full: {active}/{max} active organisms")]
    PopulationFull {
        /// Current number of active organisms.
        active: usize,
        /// The configured population cap.
        max: usize,
    },

    /// A replication precondition was not met.
    #[error("replication not eligible: {reason}")]
    NotEligible {
        /// Which precondition failed.
        reason: String,
    },

    /// No organism with the given id exists in the population.
    #[error("organism not found: {0}")]
    OrganismNotFound(OrganismId),

    /// An arithmetic overflow occurred during lifecycle bookkeeping.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
