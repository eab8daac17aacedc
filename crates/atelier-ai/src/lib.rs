//! AI generation boundary for the Atelier project engine.
//!
//! The generation step itself (prompt construction, model invocation) is an
//! external collaborator. This crate owns both sides of its contract: the
//! request shape the engine sends out, and the strict validation of the
//! structured response before anything touches the project. A response that
//! fails shape validation is rejected as a whole; there is no partial
//! application.

pub mod apply;
pub mod contract;
pub mod error;
pub mod parse;

pub use apply::{apply_generation, materialize_trails};
pub use contract::{
    GenerationRequest, GenerationResponse, ProjectContext, ProposedComponent, ProposedConstraint,
    ProposedTrail,
};
pub use error::AiError;
pub use parse::parse_response;
