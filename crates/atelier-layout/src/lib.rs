//! Layout constraint resolution for the Atelier project engine.
//!
//! The solver turns declared constraints into concrete component geometry
//! in a single synchronous pass. See [`solver::solve`] for the exact
//! semantics, including the one-step-stale behavior of cross-component
//! constraint chains.

pub mod solver;

pub use solver::solve;
