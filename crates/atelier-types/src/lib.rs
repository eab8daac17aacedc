//! Shared type definitions for the Atelier project engine.
//!
//! This crate is the single source of truth for all types used across the
//! Atelier workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the visual builder front end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (component kinds, constraints, problems)
//! - [`structs`] -- Core entity structs (projects, components, snapshots,
//!   problems, organisms, trails)
//! - [`props`] -- Per-component-type property schemas

pub mod enums;
pub mod ids;
pub mod props;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ComponentType, ConstraintKind, ProblemKind, Severity, TrailKind};
pub use ids::{ComponentId, OrganismId, ProblemId, ProjectId, SnapshotId, TrailId};
pub use props::{
    ButtonProps, CardProps, ComponentProps, ContainerProps, InputProps, TextProps,
};
pub use structs::{Component, Constraint, Organism, Problem, Project, Snapshot, Trail};
