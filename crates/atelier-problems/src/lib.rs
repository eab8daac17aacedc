//! Rule-based problem detection for the Atelier project engine.
//!
//! The detector is stateless: [`scan`] regenerates the full problem list
//! from the current project on every call, and findings are never mutated
//! in place or persisted. Each rule is independent and evaluated per
//! component; one misbehaving component never blocks scanning the rest.
//!
//! # Modules
//!
//! - [`rules`] -- The rule set and the [`scan`] entry point.
//! - [`fix`] -- Idempotent auto-fix application for fixable findings.
//!
//! [`scan`]: rules::scan

pub mod fix;
pub mod rules;

pub use fix::apply_auto_fix;
pub use rules::scan;
