//! Property binding parsing and evaluation for the Atelier project engine.
//!
//! A binding is a string expression containing zero or more
//! `${componentId.property}` placeholders that make one component property
//! depend on another component's property. This crate covers the full
//! binding lifecycle:
//!
//! - [`parse`] -- placeholder extraction that salvages every well-formed
//!   reference even from malformed input, and never panics.
//! - [`eval`] -- asynchronous evaluation behind the [`BindingEvaluator`]
//!   trait seam for the external reactive state.
//! - [`ops`] -- pure `Project -> Project` operators for adding and
//!   removing bindings through the store.
//!
//! [`BindingEvaluator`]: eval::BindingEvaluator

pub mod error;
pub mod eval;
pub mod ops;
pub mod parse;

pub use error::BindingError;
pub use eval::{BindingEvaluator, EchoEvaluator, evaluate};
pub use ops::{remove_binding, upsert_binding};
pub use parse::{BindingRef, ParsedExpression, parse_dependencies, parse_references, validate};
