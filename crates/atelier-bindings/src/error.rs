//! Error types for the atelier-bindings crate.
//!
//! One bad binding never blocks processing of the rest of the project:
//! callers handle these per property. Only [`ComponentNotFound`] rejects
//! a whole upsert/remove operation, since there is nothing to attach the
//! binding to.
//!
//! [`ComponentNotFound`]: BindingError::ComponentNotFound

use atelier_types::ComponentId;

/// Errors that can occur while parsing, validating, or evaluating bindings.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// The expression has unbalanced `${` / `}` syntax.
    #[error("malformed binding expression: {expression}")]
    MalformedExpression {
        /// The offending expression.
        expression: String,
    },

    /// A placeholder references a component id that does not exist in the
    /// current project.
    #[error("binding references unknown component: {id}")]
    UnknownComponent {
        /// The unresolved component id, as written in the expression.
        id: String,
    },

    /// The component a binding should be attached to does not exist.
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// The external evaluator failed to produce a value.
    #[error("binding evaluation failed: {message}")]
    Evaluation {
        /// Description of the failure from the evaluator.
        message: String,
    },
}
