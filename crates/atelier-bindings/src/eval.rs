//! Asynchronous binding evaluation.
//!
//! Evaluating a binding may need to query external reactive state, so the
//! mechanism sits behind the [`BindingEvaluator`] trait -- production
//! wires in the front end's reactive state, tests use
//! [`EchoEvaluator`]. Evaluations for different properties are
//! independent and unordered relative to each other; an evaluation that
//! suspends never blocks the engine's synchronous paths (history commit,
//! constraint solve, problem scan). No timeout is imposed here -- callers
//! own that policy at the boundary.

use serde_json::Value;
use tracing::debug;

use crate::error::BindingError;
use crate::parse::parse_references;

/// A source of evaluated reference values.
///
/// Implementations resolve one `${component.property}` reference at a
/// time. The engine only needs a promise-like asynchronous contract.
pub trait BindingEvaluator {
    /// Resolve a single reference to its current value.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Evaluation`] when the external state
    /// cannot produce a value.
    fn evaluate_reference(
        &self,
        component: &str,
        property: &str,
    ) -> impl Future<Output = Result<Value, BindingError>> + Send;
}

/// Evaluate an expression against the given evaluator.
///
/// A bare placeholder (`"${a.x}"` and nothing else) passes the resolved
/// value through untouched, preserving its type. Mixed expressions render
/// to a string with each placeholder substituted.
///
/// # Errors
///
/// Returns [`BindingError::MalformedExpression`] for unbalanced syntax
/// and propagates the first [`BindingError::Evaluation`] failure.
pub async fn evaluate<E: BindingEvaluator>(
    expression: &str,
    evaluator: &E,
) -> Result<Value, BindingError> {
    let parsed = parse_references(expression);

    if parsed.malformed {
        return Err(BindingError::MalformedExpression {
            expression: expression.to_owned(),
        });
    }

    if parsed.references.is_empty() {
        // A constant expression evaluates to itself.
        return Ok(Value::String(expression.to_owned()));
    }

    if let Some(only) = parsed.references.first()
        && parsed.references.len() == 1
        && is_bare_placeholder(expression)
    {
        return evaluator
            .evaluate_reference(&only.component, &only.property)
            .await;
    }

    let mut rendered = expression.to_owned();
    for reference in &parsed.references {
        let value = evaluator
            .evaluate_reference(&reference.component, &reference.property)
            .await?;
        let placeholder = format!("${{{}.{}}}", reference.component, reference.property);
        rendered = rendered.replace(&placeholder, &render_value(&value));
    }

    debug!(expression, "binding rendered to string");
    Ok(Value::String(rendered))
}

/// Whether the whole expression is exactly one placeholder.
fn is_bare_placeholder(expression: &str) -> bool {
    let trimmed = expression.trim();
    trimmed.starts_with("${") && trimmed.ends_with('}') && trimmed.matches("${").count() == 1
}

/// Render an evaluated value for string interpolation.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An evaluator that echoes `component.property` back as a string.
///
/// Lets the binding pipeline be exercised end-to-end without the front
/// end's reactive state attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoEvaluator;

impl EchoEvaluator {
    /// Create a new echo evaluator.
    pub const fn new() -> Self {
        Self
    }
}

impl BindingEvaluator for EchoEvaluator {
    async fn evaluate_reference(
        &self,
        component: &str,
        property: &str,
    ) -> Result<Value, BindingError> {
        Ok(Value::String(format!("{component}.{property}")))
    }
}
