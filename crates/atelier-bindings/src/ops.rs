//! Pure project operators for the binding lifecycle.
//!
//! Both operators take the current project by reference and return a
//! fresh project value; the caller installs the result through the
//! store. Validation here checks referential integrity against the
//! project at write time. References can still go dangling later when
//! the referenced component is removed; the evaluator treats those as
//! inert, so no re-validation sweep runs on component removal.

use std::collections::BTreeSet;

use atelier_types::{ComponentId, Project};

use crate::error::BindingError;
use crate::parse::validate;

/// Adds or replaces a binding on one component property.
///
/// The expression is validated against the project's current component
/// ids before the binding is written.
///
/// # Errors
///
/// Returns [`BindingError::ComponentNotFound`] when the target
/// component is not in the project, [`BindingError::MalformedExpression`]
/// for unbalanced placeholder syntax, and
/// [`BindingError::UnknownComponent`] when the expression references an
/// id that does not resolve.
pub fn upsert_binding(
    project: &Project,
    component_id: ComponentId,
    property: &str,
    expression: &str,
) -> Result<Project, BindingError> {
    if !project.has_component(component_id) {
        return Err(BindingError::ComponentNotFound(component_id));
    }

    let known: BTreeSet<String> = project
        .component_ids()
        .iter()
        .map(ToString::to_string)
        .collect();
    validate(expression, &known)?;

    let mut next = project.clone();
    if let Some(component) = next.components.iter_mut().find(|c| c.id == component_id) {
        component
            .bindings
            .insert(property.to_owned(), expression.to_owned());
        tracing::debug!(component_id = %component_id, property, "binding upserted");
    }
    Ok(next)
}

/// Removes a binding from one component property.
///
/// Removing a property that has no binding is a no-op.
///
/// # Errors
///
/// Returns [`BindingError::ComponentNotFound`] when the component is
/// not in the project.
pub fn remove_binding(
    project: &Project,
    component_id: ComponentId,
    property: &str,
) -> Result<Project, BindingError> {
    if !project.has_component(component_id) {
        return Err(BindingError::ComponentNotFound(component_id));
    }

    let mut next = project.clone();
    if let Some(component) = next.components.iter_mut().find(|c| c.id == component_id)
        && component.bindings.remove(property).is_some()
    {
        tracing::debug!(component_id = %component_id, property, "binding removed");
    }
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
