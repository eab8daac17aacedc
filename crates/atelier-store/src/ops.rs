//! Pure project operators.
//!
//! Every operator takes the current project by reference and returns a
//! fresh project value. Nothing here touches clocks or global state;
//! the [`crate::ProjectStore`] stamps `last_modified` when the result
//! is installed.

use atelier_types::{Component, ComponentId, Project};

use crate::error::StoreError;

/// Adds a component to the project.
///
/// # Errors
///
/// Returns [`StoreError::DuplicateComponent`] when a component with the
/// same id is already present.
pub fn add_component(project: &Project, component: Component) -> Result<Project, StoreError> {
    if project.has_component(component.id) {
        return Err(StoreError::DuplicateComponent(component.id));
    }
    let mut next = project.clone();
    tracing::debug!(component_id = %component.id, name = %component.name, "component added");
    next.components.push(component);
    Ok(next)
}

/// Applies an edit to one component and returns the updated project.
///
/// # Errors
///
/// Returns [`StoreError::ComponentNotFound`] when the component is not
/// part of the project.
pub fn update_component(
    project: &Project,
    id: ComponentId,
    edit: impl FnOnce(&mut Component),
) -> Result<Project, StoreError> {
    let mut next = project.clone();
    let target = next
        .components
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StoreError::ComponentNotFound(id))?;
    edit(target);
    // The edit closure must not be able to re-key the component.
    target.id = id;
    Ok(next)
}

/// Removes a component from the project.
///
/// Constraints and bindings on other components that referenced the
/// removed component are left in place; the solver and evaluator treat
/// dangling references as inert.
///
/// # Errors
///
/// Returns [`StoreError::ComponentNotFound`] when the component is not
/// part of the project.
pub fn remove_component(project: &Project, id: ComponentId) -> Result<Project, StoreError> {
    if !project.has_component(id) {
        return Err(StoreError::ComponentNotFound(id));
    }
    let mut next = project.clone();
    next.components.retain(|c| c.id != id);
    tracing::debug!(component_id = %id, "component removed");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
