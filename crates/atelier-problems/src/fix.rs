//! Idempotent auto-fix application.
//!
//! Auto-fix is a pure transformation: it returns a new project and leaves
//! the input untouched. Applying the same fix twice never changes the
//! result after the first application succeeds.

use rust_decimal::Decimal;
use tracing::debug;

use atelier_types::{Component, ComponentType, Problem, ProblemKind, Project};

/// Apply the auto-fix for a finding, returning the fixed project.
///
/// Non-fixable findings and findings whose component no longer exists
/// return the project unchanged -- a stale problem list is tolerated the
/// same way dangling references are elsewhere.
#[must_use]
pub fn apply_auto_fix(project: &Project, problem: &Problem) -> Project {
    if !problem.auto_fixable {
        debug!(problem = %problem.id, "finding is not auto-fixable, ignoring");
        return project.clone();
    }

    let Some(component_id) = problem.component_id else {
        debug!(problem = %problem.id, "fixable finding without a component, ignoring");
        return project.clone();
    };

    let mut fixed = project.clone();
    let Some(component) = fixed.components.iter_mut().find(|c| c.id == component_id) else {
        debug!(
            problem = %problem.id,
            component = %component_id,
            "finding references a removed component, ignoring"
        );
        return fixed;
    };

    match problem.kind {
        ProblemKind::Accessibility => fix_accessibility(component),
        ProblemKind::Error => fix_position(component),
        _ => {
            debug!(problem = %problem.id, kind = ?problem.kind, "no fix for this kind");
        }
    }

    fixed
}

/// Give the component a default role and use its name as the label.
///
/// Only missing values are filled in, so re-applying is a no-op.
fn fix_accessibility(component: &mut Component) {
    if component.props.role().is_none() {
        component.props.set_role(default_role(component.component_type));
    }
    if component.props.label().is_none() {
        let name = component.name.clone();
        component.props.set_label(&name);
    }
}

/// Clamp negative coordinates to the canvas origin.
fn fix_position(component: &mut Component) {
    if component.x < Decimal::ZERO {
        component.x = Decimal::ZERO;
    }
    if component.y < Decimal::ZERO {
        component.y = Decimal::ZERO;
    }
}

/// The default ARIA role for each component kind.
const fn default_role(kind: ComponentType) -> &'static str {
    match kind {
        ComponentType::Button => "button",
        ComponentType::Input => "textbox",
        ComponentType::Text => "text",
        ComponentType::Card => "region",
        ComponentType::Container => "group",
    }
}
