//! The problem rule set.
//!
//! Three rules, each evaluated independently per component:
//!
//! | Rule | Kind | Severity | Auto-fixable |
//! |------|------|----------|--------------|
//! | Missing both `role` and `label` | Accessibility | Medium | yes |
//! | More than 10 declared properties | Performance | Low | no |
//! | Negative `x` or `y` | Error | High | yes |
//!
//! Findings are sorted for presentation: severity descending, then
//! recency descending.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use atelier_types::{Component, Problem, ProblemId, ProblemKind, Project, Severity};

/// Maximum declared properties before the performance rule fires.
const MAX_DECLARED_PROPS: usize = 10;

/// Scan the project and return every finding, presentation-sorted.
///
/// Deterministic given the same project content, modulo the fresh ids and
/// timestamps each [`Problem`] instance carries.
pub fn scan(project: &Project) -> Vec<Problem> {
    let mut problems: Vec<Problem> = project
        .components
        .iter()
        .flat_map(check_component)
        .collect();

    problems.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then(b.created_at.cmp(&a.created_at))
    });

    debug!(
        project = %project.id,
        findings = problems.len(),
        "problem scan complete"
    );

    problems
}

/// Evaluate every rule against one component.
fn check_component(component: &Component) -> Vec<Problem> {
    [
        check_accessibility(component),
        check_prop_count(component),
        check_position(component),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Accessibility rule: a component with neither a role nor a label is
/// invisible to assistive technology.
fn check_accessibility(component: &Component) -> Option<Problem> {
    if component.props.role().is_some() || component.props.label().is_some() {
        return None;
    }

    Some(Problem {
        id: ProblemId::new(),
        kind: ProblemKind::Accessibility,
        severity: Severity::Medium,
        title: "Missing accessibility properties".to_owned(),
        description: format!(
            "'{}' has neither a role nor a label, so assistive technology cannot describe it",
            component.name
        ),
        component_id: Some(component.id),
        auto_fixable: true,
        suggestion: Some(format!(
            "Add a default role and use '{}' as the label",
            component.name
        )),
        created_at: Utc::now(),
    })
}

/// Performance rule: oversized property bags slow down re-renders and
/// usually indicate data that belongs in bindings.
fn check_prop_count(component: &Component) -> Option<Problem> {
    let declared = component.props.declared_count();
    if declared <= MAX_DECLARED_PROPS {
        return None;
    }

    Some(Problem {
        id: ProblemId::new(),
        kind: ProblemKind::Performance,
        severity: Severity::Low,
        title: "Large property count".to_owned(),
        description: format!(
            "'{}' declares {declared} properties (threshold: {MAX_DECLARED_PROPS})",
            component.name
        ),
        component_id: Some(component.id),
        auto_fixable: false,
        suggestion: Some("Move derived values into bindings or extension data".to_owned()),
        created_at: Utc::now(),
    })
}

/// Position rule: negative coordinates put the component off canvas.
fn check_position(component: &Component) -> Option<Problem> {
    if component.x >= Decimal::ZERO && component.y >= Decimal::ZERO {
        return None;
    }

    Some(Problem {
        id: ProblemId::new(),
        kind: ProblemKind::Error,
        severity: Severity::High,
        title: "Component positioned off canvas".to_owned(),
        description: format!(
            "'{}' sits at ({}, {}); negative coordinates are clipped by the canvas",
            component.name, component.x, component.y
        ),
        component_id: Some(component.id),
        auto_fixable: true,
        suggestion: Some("Clamp the position to the canvas origin".to_owned()),
        created_at: Utc::now(),
    })
}
