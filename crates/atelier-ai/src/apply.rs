//! All-or-nothing materialization of a validated generation response.
//!
//! Every proposed component is validated before any of them is added to
//! the project. Components get fresh ids and default geometry; proposed
//! props are typed against the component kind's schema. A single invalid
//! proposal rejects the whole batch and leaves the project untouched.

use std::collections::BTreeMap;

use atelier_types::{
    Component, ComponentId, ComponentProps, ComponentType, Constraint, Project, Trail, TrailId,
};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::contract::{GenerationResponse, ProposedComponent, ProposedConstraint, ProposedTrail};
use crate::error::AiError;

/// Applies a validated generation response to the project.
///
/// Returns a new project with every proposed component materialized, in
/// proposal order. The input project is never modified.
///
/// # Errors
///
/// Returns [`AiError::MalformedResponse`] when any proposal fails
/// validation; in that case nothing from the batch is applied.
pub fn apply_generation(
    project: &Project,
    response: &GenerationResponse,
) -> Result<Project, AiError> {
    // Validate the whole batch before touching the project.
    let materialized: Vec<Component> = response
        .components
        .iter()
        .map(materialize_component)
        .collect::<Result<_, _>>()?;

    if let Some(reasoning) = &response.reasoning {
        tracing::debug!(reasoning, "applying generation batch");
    }
    tracing::info!(
        project_id = %project.id,
        added = materialized.len(),
        trails = response.trails.len(),
        "generation batch applied"
    );

    let mut next = project.clone();
    next.components.extend(materialized);
    Ok(next)
}

/// Converts the response's trails into stored [`Trail`] records.
///
/// Node ids that do not parse as component ids are dropped with a debug
/// log; strength is clamped to `[0, 1]`.
#[must_use]
pub fn materialize_trails(response: &GenerationResponse) -> Vec<Trail> {
    response.trails.iter().map(materialize_trail).collect()
}

// ---------------------------------------------------------------------------
// Per-proposal materialization
// ---------------------------------------------------------------------------

fn materialize_component(proposal: &ProposedComponent) -> Result<Component, AiError> {
    if proposal.name.trim().is_empty() {
        return Err(AiError::MalformedResponse {
            reason: "proposed component has an empty name".to_owned(),
        });
    }

    let mut component = Component::new(proposal.component_type, &proposal.name);
    component.props = typed_props(proposal.component_type, proposal.props.as_ref())?;

    if let Some(bindings) = &proposal.bindings {
        component.bindings = bindings.clone();
    }
    if let Some(constraints) = &proposal.constraints {
        component.constraints = constraints.iter().filter_map(typed_constraint).collect();
    }

    Ok(component)
}

/// Types a raw props object against the kind's schema.
fn typed_props(kind: ComponentType, raw: Option<&Value>) -> Result<ComponentProps, AiError> {
    let Some(raw) = raw else {
        return Ok(ComponentProps::empty(kind));
    };

    let Value::Object(fields) = raw else {
        return Err(AiError::MalformedResponse {
            reason: format!("props for a {kind} component must be an object"),
        });
    };

    let mut tagged = fields.clone();
    let tag = serde_json::to_value(kind).unwrap_or(Value::Null);
    tagged.insert("component".to_owned(), tag);

    serde_json::from_value(Value::Object(tagged)).map_err(|e| AiError::MalformedResponse {
        reason: format!("invalid props for a {kind} component: {e}"),
    })
}

/// Resolves one proposed constraint, dropping it when the target id is
/// not a parseable component id.
fn typed_constraint(proposal: &ProposedConstraint) -> Option<Constraint> {
    let target = match &proposal.target {
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(uuid) => Some(ComponentId::from(uuid)),
            Err(_) => {
                tracing::debug!(target = raw, "dropping constraint with unparseable target id");
                return None;
            }
        },
        None => None,
    };

    Some(Constraint {
        kind: proposal.kind,
        target,
        value: proposal.value,
        active: true,
    })
}

fn materialize_trail(proposal: &ProposedTrail) -> Trail {
    let nodes: Vec<ComponentId> = proposal
        .nodes
        .iter()
        .filter_map(|raw| match Uuid::parse_str(raw) {
            Ok(uuid) => Some(ComponentId::from(uuid)),
            Err(_) => {
                tracing::debug!(node = raw.as_str(), "dropping trail node with unparseable id");
                None
            }
        })
        .collect();

    Trail {
        id: TrailId::new(),
        nodes,
        kind: proposal.kind,
        strength: proposal.strength.clamp(Decimal::ZERO, Decimal::ONE),
    }
}

/// Builds the bindings map shape the contract uses, for callers that
/// assemble proposals programmatically in tests and demos.
#[must_use]
pub fn bindings_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use atelier_types::ConstraintKind;

    use super::*;
    use crate::parse::parse_response;

    fn respond(raw: &str) -> GenerationResponse {
        parse_response(raw).ok().unwrap_or_default()
    }

    #[test]
    fn batch_materializes_with_fresh_ids_and_defaults() {
        let project = Project::new("canvas");
        let response = respond(
            r#"{"components": [
                {"type": "button", "name": "Submit"},
                {"type": "input", "name": "Email"}
            ]}"#,
        );

        let next = apply_generation(&project, &response)
            .ok()
            .unwrap_or_else(|| Project::new("fallback"));

        assert_eq!(next.components.len(), 2);
        assert!(project.components.is_empty());
        let first = next.components.first();
        assert!(first.is_some_and(|c| c.width > Decimal::ZERO));
        assert!(first.is_some_and(|c| c.component_type == ComponentType::Button));
    }

    #[test]
    fn typed_props_flow_into_the_schema() {
        let project = Project::new("canvas");
        let response = respond(
            r#"{"components": [
                {"type": "button", "name": "Submit",
                 "props": {"label": "Send", "variant": "primary"}}
            ]}"#,
        );

        let next = apply_generation(&project, &response)
            .ok()
            .unwrap_or_else(|| Project::new("fallback"));

        let label = next
            .components
            .first()
            .and_then(|c| c.props.label().map(str::to_owned));
        assert_eq!(label.as_deref(), Some("Send"));
    }

    #[test]
    fn invalid_props_reject_the_whole_batch() {
        let project = Project::new("canvas");
        let response = respond(
            r#"{"components": [
                {"type": "text", "name": "Caption"},
                {"type": "button", "name": "Bad", "props": {"disabled": "yes"}}
            ]}"#,
        );

        let result = apply_generation(&project, &response);
        assert!(matches!(result, Err(AiError::MalformedResponse { .. })));
        assert!(project.components.is_empty());
    }

    #[test]
    fn non_object_props_reject_the_batch() {
        let project = Project::new("canvas");
        let response = respond(
            r#"{"components": [{"type": "card", "name": "Hero", "props": "fancy"}]}"#,
        );

        let result = apply_generation(&project, &response);
        assert!(matches!(result, Err(AiError::MalformedResponse { .. })));
    }

    #[test]
    fn empty_name_rejects_the_batch() {
        let project = Project::new("canvas");
        let response = respond(r#"{"components": [{"type": "card", "name": "  "}]}"#);

        let result = apply_generation(&project, &response);
        assert!(matches!(result, Err(AiError::MalformedResponse { .. })));
    }

    #[test]
    fn constraints_resolve_against_existing_components() {
        let mut project = Project::new("canvas");
        let anchor = Component::new(ComponentType::Card, "anchor");
        let anchor_id = anchor.id;
        project.components.push(anchor);

        let raw = format!(
            r#"{{"components": [
                {{"type": "text", "name": "Caption", "constraints": [
                    {{"kind": "spacing", "target": "{anchor_id}", "value": 16}},
                    {{"kind": "alignment", "target": "not-a-uuid"}}
                ]}}
            ]}}"#
        );
        let response = respond(&raw);

        let next = apply_generation(&project, &response)
            .ok()
            .unwrap_or_else(|| Project::new("fallback"));

        let constraints = next.components.last().map(|c| c.constraints.clone());
        let constraints = constraints.unwrap_or_default();
        assert_eq!(constraints.len(), 1);
        let first = constraints.first();
        assert!(first.is_some_and(|c| c.kind == ConstraintKind::Spacing));
        assert!(first.is_some_and(|c| c.target == Some(anchor_id)));
    }

    #[test]
    fn bindings_carry_over_verbatim() {
        let project = Project::new("canvas");
        let response = respond(
            r#"{"components": [
                {"type": "text", "name": "Greeting",
                 "bindings": {"content": "Hello ${someone.value}"}}
            ]}"#,
        );

        let next = apply_generation(&project, &response)
            .ok()
            .unwrap_or_else(|| Project::new("fallback"));

        let expected = bindings_map(&[("content", "Hello ${someone.value}")]);
        let bindings = next.components.first().map(|c| c.bindings.clone());
        assert_eq!(bindings, Some(expected));
    }

    #[test]
    fn trails_materialize_with_clamped_strength() {
        let a = ComponentId::new();
        let b = ComponentId::new();
        let raw = format!(
            r#"{{"trails": [
                {{"nodes": ["{a}", "{b}", "garbage"], "type": "data", "strength": 1.4}}
            ]}}"#
        );
        let response = respond(&raw);

        let trails = materialize_trails(&response);
        assert_eq!(trails.len(), 1);
        let trail = trails.first();
        assert!(trail.is_some_and(|t| t.nodes == vec![a, b]));
        assert!(trail.is_some_and(|t| t.strength == Decimal::ONE));
    }
}
