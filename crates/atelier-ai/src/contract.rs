//! The request and response shapes exchanged with the generator.
//!
//! The response types deserialize defensively: only `type` and `name` are
//! required per proposed component, everything else defaults. What a
//! proposal may NOT do is carry a field of the wrong shape; that fails
//! deserialization and rejects the batch.

use std::collections::BTreeMap;

use atelier_types::{ComponentId, ComponentType, ConstraintKind, ProjectId, TrailKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request side
// ---------------------------------------------------------------------------

/// Project context attached to every generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContext {
    /// The project being edited.
    pub project_id: ProjectId,
    /// How many components the project currently has.
    pub component_count: usize,
    /// The component the user has selected, if any.
    #[serde(default)]
    pub selected_component_id: Option<ComponentId>,
    /// Short summaries of recent user interactions with the canvas.
    #[serde(default)]
    pub recent_interaction_summaries: Vec<String>,
}

/// A natural-language generation request plus its project context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user's request, verbatim.
    pub free_text_request: String,
    /// Context the generator needs to propose coherent additions.
    pub project_context: ProjectContext,
}

// ---------------------------------------------------------------------------
// Response side
// ---------------------------------------------------------------------------

/// A constraint the generator proposes on a new component.
///
/// The target is a raw string because the generator can only reference
/// components by the ids it saw in the request context; resolution
/// happens at apply time.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposedConstraint {
    /// Which geometric relationship to establish.
    pub kind: ConstraintKind,
    /// Id of the component this constraint anchors to, as written.
    #[serde(default)]
    pub target: Option<String>,
    /// Kind-specific scalar parameter.
    #[serde(default)]
    pub value: Decimal,
}

/// One component the generator proposes to add.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposedComponent {
    /// The component kind.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Human-readable name.
    pub name: String,
    /// Kind-specific properties, as a raw object; typed at apply time.
    #[serde(default)]
    pub props: Option<serde_json::Value>,
    /// Property binding expressions, keyed by property name.
    #[serde(default)]
    pub bindings: Option<BTreeMap<String, String>>,
    /// Constraints anchoring the component to existing ones.
    #[serde(default)]
    pub constraints: Option<Vec<ProposedConstraint>>,
    /// Free-form generator annotations; ignored by the engine.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// A relationship path the generator proposes across components.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposedTrail {
    /// Component ids forming the path, as written.
    pub nodes: Vec<String>,
    /// What kind of relationship the trail encodes.
    #[serde(rename = "type")]
    pub kind: TrailKind,
    /// Relationship strength in `[0, 1]`; out-of-range values are clamped.
    #[serde(default = "default_strength")]
    pub strength: Decimal,
}

/// The full structured response from the generator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationResponse {
    /// Components to add to the project.
    #[serde(default)]
    pub components: Vec<ProposedComponent>,
    /// Relationship trails across components.
    #[serde(default)]
    pub trails: Vec<ProposedTrail>,
    /// The generator's reasoning, logged for debugging.
    #[serde(default)]
    pub reasoning: Option<String>,
    /// Optimization remarks surfaced to the user.
    #[serde(default)]
    pub optimizations: Vec<String>,
    /// Follow-up suggestions surfaced to the user.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

fn default_strength() -> Decimal {
    // Midpoint of the valid range.
    Decimal::new(5, 1)
}
