//! Core entity structs for the Atelier project engine.
//!
//! Covers [`Project`], [`Component`], [`Constraint`], [`Snapshot`],
//! [`Problem`], [`Organism`], and [`Trail`]. Geometry and all scalar
//! scores use [`Decimal`] -- the engine never compares floats.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ComponentType, ConstraintKind, ProblemKind, Severity, TrailKind};
use crate::ids::{ComponentId, OrganismId, ProblemId, ProjectId, SnapshotId, TrailId};
use crate::props::ComponentProps;

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A mutable project: an ordered collection of components.
///
/// Component ids are unique within a project. Ordering is insertion order
/// and display-significant, but carries no other semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Human-readable project name.
    pub name: String,
    /// Components in insertion order.
    pub components: Vec<Component>,
    /// When the project was last replaced through the store.
    pub last_modified: DateTime<Utc>,
}

impl Project {
    /// Create an empty project with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.to_owned(),
            components: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// Look up a component by id.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Whether a component with the given id exists.
    pub fn has_component(&self, id: ComponentId) -> bool {
        self.component(id).is_some()
    }

    /// The set of all component ids in this project.
    pub fn component_ids(&self) -> BTreeSet<ComponentId> {
        self.components.iter().map(|c| c.id).collect()
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A single canvas component.
///
/// `width` and `height` are positive by construction; `x` and `y` may go
/// negative (a dragged-off-canvas component), which the problem detector
/// flags rather than rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Component {
    /// Unique component identifier.
    pub id: ComponentId,
    /// The component kind.
    pub component_type: ComponentType,
    /// Display name shown in the layer list.
    pub name: String,
    /// Typed properties for this kind.
    pub props: ComponentProps,
    /// Horizontal canvas position.
    #[ts(as = "String")]
    pub x: Decimal,
    /// Vertical canvas position.
    #[ts(as = "String")]
    pub y: Decimal,
    /// Component width (always positive).
    #[ts(as = "String")]
    pub width: Decimal,
    /// Component height (always positive).
    #[ts(as = "String")]
    pub height: Decimal,
    /// Property bindings: property name -> binding expression.
    pub bindings: BTreeMap<String, String>,
    /// Layout constraints in declaration order.
    pub constraints: Vec<Constraint>,
}

/// Default width for a freshly created component.
fn default_width() -> Decimal {
    Decimal::from(120)
}

/// Default height for a freshly created component.
fn default_height() -> Decimal {
    Decimal::from(40)
}

impl Component {
    /// Create a component of the given kind at the origin with default
    /// geometry and an empty property set.
    pub fn new(component_type: ComponentType, name: &str) -> Self {
        Self {
            id: ComponentId::new(),
            component_type,
            name: name.to_owned(),
            props: ComponentProps::empty(component_type),
            x: Decimal::ZERO,
            y: Decimal::ZERO,
            width: default_width(),
            height: default_height(),
            bindings: BTreeMap::new(),
            constraints: Vec::new(),
        }
    }

    /// Move the component to the given position.
    #[must_use]
    pub fn at(mut self, x: Decimal, y: Decimal) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Resize the component. Non-positive dimensions are ignored so the
    /// `width, height > 0` invariant holds by construction.
    #[must_use]
    pub fn sized(mut self, width: Decimal, height: Decimal) -> Self {
        if width > Decimal::ZERO {
            self.width = width;
        }
        if height > Decimal::ZERO {
            self.height = height;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Constraint
// ---------------------------------------------------------------------------

/// A declarative layout constraint attached to a component.
///
/// Constraints referencing a target component by id tolerate dangling
/// references: the solver treats them as no-ops, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Constraint {
    /// What the constraint does.
    pub kind: ConstraintKind,
    /// The component this constraint is relative to, when the kind needs one.
    pub target: Option<ComponentId>,
    /// Kind-specific scalar (gap, width, or aspect ratio).
    #[ts(as = "String")]
    pub value: Decimal,
    /// Inactive constraints are skipped by the solver.
    pub active: bool,
}

impl Constraint {
    /// A spacing constraint: sit `value` units right of `target`.
    pub const fn spacing(target: ComponentId, value: Decimal) -> Self {
        Self {
            kind: ConstraintKind::Spacing,
            target: Some(target),
            value,
            active: true,
        }
    }

    /// An alignment constraint: share the target's top edge.
    pub const fn alignment(target: ComponentId) -> Self {
        Self {
            kind: ConstraintKind::Alignment,
            target: Some(target),
            value: Decimal::ZERO,
            active: true,
        }
    }

    /// A size constraint: fix the width to `value`.
    pub const fn size(value: Decimal) -> Self {
        Self {
            kind: ConstraintKind::Size,
            target: None,
            value,
            active: true,
        }
    }

    /// An aspect constraint: derive height from width by the ratio `value`.
    pub const fn aspect(value: Decimal) -> Self {
        Self {
            kind: ConstraintKind::Aspect,
            target: None,
            value,
            active: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// An immutable, timestamped copy of a project's component list.
///
/// Snapshots are created by the history manager and never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// Unique snapshot identifier.
    pub id: SnapshotId,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Deep copy of the project's components at commit time.
    pub components: Vec<Component>,
    /// Human-readable description of the change this snapshot captures.
    pub description: String,
    /// Whether this snapshot came from the auto-save cadence.
    pub auto: bool,
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// A detected structural, accessibility, or performance issue.
///
/// Problems are derived data: regenerated wholesale on every scan and
/// never mutated in place or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Problem {
    /// Unique problem identifier (fresh on every scan).
    pub id: ProblemId,
    /// Category of the finding.
    pub kind: ProblemKind,
    /// How pressing the finding is.
    pub severity: Severity,
    /// Short human-readable title.
    pub title: String,
    /// Longer explanation of what was found.
    pub description: String,
    /// The component the finding is attached to, if any.
    pub component_id: Option<ComponentId>,
    /// Whether the detector's auto-fix can resolve this finding.
    pub auto_fixable: bool,
    /// Suggested manual remediation, when one exists.
    pub suggestion: Option<String>,
    /// When the finding was produced.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Organism
// ---------------------------------------------------------------------------

/// A simulated enrichment agent.
///
/// Organisms carry a running question/answer log and a scalar enrichment
/// score in `[0, 1]` that gates replication and deletion. `passes`
/// increments on a parent when it replicates; `receives` increments on a
/// child when it is created from a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Organism {
    /// Unique organism identifier.
    pub id: OrganismId,
    /// Generation number (1 for directly created organisms).
    pub generation: u32,
    /// Questions asked so far, oldest first.
    pub questions: Vec<String>,
    /// Answers received so far, parallel to `questions`.
    pub answers: Vec<String>,
    /// Enrichment score in `[0, 1]`.
    #[ts(as = "String")]
    pub enrichment: Decimal,
    /// Whether the organism participates in the population.
    pub active: bool,
    /// The parent this organism was replicated from, if any.
    pub parent_id: Option<OrganismId>,
    /// Children replicated from this organism. May contain ids of
    /// organisms that have since been deleted.
    pub child_ids: BTreeSet<OrganismId>,
    /// Number of times this organism has replicated.
    pub passes: u32,
    /// Number of inheritances received at creation (1 for children, 0 for
    /// directly created organisms).
    pub receives: u32,
    /// When the organism was created.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Trail
// ---------------------------------------------------------------------------

/// An AI-proposed relationship path across components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Trail {
    /// Unique trail identifier.
    pub id: TrailId,
    /// The components forming the path, in order.
    pub nodes: Vec<ComponentId>,
    /// What kind of relationship the trail encodes.
    pub kind: TrailKind,
    /// Relationship strength in `[0, 1]`.
    #[ts(as = "String")]
    pub strength: Decimal,
}
