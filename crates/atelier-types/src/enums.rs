//! Enumeration types for the Atelier project engine.
//!
//! Component kinds, layout constraint kinds, problem classification, and
//! trail kinds. All enums serialize as `snake_case` strings so the front
//! end and any persisted records stay readable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Component types
// ---------------------------------------------------------------------------

/// The kind of a canvas component.
///
/// The set is closed: each kind carries its own typed property schema
/// (see [`ComponentProps`]).
///
/// [`ComponentProps`]: crate::props::ComponentProps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// A clickable button.
    Button,
    /// A text input field.
    Input,
    /// A static text block.
    Text,
    /// A bordered content card.
    Card,
    /// A layout container holding other components visually.
    Container,
}

impl core::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Text => "text",
            Self::Card => "card",
            Self::Container => "container",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Constraint kinds
// ---------------------------------------------------------------------------

/// The kind of a declarative layout constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Place the component `value` units to the right of the target's
    /// right edge. Requires a target.
    Spacing,
    /// Align the component's top edge with the target's. Requires a target.
    Alignment,
    /// Set the component's width to `value`. No target needed.
    Size,
    /// Derive the component's height from its width by the ratio `value`.
    /// No target needed.
    Aspect,
}

// ---------------------------------------------------------------------------
// Problem classification
// ---------------------------------------------------------------------------

/// Category of a detected problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// A structural error that should be fixed before shipping.
    Error,
    /// A likely mistake that does not break the project.
    Warning,
    /// Informational finding.
    Info,
    /// An accessibility gap (missing roles, labels, contrast).
    Accessibility,
    /// A performance concern (oversized prop bags, deep nesting).
    Performance,
    /// A non-binding improvement suggestion.
    Suggestion,
}

/// Severity of a detected problem.
///
/// Variants are declared in ascending order so the derived [`Ord`] matches
/// the presentation sort (`Critical > High > Medium > Low`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic or advisory.
    Low,
    /// Worth fixing soon.
    Medium,
    /// Should be fixed before the next export.
    High,
    /// Blocks a usable result.
    Critical,
}

// ---------------------------------------------------------------------------
// Trail kinds
// ---------------------------------------------------------------------------

/// The kind of an AI-proposed trail linking components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum TrailKind {
    /// Components connected by a data dependency.
    Data,
    /// Components forming a navigation path.
    Navigation,
    /// Components grouped by visual relationship.
    Visual,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn component_type_serializes_snake_case() {
        let json = serde_json::to_string(&ComponentType::Container).ok();
        assert_eq!(json.as_deref(), Some("\"container\""));
    }

    #[test]
    fn component_type_display_matches_serde() {
        for kind in [
            ComponentType::Button,
            ComponentType::Input,
            ComponentType::Text,
            ComponentType::Card,
            ComponentType::Container,
        ] {
            let json = serde_json::to_string(&kind).ok().unwrap_or_default();
            assert_eq!(format!("\"{kind}\""), json);
        }
    }

    #[test]
    fn constraint_kind_roundtrip() {
        let json = serde_json::to_string(&ConstraintKind::Aspect).ok().unwrap_or_default();
        let back: Result<ConstraintKind, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(ConstraintKind::Aspect));
    }
}
