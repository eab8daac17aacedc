//! Per-component-type property schemas.
//!
//! Properties are a closed, typed schema keyed by [`ComponentType`] rather
//! than an open `string -> any` bag. Genuinely free-form extension data
//! (plugin settings, design tokens) goes into the `extra` map that every
//! variant carries.
//!
//! Two properties are shared by every kind and matter to the problem
//! detector: `role` (ARIA role) and `label` (accessible name). The
//! accessors on [`ComponentProps`] expose them uniformly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::enums::ComponentType;

// ---------------------------------------------------------------------------
// Per-kind schemas
// ---------------------------------------------------------------------------

/// Properties of a [`ComponentType::Button`] component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ButtonProps {
    /// Accessible name shown on (or read for) the button.
    pub label: Option<String>,
    /// ARIA role override.
    pub role: Option<String>,
    /// Visual variant (`primary`, `secondary`, `ghost`, ...).
    pub variant: Option<String>,
    /// Whether the button is rendered disabled.
    pub disabled: Option<bool>,
    /// Free-form extension data.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Properties of a [`ComponentType::Input`] component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InputProps {
    /// Accessible name for the field.
    pub label: Option<String>,
    /// ARIA role override.
    pub role: Option<String>,
    /// Placeholder text shown while empty.
    pub placeholder: Option<String>,
    /// Input kind (`text`, `email`, `number`, ...).
    pub input_kind: Option<String>,
    /// Whether the field is required.
    pub required: Option<bool>,
    /// Free-form extension data.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Properties of a [`ComponentType::Text`] component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TextProps {
    /// Accessible name, when the visible content is not self-describing.
    pub label: Option<String>,
    /// ARIA role override.
    pub role: Option<String>,
    /// The text content.
    pub content: Option<String>,
    /// Horizontal alignment (`left`, `center`, `right`).
    pub align: Option<String>,
    /// Free-form extension data.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Properties of a [`ComponentType::Card`] component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CardProps {
    /// Accessible name for the card region.
    pub label: Option<String>,
    /// ARIA role override.
    pub role: Option<String>,
    /// Heading shown in the card header.
    pub title: Option<String>,
    /// Whether the card renders with elevation (shadow).
    pub elevated: Option<bool>,
    /// Free-form extension data.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Properties of a [`ComponentType::Container`] component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContainerProps {
    /// Accessible name for the grouping.
    pub label: Option<String>,
    /// ARIA role override.
    pub role: Option<String>,
    /// Layout direction (`row` or `column`).
    pub direction: Option<String>,
    /// Gap between children, in canvas units.
    pub gap: Option<u32>,
    /// Free-form extension data.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Tagged schema
// ---------------------------------------------------------------------------

/// The typed property schema of a component, tagged by its kind.
///
/// The variant always matches the owning component's
/// [`Component::component_type`]; [`ComponentProps::empty`] is the only
/// constructor the engine uses, which keeps the pairing correct.
///
/// [`Component::component_type`]: crate::structs::Component::component_type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum ComponentProps {
    /// Button properties.
    Button(ButtonProps),
    /// Input properties.
    Input(InputProps),
    /// Text properties.
    Text(TextProps),
    /// Card properties.
    Card(CardProps),
    /// Container properties.
    Container(ContainerProps),
}

impl ComponentProps {
    /// Create an empty property set for the given component kind.
    pub fn empty(kind: ComponentType) -> Self {
        match kind {
            ComponentType::Button => Self::Button(ButtonProps::default()),
            ComponentType::Input => Self::Input(InputProps::default()),
            ComponentType::Text => Self::Text(TextProps::default()),
            ComponentType::Card => Self::Card(CardProps::default()),
            ComponentType::Container => Self::Container(ContainerProps::default()),
        }
    }

    /// The component kind this schema belongs to.
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::Button(_) => ComponentType::Button,
            Self::Input(_) => ComponentType::Input,
            Self::Text(_) => ComponentType::Text,
            Self::Card(_) => ComponentType::Card,
            Self::Container(_) => ComponentType::Container,
        }
    }

    /// The ARIA role, if set.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Button(p) => p.role.as_deref(),
            Self::Input(p) => p.role.as_deref(),
            Self::Text(p) => p.role.as_deref(),
            Self::Card(p) => p.role.as_deref(),
            Self::Container(p) => p.role.as_deref(),
        }
    }

    /// The accessible label, if set.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Button(p) => p.label.as_deref(),
            Self::Input(p) => p.label.as_deref(),
            Self::Text(p) => p.label.as_deref(),
            Self::Card(p) => p.label.as_deref(),
            Self::Container(p) => p.label.as_deref(),
        }
    }

    /// Set the ARIA role.
    pub fn set_role(&mut self, role: &str) {
        let slot = match self {
            Self::Button(p) => &mut p.role,
            Self::Input(p) => &mut p.role,
            Self::Text(p) => &mut p.role,
            Self::Card(p) => &mut p.role,
            Self::Container(p) => &mut p.role,
        };
        *slot = Some(role.to_owned());
    }

    /// Set the accessible label.
    pub fn set_label(&mut self, label: &str) {
        let slot = match self {
            Self::Button(p) => &mut p.label,
            Self::Input(p) => &mut p.label,
            Self::Text(p) => &mut p.label,
            Self::Card(p) => &mut p.label,
            Self::Container(p) => &mut p.label,
        };
        *slot = Some(label.to_owned());
    }

    /// Access the free-form extension map.
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        match self {
            Self::Button(p) => &p.extra,
            Self::Input(p) => &p.extra,
            Self::Text(p) => &p.extra,
            Self::Card(p) => &p.extra,
            Self::Container(p) => &p.extra,
        }
    }

    /// Mutable access to the free-form extension map.
    pub const fn extra_mut(&mut self) -> &mut BTreeMap<String, Value> {
        match self {
            Self::Button(p) => &mut p.extra,
            Self::Input(p) => &mut p.extra,
            Self::Text(p) => &mut p.extra,
            Self::Card(p) => &mut p.extra,
            Self::Container(p) => &mut p.extra,
        }
    }

    /// Number of declared properties: typed fields that are set, plus
    /// every entry in the extension map.
    pub fn declared_count(&self) -> usize {
        let typed = match self {
            Self::Button(p) => count_set(&[
                p.label.is_some(),
                p.role.is_some(),
                p.variant.is_some(),
                p.disabled.is_some(),
            ]),
            Self::Input(p) => count_set(&[
                p.label.is_some(),
                p.role.is_some(),
                p.placeholder.is_some(),
                p.input_kind.is_some(),
                p.required.is_some(),
            ]),
            Self::Text(p) => count_set(&[
                p.label.is_some(),
                p.role.is_some(),
                p.content.is_some(),
                p.align.is_some(),
            ]),
            Self::Card(p) => count_set(&[
                p.label.is_some(),
                p.role.is_some(),
                p.title.is_some(),
                p.elevated.is_some(),
            ]),
            Self::Container(p) => count_set(&[
                p.label.is_some(),
                p.role.is_some(),
                p.direction.is_some(),
                p.gap.is_some(),
            ]),
        };
        typed.saturating_add(self.extra().len())
    }
}

/// Count how many of the given flags are set.
fn count_set(flags: &[bool]) -> usize {
    flags.iter().filter(|&&set| set).count()
}
