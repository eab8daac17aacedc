//! Placeholder extraction and validation.
//!
//! Extraction is deliberately tolerant: a malformed expression is flagged,
//! but every well-formed `${id.property}` reference found before the first
//! error is still returned. Validation is stricter than extraction -- on
//! top of brace balance it rejects references to component ids that do not
//! exist in the current project. `parse_dependencies` stays tolerant so
//! dependency extraction is unaffected by the stricter write path.

use std::collections::BTreeSet;

use crate::error::BindingError;

/// Opening delimiter of a binding placeholder.
const OPEN: &str = "${";

/// Closing delimiter of a binding placeholder.
const CLOSE: char = '}';

/// A single `${component.property}` reference inside an expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BindingRef {
    /// The referenced component id, as written in the expression.
    pub component: String,
    /// The referenced property name.
    pub property: String,
}

/// The result of scanning an expression for placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedExpression {
    /// Well-formed references, in order of appearance.
    pub references: Vec<BindingRef>,
    /// Whether the expression contained unbalanced or empty placeholders.
    pub malformed: bool,
}

/// Scan an expression for `${component.property}` placeholders.
///
/// Never fails: unbalanced syntax sets the `malformed` flag and scanning
/// stops at the first unterminated placeholder, keeping everything
/// extracted up to that point. A balanced placeholder whose content is
/// not `id.property` (missing dot, empty halves) also sets the flag but
/// scanning continues past it.
pub fn parse_references(expression: &str) -> ParsedExpression {
    let mut parsed = ParsedExpression::default();
    let mut remainder = expression;

    while let Some(start) = remainder.find(OPEN) {
        let Some(after_open) = remainder.get(start.saturating_add(OPEN.len())..) else {
            parsed.malformed = true;
            break;
        };

        let Some(close) = after_open.find(CLOSE) else {
            // Unterminated placeholder: flag and stop.
            parsed.malformed = true;
            break;
        };

        let inner = after_open.get(..close).unwrap_or("");
        match inner.split_once('.') {
            Some((component, property)) if !component.is_empty() && !property.is_empty() => {
                parsed.references.push(BindingRef {
                    component: component.to_owned(),
                    property: property.to_owned(),
                });
            }
            _ => {
                // Balanced but unusable content: flag and keep scanning.
                parsed.malformed = true;
            }
        }

        remainder = after_open.get(close.saturating_add(1)..).unwrap_or("");
    }

    parsed
}

/// Extract the set of component ids an expression depends on.
///
/// Malformed expressions still yield whatever well-formed references were
/// found before the first error; this function never raises.
pub fn parse_dependencies(expression: &str) -> BTreeSet<String> {
    parse_references(expression)
        .references
        .into_iter()
        .map(|r| r.component)
        .collect()
}

/// Validate an expression against the current project's component ids.
///
/// # Errors
///
/// Returns [`BindingError::MalformedExpression`] for unbalanced or empty
/// placeholders, and [`BindingError::UnknownComponent`] when a referenced
/// id does not resolve.
pub fn validate(
    expression: &str,
    known_component_ids: &BTreeSet<String>,
) -> Result<(), BindingError> {
    let parsed = parse_references(expression);

    if parsed.malformed {
        return Err(BindingError::MalformedExpression {
            expression: expression.to_owned(),
        });
    }

    for reference in &parsed.references {
        if !known_component_ids.contains(&reference.component) {
            return Err(BindingError::UnknownComponent {
                id: reference.component.clone(),
            });
        }
    }

    Ok(())
}
