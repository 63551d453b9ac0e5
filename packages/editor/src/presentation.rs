//! # Field Presentation
//!
//! What the external renderer needs for each field: the text to typeset or
//! to put in a raw input box, and any error to show alongside it.
//!
//! A field is shown as a raw text input while it is focused or invalid, and
//! typeset otherwise. Empty fields typeset as a `?` placeholder; labels and
//! rule names are typeset as small text.
//!
//! Summary nodes hide their label; their rule name is shown as the summary
//! annotation.

use crate::focus::FocusTracker;
use prooftree_core::locator::{find_field_with_owner, node_by_id};
use prooftree_core::{FieldId, FieldRole, Node, NodeId, ProofTree};
use serde::Serialize;

/// Placeholder typeset for empty fields
pub const PLACEHOLDER: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PresentationMode {
    /// Rendered as math by the external typesetter
    Typeset,
    /// Plain text input showing the raw value
    RawInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPresentation {
    pub field_id: FieldId,
    pub role: FieldRole,
    pub mode: PresentationMode,
    /// Raw field value, for the input box
    pub value: String,
    /// Math source to hand to the typesetter
    pub tex: String,
    pub error: Option<String>,
}

/// Presentation of one field in `tree`, or `None` if it no longer exists
pub fn present_field(tree: &ProofTree, focus: &FocusTracker, field_id: &FieldId) -> Option<FieldPresentation> {
    let (owner, role, _) = find_field_with_owner(tree.root(), |field| &field.id == field_id)?;
    Some(build(owner, role, focus))
}

/// Presentations of a node's visible fields, in display order
pub fn present_node(tree: &ProofTree, focus: &FocusTracker, node_id: &NodeId) -> Vec<FieldPresentation> {
    let Some(node) = node_by_id(tree.root(), node_id) else {
        return Vec::new();
    };

    FieldRole::ALL
        .into_iter()
        .filter(|role| is_visible(node, *role))
        .map(|role| build(node, role, focus))
        .collect()
}

/// Summary nodes do not show a label
pub fn is_visible(node: &Node, role: FieldRole) -> bool {
    !(node.is_summary() && role == FieldRole::Label)
}

fn build(node: &Node, role: FieldRole, focus: &FocusTracker) -> FieldPresentation {
    let field = node.field(role);
    let raw = focus.is_focused(&field.id) || !field.validity.is_valid();

    FieldPresentation {
        field_id: field.id.clone(),
        role,
        mode: if raw {
            PresentationMode::RawInput
        } else {
            PresentationMode::Typeset
        },
        value: field.value.clone(),
        tex: typeset_source(&field.value, role),
        error: field.validity.message().map(str::to_string),
    }
}

/// Math source for a field value, with placeholder and small-text wrapping
pub fn typeset_source(value: &str, role: FieldRole) -> String {
    let shown = if value.is_empty() { PLACEHOLDER } else { value };
    if role.is_small_text() {
        format!("\\small{{\\text{{{}}}}}", shown)
    } else {
        shown.to_string()
    }
}
