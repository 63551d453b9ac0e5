//! Scripted user actions.
//!
//! A script addresses nodes by their index path from the root (`[]` is the
//! root, `[0, 1]` the second assumption of the first assumption), since IDs
//! are only known once the session is running. Paths are resolved against
//! the current snapshot when each command runs.

use crate::session::EditSession;
use crate::validity::BraceBalanceChecker;
use crate::EditorError;
use prooftree_core::locator::node_at_path;
use prooftree_core::{FieldId, FieldRole, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditCommand {
    AddAssumption {
        #[serde(default)]
        path: Vec<usize>,
    },
    RemoveAssumption {
        #[serde(default)]
        path: Vec<usize>,
    },
    CycleLineStyle {
        #[serde(default)]
        path: Vec<usize>,
    },
    /// Focus a field, finalizing any edit in another one
    Focus {
        #[serde(default)]
        path: Vec<usize>,
        field: FieldRole,
    },
    /// Replace the focused field's text, as one keystroke would
    Type { value: String },
    Blur,
    /// Focus, type and blur in one step
    SetField {
        #[serde(default)]
        path: Vec<usize>,
        field: FieldRole,
        value: String,
    },
    /// Run the brace checker over every field
    Validate,
    Undo,
    Redo,
}

impl EditCommand {
    pub fn run(&self, session: &mut EditSession) -> Result<(), EditorError> {
        match self {
            EditCommand::AddAssumption { path } => {
                let node_id = resolve_node(session, path)?;
                session.add_assumption(&node_id);
            }
            EditCommand::RemoveAssumption { path } => {
                let node_id = resolve_node(session, path)?;
                session.remove_assumption(&node_id);
            }
            EditCommand::CycleLineStyle { path } => {
                let node_id = resolve_node(session, path)?;
                session.cycle_line_style(&node_id);
            }
            EditCommand::Focus { path, field } => {
                let field_id = resolve_field(session, path, *field)?;
                session.set_focused_field(Some(field_id));
            }
            EditCommand::Type { value } => {
                let field_id = session.focused_field().cloned().ok_or(EditorError::NothingFocused)?;
                session.set_field_value(&field_id, value);
            }
            EditCommand::Blur => {
                if let Some(field_id) = session.focused_field().cloned() {
                    session.commit_field_edit(&field_id);
                }
                session.set_focused_field(None);
            }
            EditCommand::SetField { path, field, value } => {
                let field_id = resolve_field(session, path, *field)?;
                session.set_focused_field(Some(field_id.clone()));
                session.set_field_value(&field_id, value);
                session.commit_field_edit(&field_id);
                session.set_focused_field(None);
            }
            EditCommand::Validate => {
                session.check_all_fields(&BraceBalanceChecker);
            }
            EditCommand::Undo => {
                session.undo();
            }
            EditCommand::Redo => {
                session.redo();
            }
        }
        Ok(())
    }
}

fn resolve_node(session: &EditSession, path: &[usize]) -> Result<NodeId, EditorError> {
    node_at_path(session.tree().root(), path)
        .map(|node| node.id.clone())
        .ok_or_else(|| EditorError::PathNotFound(path.to_vec()))
}

fn resolve_field(session: &EditSession, path: &[usize], role: FieldRole) -> Result<FieldId, EditorError> {
    node_at_path(session.tree().root(), path)
        .map(|node| node.field(role).id.clone())
        .ok_or_else(|| EditorError::PathNotFound(path.to_vec()))
}
