//! # Tree Mutations
//!
//! Every edit produces a new snapshot. The engine deep-clones the current
//! tree, locates the target in the clone by ID and edits the clone only, so
//! the input snapshot (and therefore every version held in history) is
//! never touched.
//!
//! ## Mutation Semantics
//!
//! ### AddAssumption
//! - Appends a blank node with fresh IDs, parented to the target
//!
//! ### RemoveAssumption
//! - Removes the target and its subtree from its parent's assumptions
//! - The root has no parent and cannot be removed
//!
//! ### CycleLineStyle
//! - `none → straight → dotted → dashed → none`; entering `none` flips doubling
//!
//! ### SetFieldValue / SetFieldValidity
//! - Atomic replacement of one field's text or validity

use prooftree_core::locator::{find_field_mut, find_node_mut, node_by_id};
use prooftree_core::{Field, FieldId, IdGenerator, Node, NodeId, ProofTree, Validity};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Semantic edits on a proof tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a blank assumption to a node
    AddAssumption { node_id: NodeId },

    /// Remove a node from its parent's assumptions
    RemoveAssumption { node_id: NodeId },

    /// Advance a node's line style
    CycleLineStyle { node_id: NodeId },

    /// Replace a field's text
    SetFieldValue { field_id: FieldId, value: String },

    /// Replace a field's validity status
    SetFieldValidity { field_id: FieldId, validity: Validity },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Field not found: {0}")]
    FieldNotFound(FieldId),

    #[error("The root node cannot be removed")]
    CannotRemoveRoot,
}

impl MutationError {
    /// The target no longer exists in the snapshot
    pub fn is_not_found(&self) -> bool {
        matches!(self, MutationError::NodeNotFound(_) | MutationError::FieldNotFound(_))
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// The new, independent snapshot
    pub tree: ProofTree,

    /// Node created by the mutation, if any
    pub created: Option<NodeId>,
}

impl Mutation {
    /// Apply to `current`, returning a new snapshot and leaving `current` untouched
    #[instrument(skip(current, ids), level = "debug")]
    pub fn apply(&self, current: &ProofTree, ids: &mut IdGenerator) -> Result<MutationResult, MutationError> {
        match self {
            Mutation::AddAssumption { node_id } => {
                let mut created = None;
                let tree = apply_to_node(current, node_id, |node| {
                    created = Some(node.push_assumption(ids));
                })?;
                Ok(MutationResult { tree, created })
            }

            Mutation::RemoveAssumption { node_id } => {
                let target = node_by_id(current.root(), node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let parent_id = target
                    .parent_id
                    .clone()
                    .ok_or(MutationError::CannotRemoveRoot)?;

                let tree = apply_to_node(current, &parent_id, |parent| {
                    parent.remove_assumption(node_id);
                })?;
                Ok(MutationResult { tree, created: None })
            }

            Mutation::CycleLineStyle { node_id } => {
                let tree = apply_to_node(current, node_id, Node::cycle_line_style)?;
                Ok(MutationResult { tree, created: None })
            }

            Mutation::SetFieldValue { field_id, value } => {
                let tree = apply_to_field(current, field_id, |field| {
                    field.value = value.clone();
                })?;
                Ok(MutationResult { tree, created: None })
            }

            Mutation::SetFieldValidity { field_id, validity } => {
                let tree = apply_to_field(current, field_id, |field| {
                    field.validity = validity.clone();
                })?;
                Ok(MutationResult { tree, created: None })
            }
        }
    }
}

/// Clone `current` and run `edit` on the clone of the node with ID `target`
pub fn apply_to_node<F>(current: &ProofTree, target: &NodeId, edit: F) -> Result<ProofTree, MutationError>
where
    F: FnOnce(&mut Node),
{
    let mut next = current.clone();
    let node = find_node_mut(next.root_mut(), |node| &node.id == target)
        .ok_or_else(|| MutationError::NodeNotFound(target.clone()))?;
    edit(node);
    Ok(next)
}

/// Clone `current` and run `edit` on the clone of the field with ID `target`
pub fn apply_to_field<F>(current: &ProofTree, target: &FieldId, edit: F) -> Result<ProofTree, MutationError>
where
    F: FnOnce(&mut Field),
{
    let mut next = current.clone();
    let field = find_field_mut(next.root_mut(), |field| &field.id == target)
        .ok_or_else(|| MutationError::FieldNotFound(target.clone()))?;
    edit(field);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prooftree_core::LineStyle;

    fn setup() -> (IdGenerator, ProofTree) {
        let mut ids = IdGenerator::new("mutations");
        let tree = ProofTree::blank(&mut ids);
        (ids, tree)
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::SetFieldValue {
            field_id: FieldId::new("f-1"),
            value: "A \\land B".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_assumption_leaves_input_untouched() {
        let (mut ids, tree) = setup();
        let before = tree.clone();
        let root_id = tree.root().id.clone();

        let result = Mutation::AddAssumption { node_id: root_id.clone() }
            .apply(&tree, &mut ids)
            .unwrap();

        assert_eq!(tree, before);
        assert_eq!(result.tree.root().assumptions.len(), 1);
        let child = &result.tree.root().assumptions[0];
        assert_eq!(Some(&child.id), result.created.as_ref());
        assert_eq!(child.parent_id.as_ref(), Some(&root_id));
        assert!(result.tree.check_structure().is_ok());
    }

    #[test]
    fn test_remove_assumption_keeps_sibling_order() {
        let (mut ids, tree) = setup();
        let root_id = tree.root().id.clone();

        let add = Mutation::AddAssumption { node_id: root_id.clone() };
        let one = add.apply(&tree, &mut ids).unwrap();
        let two = add.apply(&one.tree, &mut ids).unwrap();
        let three = add.apply(&two.tree, &mut ids).unwrap();

        let first = one.created.unwrap();
        let second = two.created.unwrap();
        let third = three.created.unwrap();

        let removed = Mutation::RemoveAssumption { node_id: second }
            .apply(&three.tree, &mut ids)
            .unwrap();

        let remaining: Vec<_> = removed.tree.root().assumptions.iter().map(|n| n.id.clone()).collect();
        assert_eq!(remaining, vec![first, third]);
        assert!(removed.tree.check_structure().is_ok());
    }

    #[test]
    fn test_remove_root_is_rejected() {
        let (mut ids, tree) = setup();
        let err = Mutation::RemoveAssumption { node_id: tree.root().id.clone() }
            .apply(&tree, &mut ids)
            .unwrap_err();
        assert_eq!(err, MutationError::CannotRemoveRoot);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_missing_targets_report_not_found() {
        let (mut ids, tree) = setup();

        let err = Mutation::CycleLineStyle { node_id: NodeId::new("gone") }
            .apply(&tree, &mut ids)
            .unwrap_err();
        assert_eq!(err, MutationError::NodeNotFound(NodeId::new("gone")));
        assert!(err.is_not_found());

        let err = Mutation::SetFieldValue {
            field_id: FieldId::new("gone"),
            value: "x".to_string(),
        }
        .apply(&tree, &mut ids)
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_cycle_line_style() {
        let (mut ids, tree) = setup();
        let root_id = tree.root().id.clone();
        let cycle = Mutation::CycleLineStyle { node_id: root_id };

        let dotted = cycle.apply(&tree, &mut ids).unwrap().tree;
        let dashed = cycle.apply(&dotted, &mut ids).unwrap().tree;
        let none = cycle.apply(&dashed, &mut ids).unwrap().tree;

        assert_eq!(dotted.root().line_style, LineStyle::Dotted);
        assert_eq!(dashed.root().line_style, LineStyle::Dashed);
        assert_eq!(none.root().line_style, LineStyle::None);
        assert!(none.root().is_summary());
        assert_eq!(tree.root().line_style, LineStyle::Straight);
    }

    #[test]
    fn test_set_field_value_and_validity() {
        let (mut ids, tree) = setup();
        let field_id = tree.root().conclusion.id.clone();

        let typed = Mutation::SetFieldValue {
            field_id: field_id.clone(),
            value: "\\frac{".to_string(),
        }
        .apply(&tree, &mut ids)
        .unwrap()
        .tree;
        let flagged = Mutation::SetFieldValidity {
            field_id,
            validity: Validity::Invalid("Missing close brace".to_string()),
        }
        .apply(&typed, &mut ids)
        .unwrap()
        .tree;

        assert_eq!(typed.root().conclusion.value, "\\frac{");
        assert!(typed.root().conclusion.validity.is_valid());
        assert_eq!(flagged.root().conclusion.validity.message(), Some("Missing close brace"));
        assert_eq!(tree.root().conclusion.value, "");
    }
}
