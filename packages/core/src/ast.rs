//! # Proof Tree Model
//!
//! A proof tree is a recursive structure of inference steps. Each [`Node`]
//! owns its assumption subtrees, three editable [`Field`]s and the style of
//! its inference line.
//!
//! Parent linkage is stored as a [`NodeId`] rather than a reference, so a
//! snapshot is a plain owned value: cloning a [`ProofTree`] yields a fully
//! independent copy with the same identifiers.

use crate::error::StructureError;
use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque field identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of the external math checker for a field's current text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "camelCase")]
pub enum Validity {
    #[default]
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid(message) => Some(message),
        }
    }
}

/// A single editable text value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub value: String,
    pub validity: Validity,
}

impl Field {
    /// Empty, valid field with a fresh ID
    pub fn blank(ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_field_id(),
            value: String::new(),
            validity: Validity::Valid,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Which of a node's three fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldRole {
    Label,
    RuleName,
    Conclusion,
}

impl FieldRole {
    /// Fixed order in which a node's fields are visited
    pub const ALL: [FieldRole; 3] = [FieldRole::Label, FieldRole::RuleName, FieldRole::Conclusion];

    /// Label and rule name are typeset in small text
    pub fn is_small_text(self) -> bool {
        !matches!(self, FieldRole::Conclusion)
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRole::Label => write!(f, "label"),
            FieldRole::RuleName => write!(f, "rule name"),
            FieldRole::Conclusion => write!(f, "conclusion"),
        }
    }
}

/// Inference line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    None,
    #[default]
    Straight,
    Dotted,
    Dashed,
}

impl LineStyle {
    pub fn next(self) -> Self {
        match self {
            LineStyle::None => LineStyle::Straight,
            LineStyle::Straight => LineStyle::Dotted,
            LineStyle::Dotted => LineStyle::Dashed,
            LineStyle::Dashed => LineStyle::None,
        }
    }
}

/// One inference step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub assumptions: Vec<Node>,
    pub label: Field,
    pub rule_name: Field,
    pub conclusion: Field,
    pub line_style: LineStyle,
    pub line_doubled: bool,
}

impl Node {
    /// Create a node with blank fields, a straight single line and no assumptions
    pub fn blank(ids: &mut IdGenerator, parent_id: Option<NodeId>) -> Self {
        Self {
            id: ids.next_node_id(),
            parent_id,
            assumptions: Vec::new(),
            label: Field::blank(ids),
            rule_name: Field::blank(ids),
            conclusion: Field::blank(ids),
            line_style: LineStyle::Straight,
            line_doubled: false,
        }
    }

    /// A doubled line with no stroke is rendered as a proof summary
    pub fn is_summary(&self) -> bool {
        self.line_doubled && self.line_style == LineStyle::None
    }

    pub fn is_leaf(&self) -> bool {
        self.assumptions.is_empty()
    }

    pub fn field(&self, role: FieldRole) -> &Field {
        match role {
            FieldRole::Label => &self.label,
            FieldRole::RuleName => &self.rule_name,
            FieldRole::Conclusion => &self.conclusion,
        }
    }

    /// Role of the field with the given ID, if it belongs to this node
    pub fn role_of(&self, field_id: &FieldId) -> Option<FieldRole> {
        FieldRole::ALL
            .into_iter()
            .find(|role| &self.field(*role).id == field_id)
    }

    /// Advance the line style; entering `none` flips the doubled flag
    pub fn cycle_line_style(&mut self) {
        self.line_style = self.line_style.next();
        if self.line_style == LineStyle::None {
            self.line_doubled = !self.line_doubled;
        }
    }

    /// Append a blank assumption and return its ID
    pub fn push_assumption(&mut self, ids: &mut IdGenerator) -> NodeId {
        let child = Node::blank(ids, Some(self.id.clone()));
        let child_id = child.id.clone();
        self.assumptions.push(child);
        child_id
    }

    /// Remove the direct assumption with the given ID together with its subtree
    pub fn remove_assumption(&mut self, child_id: &NodeId) -> Option<Node> {
        let index = self.assumptions.iter().position(|child| &child.id == child_id)?;
        Some(self.assumptions.remove(index))
    }

    /// Re-point every descendant's parent ID at the node that contains it
    pub fn relink_parents(&mut self) {
        for child in &mut self.assumptions {
            child.parent_id = Some(self.id.clone());
            child.relink_parents();
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        1 + self.assumptions.iter().map(Node::subtree_size).sum::<usize>()
    }
}

/// One complete version of the proof tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofTree {
    root: Node,
}

impl ProofTree {
    /// A tree consisting of a single blank root
    pub fn blank(ids: &mut IdGenerator) -> Self {
        Self {
            root: Node::blank(ids, None),
        }
    }

    /// Adopt `root` as a tree, clearing its parent and relinking all descendants
    pub fn from_root(mut root: Node) -> Self {
        root.parent_id = None;
        root.relink_parents();
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    /// All node IDs in depth-first pre-order
    pub fn node_ids(&self) -> Vec<&NodeId> {
        let mut out = Vec::new();
        collect_node_ids(&self.root, &mut out);
        out
    }

    /// All field IDs in depth-first pre-order (label, rule name, conclusion per node)
    pub fn field_ids(&self) -> Vec<&FieldId> {
        let mut out = Vec::new();
        collect_field_ids(&self.root, &mut out);
        out
    }

    /// Verify ID uniqueness and parent-link consistency
    pub fn check_structure(&self) -> Result<(), StructureError> {
        if let Some(parent) = &self.root.parent_id {
            return Err(StructureError::RootHasParent(parent.clone()));
        }

        let mut node_ids = HashSet::new();
        for id in self.node_ids() {
            if !node_ids.insert(id) {
                return Err(StructureError::DuplicateNodeId(id.clone()));
            }
        }

        let mut field_ids = HashSet::new();
        for id in self.field_ids() {
            if !field_ids.insert(id) {
                return Err(StructureError::DuplicateFieldId(id.clone()));
            }
        }

        check_parent_links(&self.root)
    }
}

fn collect_node_ids<'a>(node: &'a Node, out: &mut Vec<&'a NodeId>) {
    out.push(&node.id);
    for child in &node.assumptions {
        collect_node_ids(child, out);
    }
}

fn collect_field_ids<'a>(node: &'a Node, out: &mut Vec<&'a FieldId>) {
    for role in FieldRole::ALL {
        out.push(&node.field(role).id);
    }
    for child in &node.assumptions {
        collect_field_ids(child, out);
    }
}

fn check_parent_links(node: &Node) -> Result<(), StructureError> {
    for child in &node.assumptions {
        if child.parent_id.as_ref() != Some(&node.id) {
            return Err(StructureError::ParentMismatch {
                node: child.id.clone(),
                expected: node.id.clone(),
                found: child.parent_id.clone(),
            });
        }
        check_parent_links(child)?;
    }
    Ok(())
}
