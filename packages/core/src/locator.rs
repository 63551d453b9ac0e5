//! # Locator
//!
//! Depth-first pre-order search over a tree snapshot. A node is tested
//! before its assumptions, and assumptions are visited in sequence order.
//! For fields, each node's label, rule name and conclusion are tested in
//! that order before descending.
//!
//! A miss is an ordinary outcome: callers holding IDs from an older
//! snapshot must expect the target to have disappeared.

use crate::ast::{Field, FieldId, FieldRole, Node, NodeId};

/// First node satisfying `predicate`
pub fn find_node<'a, P>(root: &'a Node, predicate: P) -> Option<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    find_node_in(root, &predicate)
}

fn find_node_in<'a, P>(node: &'a Node, predicate: &P) -> Option<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    if predicate(node) {
        return Some(node);
    }
    node.assumptions
        .iter()
        .find_map(|child| find_node_in(child, predicate))
}

/// First node satisfying `predicate`, mutably
pub fn find_node_mut<'a, P>(root: &'a mut Node, predicate: P) -> Option<&'a mut Node>
where
    P: Fn(&Node) -> bool,
{
    find_node_mut_in(root, &predicate)
}

fn find_node_mut_in<'a, P>(node: &'a mut Node, predicate: &P) -> Option<&'a mut Node>
where
    P: Fn(&Node) -> bool,
{
    if predicate(&*node) {
        return Some(node);
    }
    node.assumptions
        .iter_mut()
        .find_map(|child| find_node_mut_in(child, predicate))
}

/// First field satisfying `predicate`, with the node that owns it and its role
pub fn find_field_with_owner<'a, P>(root: &'a Node, predicate: P) -> Option<(&'a Node, FieldRole, &'a Field)>
where
    P: Fn(&Field) -> bool,
{
    find_field_in(root, &predicate)
}

fn find_field_in<'a, P>(node: &'a Node, predicate: &P) -> Option<(&'a Node, FieldRole, &'a Field)>
where
    P: Fn(&Field) -> bool,
{
    for role in FieldRole::ALL {
        let field = node.field(role);
        if predicate(field) {
            return Some((node, role, field));
        }
    }
    node.assumptions
        .iter()
        .find_map(|child| find_field_in(child, predicate))
}

/// First field satisfying `predicate`
pub fn find_field<'a, P>(root: &'a Node, predicate: P) -> Option<&'a Field>
where
    P: Fn(&Field) -> bool,
{
    find_field_with_owner(root, predicate).map(|(_, _, field)| field)
}

/// First field satisfying `predicate`, mutably
pub fn find_field_mut<'a, P>(root: &'a mut Node, predicate: P) -> Option<&'a mut Field>
where
    P: Fn(&Field) -> bool,
{
    find_field_mut_in(root, &predicate)
}

fn find_field_mut_in<'a, P>(node: &'a mut Node, predicate: &P) -> Option<&'a mut Field>
where
    P: Fn(&Field) -> bool,
{
    let Node {
        label,
        rule_name,
        conclusion,
        assumptions,
        ..
    } = node;

    if predicate(&*label) {
        return Some(label);
    }
    if predicate(&*rule_name) {
        return Some(rule_name);
    }
    if predicate(&*conclusion) {
        return Some(conclusion);
    }
    assumptions
        .iter_mut()
        .find_map(|child| find_field_mut_in(child, predicate))
}

pub fn node_by_id<'a>(root: &'a Node, id: &NodeId) -> Option<&'a Node> {
    find_node(root, |node| &node.id == id)
}

pub fn field_by_id<'a>(root: &'a Node, id: &FieldId) -> Option<&'a Field> {
    find_field(root, |field| &field.id == id)
}

/// Follow assumption indices from `root`; an empty path is the root itself
pub fn node_at_path<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    path.iter()
        .try_fold(root, |node, index| node.assumptions.get(*index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::IdGenerator;
    use crate::ast::ProofTree;
    use std::cell::RefCell;

    fn sample_tree() -> ProofTree {
        // root
        // ├── a
        // │   └── a0
        // └── b
        let mut ids = IdGenerator::new("locator");
        let mut tree = ProofTree::blank(&mut ids);
        let root = tree.root_mut();
        root.conclusion.value = "root".to_string();
        root.push_assumption(&mut ids);
        root.push_assumption(&mut ids);
        root.assumptions[0].conclusion.value = "a".to_string();
        root.assumptions[1].conclusion.value = "b".to_string();
        root.assumptions[0].push_assumption(&mut ids);
        root.assumptions[0].assumptions[0].conclusion.value = "a0".to_string();
        tree
    }

    #[test]
    fn test_find_node_preorder() {
        let tree = sample_tree();
        let visited = RefCell::new(Vec::new());
        let found = find_node(tree.root(), |node| {
            visited.borrow_mut().push(node.conclusion.value.clone());
            false
        });

        assert!(found.is_none());
        assert_eq!(visited.into_inner(), vec!["root", "a", "a0", "b"]);
    }

    #[test]
    fn test_find_node_first_match_wins() {
        let tree = sample_tree();
        // Every node matches, so the root is returned
        let found = find_node(tree.root(), |_| true).unwrap();
        assert_eq!(found.id, tree.root().id);

        // Leaves: a0 comes before b in pre-order
        let leaf = find_node(tree.root(), |node| node.is_leaf()).unwrap();
        assert_eq!(leaf.conclusion.value, "a0");
    }

    #[test]
    fn test_find_node_missing() {
        let tree = sample_tree();
        assert!(node_by_id(tree.root(), &NodeId::new("gone")).is_none());
    }

    #[test]
    fn test_find_field_order_within_node() {
        let mut tree = sample_tree();
        tree.root_mut().assumptions[1].label.value = "x".to_string();
        tree.root_mut().assumptions[1].rule_name.value = "x".to_string();

        let (owner, role, _) = find_field_with_owner(tree.root(), |field| field.value == "x").unwrap();
        assert_eq!(owner.conclusion.value, "b");
        assert_eq!(role, FieldRole::Label);
    }

    #[test]
    fn test_find_field_mut_edits_in_place() {
        let mut tree = sample_tree();
        let target = tree.root().assumptions[0].assumptions[0].rule_name.id.clone();

        let field = find_field_mut(tree.root_mut(), |field| field.id == target).unwrap();
        field.value = "E".to_string();

        assert_eq!(field_by_id(tree.root(), &target).unwrap().value, "E");
    }

    #[test]
    fn test_find_node_mut() {
        let mut tree = sample_tree();
        let target = tree.root().assumptions[1].id.clone();

        let node = find_node_mut(tree.root_mut(), |node| node.id == target).unwrap();
        node.line_doubled = true;

        assert!(tree.root().assumptions[1].line_doubled);
    }

    #[test]
    fn test_node_at_path() {
        let tree = sample_tree();
        assert_eq!(node_at_path(tree.root(), &[]).unwrap().id, tree.root().id);
        assert_eq!(node_at_path(tree.root(), &[0, 0]).unwrap().conclusion.value, "a0");
        assert!(node_at_path(tree.root(), &[1, 0]).is_none());
        assert!(node_at_path(tree.root(), &[5]).is_none());
    }
}
