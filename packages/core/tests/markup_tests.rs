//! Serializer and reader working together on whole trees

use prooftree_core::{read_markup, serialize, IdGenerator, LineStyle, ProofTree};

/// Natural-deduction style proof of B from A and A -> B, with a summarised sub-proof
fn modus_ponens(ids: &mut IdGenerator) -> ProofTree {
    let mut tree = ProofTree::blank(ids);
    let root = tree.root_mut();
    root.conclusion.value = "B".to_string();
    root.rule_name.value = "\\to E".to_string();
    root.label.value = "1".to_string();

    root.push_assumption(ids);
    root.push_assumption(ids);

    let left = &mut root.assumptions[0];
    left.conclusion.value = "A".to_string();
    left.line_style = LineStyle::None;
    left.line_doubled = true;
    left.rule_name.value = "Lemma".to_string();

    let right = &mut root.assumptions[1];
    right.conclusion.value = "A \\to B".to_string();
    right.line_style = LineStyle::Dashed;

    tree
}

#[test]
fn test_full_proof_markup() {
    let mut ids = IdGenerator::new("markup");
    let tree = modus_ponens(&mut ids);

    let expected = concat!(
        "\\prftree[l]{1}[r]{\\to E}\n",
        "{\n",
        "    \\prfsummary[Lemma]\n",
        "    { A }\n",
        "}\n",
        "{\n",
        "    \\prftree[dashed]\n",
        "    { A \\to B }\n",
        "}\n",
        "{ B }\n",
    );
    assert_eq!(serialize(&tree), expected);
}

#[test]
fn test_read_then_serialize_is_stable() {
    let mut ids = IdGenerator::new("markup");
    let original = serialize(&modus_ponens(&mut ids));

    let reread = read_markup(&original, &mut ids).unwrap();
    assert!(reread.check_structure().is_ok());
    assert_eq!(serialize(&reread), original);
}

#[test]
fn test_reader_ids_do_not_collide_with_existing_tree() {
    let mut ids = IdGenerator::new("markup");
    let tree = modus_ponens(&mut ids);
    let reread = read_markup(&serialize(&tree), &mut ids).unwrap();

    for id in reread.node_ids() {
        assert!(!tree.node_ids().contains(&id));
    }
}
