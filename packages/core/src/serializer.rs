use crate::ast::{LineStyle, Node, ProofTree};
use tracing::instrument;

/// Indentation unit, one per nesting depth
pub const INDENT: &str = "    ";

/// Serializer converts a proof tree to prftree markup
///
/// The output shape is fixed: command and options on one line, then one
/// braced block per assumption, then the conclusion. Options appear as
/// `[double]`, the line token, `[l]{..}`, `[r]{..}`, each omitted when it
/// does not apply. Summary nodes use `\prfsummary[rule]` instead.
pub struct Serializer {
    indent_level: usize,
}

impl Serializer {
    pub fn new() -> Self {
        Self { indent_level: 0 }
    }

    /// Start serializing at a given nesting depth
    pub fn at_depth(depth: usize) -> Self {
        Self {
            indent_level: depth,
        }
    }

    /// Serialize a whole snapshot
    pub fn serialize(&mut self, tree: &ProofTree) -> String {
        self.serialize_node(tree.root())
    }

    /// Serialize a node and its subtree at the current depth
    pub fn serialize_node(&mut self, node: &Node) -> String {
        let mut output = String::new();
        self.write_node(node, &mut output);
        output
    }

    fn write_node(&mut self, node: &Node, output: &mut String) {
        self.write_indent(output);

        if node.is_summary() {
            output.push_str("\\prfsummary");
            if !node.rule_name.is_empty() {
                output.push('[');
                output.push_str(&node.rule_name.value);
                output.push(']');
            }
        } else {
            output.push_str("\\prftree");
            self.write_options(node, output);
        }

        output.push('\n');

        for assumption in &node.assumptions {
            self.write_indent(output);
            output.push_str("{\n");

            self.indent_level += 1;
            self.write_node(assumption, output);
            self.indent_level -= 1;

            self.write_indent(output);
            output.push_str("}\n");
        }

        self.write_indent(output);
        output.push_str("{ ");
        output.push_str(&node.conclusion.value);
        output.push_str(" }\n");
    }

    fn write_options(&self, node: &Node, output: &mut String) {
        if node.line_doubled {
            output.push_str("[double]");
        }

        match node.line_style {
            LineStyle::Straight => {}
            LineStyle::None => output.push_str("[noline]"),
            LineStyle::Dotted => output.push_str("[dotted]"),
            LineStyle::Dashed => output.push_str("[dashed]"),
        }

        if !node.label.is_empty() {
            output.push_str("[l]{");
            output.push_str(&node.label.value);
            output.push('}');
        }

        if !node.rule_name.is_empty() {
            output.push_str("[r]{");
            output.push_str(&node.rule_name.value);
            output.push('}');
        }
    }

    fn write_indent(&self, output: &mut String) {
        for _ in 0..self.indent_level {
            output.push_str(INDENT);
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

#[instrument(skip_all, fields(nodes = tree.node_count()))]
pub fn serialize(tree: &ProofTree) -> String {
    let mut serializer = Serializer::new();
    serializer.serialize(tree)
}

pub fn serialize_node(node: &Node, depth: usize) -> String {
    Serializer::at_depth(depth).serialize_node(node)
}
