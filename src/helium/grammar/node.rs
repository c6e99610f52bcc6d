//! Syntax tree nodes
//!
//! The output of a parse is a tree of `SyntaxNode`s: a label (the
//! originating rule name, or a re-exposed field name) plus either the raw
//! matched substring (terminal leaf) or an ordered list of child nodes.
//!
//! Nodes are built bottom-up during a single parse pass and never mutated
//! afterwards. The shape is deliberately minimal - label plus
//! leaf-or-children - so any serializer can walk it generically without
//! knowing the grammar. Serialization renders each node as a single-entry
//! map, e.g. `{"IDENTIFIER": "abc"}` or `{"ARRAY": [...]}`.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A labeled node in the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    label: String,
    value: NodeValue,
}

/// The payload of a node: a terminal leaf or ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    Leaf(String),
    List(Vec<SyntaxNode>),
}

impl SyntaxNode {
    /// A terminal leaf carrying the matched substring.
    pub fn leaf(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: NodeValue::Leaf(text.into()),
        }
    }

    /// A non-terminal node wrapping an ordered list of children.
    pub fn list(label: impl Into<String>, children: Vec<SyntaxNode>) -> Self {
        Self {
            label: label.into(),
            value: NodeValue::List(children),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn into_value(self) -> NodeValue {
        self.value
    }

    /// The same node under a different label. Used by Choice rules and by
    /// `Shape::Expose` re-labeling.
    pub fn relabeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The matched substring, if this node is a terminal leaf.
    pub fn leaf_text(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Leaf(text) => Some(text),
            NodeValue::List(_) => None,
        }
    }

    /// The child nodes, if this node is a non-terminal.
    pub fn children(&self) -> Option<&[SyntaxNode]> {
        match &self.value {
            NodeValue::Leaf(_) => None,
            NodeValue::List(children) => Some(children),
        }
    }

    /// All retained leaf substrings, in match order.
    ///
    /// Concatenating these reconstructs the non-suppressed portion of the
    /// input that this subtree covers.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.value {
            NodeValue::Leaf(text) => out.push(text),
            NodeValue::List(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl Serialize for SyntaxNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.value)?;
        map.end()
    }
}

impl Serialize for NodeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeValue::Leaf(text) => serializer.serialize_str(text),
            NodeValue::List(children) => children.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_accessors() {
        let node = SyntaxNode::leaf("NUMBER", "42");
        assert_eq!(node.label(), "NUMBER");
        assert_eq!(node.leaf_text(), Some("42"));
        assert!(node.children().is_none());
    }

    #[test]
    fn test_relabeled_keeps_value() {
        let node = SyntaxNode::leaf("NUMBER", "42").relabeled("VALUE");
        assert_eq!(node.label(), "VALUE");
        assert_eq!(node.leaf_text(), Some("42"));
    }

    #[test]
    fn test_leaves_are_collected_in_order() {
        let node = SyntaxNode::list(
            "DEFINITION",
            vec![
                SyntaxNode::leaf("IDENTIFIER", "abc"),
                SyntaxNode::list("TYPE", vec![SyntaxNode::leaf("IDENTIFIER", "int")]),
                SyntaxNode::leaf("VALUE", "123"),
            ],
        );
        assert_eq!(node.leaves(), vec!["abc", "int", "123"]);
    }

    #[test]
    fn test_serializes_as_single_entry_map() {
        let node = SyntaxNode::list(
            "ARRAY",
            vec![
                SyntaxNode::leaf("VALUE", "1"),
                SyntaxNode::leaf("VALUE", "2"),
            ],
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({"ARRAY": [{"VALUE": "1"}, {"VALUE": "2"}]}));
    }
}
