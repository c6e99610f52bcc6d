//! Integration tests for the built-in Helium grammar.
//!
//! Covers the concrete happy paths (definitions, arrays, records,
//! generics, comments) and the user-visible failure kinds.

use helium::helium::grammar::{GrammarBuilder, ParseError, SyntaxNode};
use helium::helium::lang;
use rstest::rstest;

/// Collect every label in the tree, depth first.
fn labels(node: &SyntaxNode, out: &mut Vec<String>) {
    out.push(node.label().to_string());
    if let Some(children) = node.children() {
        for child in children {
            labels(child, out);
        }
    }
}

#[test]
fn test_definition_keeps_identifier_type_and_value() {
    // Colon and equals are consumed but suppressed.
    let node = lang::HELIUM.parse_rule("abc:int=123", "DEFINITION").unwrap();

    assert_eq!(node.label(), "DEFINITION");
    let children = node.children().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].label(), "IDENTIFIER");
    assert_eq!(children[0].leaf_text(), Some("abc"));
    assert_eq!(children[1].label(), "TYPE");
    assert_eq!(children[1].leaf_text(), Some("int"));
    assert_eq!(children[2].label(), "VALUE");
    assert_eq!(children[2].leaf_text(), Some("123"));
}

#[test]
fn test_array_is_a_single_node_of_ordered_values() {
    // Brackets and commas are suppressed.
    let node = lang::HELIUM.parse_rule("[1,2,3]", "ARRAY").unwrap();

    assert_eq!(node.label(), "ARRAY");
    assert_eq!(node.leaves(), vec!["1", "2", "3"]);
    let children = node.children().unwrap();
    assert_eq!(children.len(), 3);
    assert!(children.iter().all(|child| child.leaf_text().is_some()));
}

#[test]
fn test_comments_never_reach_the_tree() {
    let node = lang::parse("#note#x:int<32>=5").unwrap();

    assert_eq!(node.leaves(), vec!["x", "int", "32", "5"]);
    let mut all_labels = Vec::new();
    labels(&node, &mut all_labels);
    for label in &all_labels {
        assert!(!label.contains('#'), "comment leaked into label {}", label);
    }
    for leaf in node.leaves() {
        assert!(!leaf.contains('#'), "comment leaked into leaf {}", leaf);
    }
}

#[test]
fn test_trailing_input_is_incomplete_not_no_match() {
    assert!(lang::HELIUM.parse_rule("x:int=1", "DEFINITION").is_ok());

    let err = lang::HELIUM.parse_rule("x:int=1?", "DEFINITION").unwrap_err();
    match err {
        ParseError::Incomplete { offset } => assert_eq!(offset, 7),
        other => panic!("expected Incomplete, got {:?}", other),
    }
}

#[test]
fn test_dangling_rule_reference_fails_before_parsing() {
    // A Helium-like grammar with a typo in a sub-rule reference must be
    // rejected when built, regardless of input.
    let err = GrammarBuilder::new("GENERIC")
        .terminal("IDENTIFIER", r"[A-Za-z_]\w*")
        .terminal("LT", "<")
        .terminal("GT", ">")
        .sequence("GENERIC", &["IDENTIFIER", "LT", "TYPEVALX", "GT"])
        .build()
        .unwrap_err();
    match err {
        ParseError::UnknownRule {
            rule,
            referenced_by,
        } => {
            assert_eq!(rule, "TYPEVALX");
            assert_eq!(referenced_by.as_deref(), Some("GENERIC"));
        }
        other => panic!("expected UnknownRule, got {:?}", other),
    }
}

#[rstest(input => [
    "42",
    "-3.5",
    "\"hello world\"",
    "'x'",
    "name",
    "[1,2,3]",
    "[\"a\",'b',3]",
    "[1,[2,3],4]",
    "[w:int=800,t=\"x\"]",
    "x=1",
    "x:int=1",
    "x:arr<str>=[\"a\"]",
    "x:map<str,int>=[a:int=1]",
    "#before#42#after#",
    "  42  "
])]
fn test_valid_documents_parse(input: &str) {
    let result = lang::parse(input);
    assert!(result.is_ok(), "{:?} failed: {:?}", input, result.err());
}

#[rstest(input => [
    "",
    "[1,2",
    "1,2]",
    "x:=1",
    "x:int=",
    "[,]",
    "#unterminated",
    "\"unterminated"
])]
fn test_invalid_documents_are_rejected(input: &str) {
    assert!(lang::parse(input).is_err(), "{:?} should not parse", input);
}

#[test]
fn test_record_children_are_definitions() {
    let node = lang::HELIUM
        .parse_rule("[width:int=800,title=\"main\"]", "RECORD")
        .unwrap();
    assert_eq!(node.label(), "RECORD");
    let children = node.children().unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|child| child.label() == "DEFINITION"));
    assert_eq!(
        node.leaves(),
        vec!["width", "int", "800", "title", "\"main\""]
    );
}

#[test]
fn test_nested_arrays_keep_structure() {
    let node = lang::HELIUM.parse_rule("[1,[2,3],4]", "ARRAY").unwrap();
    let children = node.children().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].leaf_text(), Some("1"));
    assert_eq!(children[1].children().map(<[SyntaxNode]>::len), Some(2));
    assert_eq!(children[2].leaf_text(), Some("4"));
}

#[test]
fn test_generic_arguments_flatten_to_one_list() {
    let node = lang::HELIUM.parse_rule("map<str,int,bit>", "TYPE").unwrap();
    // TYPE re-labels the generic; its second child is the flattened
    // argument list, one entry per argument, no wrappers between.
    let children = node.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].leaf_text(), Some("map"));
    let args = children[1].children().unwrap();
    assert_eq!(args.len(), 3);
    assert!(args.iter().all(|arg| arg.label() == "TYPEARG"));
}

#[test]
fn test_tree_serializes_for_generic_walkers() {
    let node = lang::HELIUM.parse_rule("[1,2]", "ARRAY").unwrap();
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"ARRAY": [{"VALUE": "1"}, {"VALUE": "2"}]})
    );
}
