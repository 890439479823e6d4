//! Tests for tree construction, traversal and JSON loading.

use quarry_common::warning::has_warned;
use quarry_dom::{DocumentError, DomTree, NodeId, NodeType};

/// Helper to append an element without attributes and return its `NodeId`.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, tag, &[])
}

// ========== construction and traversal ==========

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.document_element(), Some(parent));
}

#[test]
fn test_descendants_are_preorder() {
    // <div><p><span/></p><ul/></div>
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let p = element(&mut tree, div, "p");
    let span = element(&mut tree, p, "span");
    let ul = element(&mut tree, div, "ul");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![div, p, span, ul]);

    let ancestors: Vec<NodeId> = tree.ancestors(span).collect();
    assert_eq!(ancestors, vec![p, div, NodeId::ROOT]);
}

#[test]
fn test_classes_split_on_whitespace() {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[("class", " a\tb  c "), ("id", "x")]);
    let data = tree.as_element(div).unwrap();

    assert_eq!(data.classes().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(data.id(), Some("x"));
}

// ========== JSON loading ==========

#[test]
fn test_load_document_json() {
    let tree = DomTree::from_json_str(
        r#"{
            "type": "document",
            "children": [{
                "type": "element",
                "tagName": "html",
                "children": [
                    { "type": "element", "tagName": "p", "attributes": { "class": "lead" },
                      "children": [ { "type": "text", "content": "hi" } ] },
                    { "type": "comment", "content": "note" }
                ]
            }]
        }"#,
    )
    .unwrap();

    let html = tree.document_element().unwrap();
    assert_eq!(tree.as_element(html).unwrap().tag_name, "html");
    let children = tree.children(html);
    assert_eq!(children.len(), 2);
    let p = tree.as_element(children[0]).unwrap();
    assert_eq!(p.attrs.get("class").map(String::as_str), Some("lead"));
    assert_eq!(tree.as_text(tree.children(children[0])[0]), Some("hi"));
    assert!(matches!(
        tree.get(children[1]).map(|n| &n.node_type),
        Some(NodeType::Comment(c)) if c == "note"
    ));
}

#[test]
fn test_load_bare_element_is_wrapped_in_document() {
    let tree = DomTree::from_json_str(r#"{ "type": "element", "tagName": "svg" }"#).unwrap();
    let root = tree.document_element().unwrap();
    assert_eq!(tree.parent(root), Some(NodeId::ROOT));
    assert_eq!(tree.as_element(root).unwrap().tag_name, "svg");
}

#[test]
fn test_load_skips_unknown_node_types_with_warning() {
    let tree = DomTree::from_json_str(
        r#"{ "type": "document", "children": [
            { "type": "doctype-for-tree-tests" },
            { "type": "element", "tagName": "html" }
        ] }"#,
    )
    .unwrap();

    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
    assert!(has_warned(
        "DOM",
        "skipping node of unsupported type 'doctype-for-tree-tests'"
    ));
}

#[test]
fn test_load_errors() {
    assert!(matches!(
        DomTree::from_json_str(r#"{ "type": "element" }"#),
        Err(DocumentError::MissingField { field: "tagName", .. })
    ));
    assert!(matches!(
        DomTree::from_json_str(r#"{ "type": "element", "tagName": "a", "children": [ { "type": "document" } ] }"#),
        Err(DocumentError::NestedDocument)
    ));
    assert!(matches!(
        DomTree::from_json_str("{ not json"),
        Err(DocumentError::Json(_))
    ));
}
