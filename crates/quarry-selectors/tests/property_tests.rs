//! Property tests for selector evaluation over randomly shaped trees.

use quarry_dom::{DomTree, NodeId};
use quarry_selectors::parser::Nth;
use quarry_selectors::{Selector, TreeAdapter, compile};
use quickcheck_macros::quickcheck;

const NAMES: [&str; 3] = ["div", "p", "span"];

/// Build a tree from a byte string: each byte adds one element whose parent is
/// picked among the elements added so far (or the document element).
fn tree_from(shape: &[u8]) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let document = tree.root();
    let html = tree.append_element(document, "html", &[]);
    let mut elements = vec![html];
    for (index, &byte) in shape.iter().take(40).enumerate() {
        let parent = elements[usize::from(byte) % elements.len()];
        let class = if byte % 2 == 0 { "even" } else { "odd" };
        let element = tree.append_element(parent, NAMES[index % NAMES.len()], &[("class", class)]);
        elements.push(element);
    }
    (tree, html)
}

fn preorder(tree: &DomTree, root: NodeId) -> Vec<NodeId> {
    tree.descendant_elements(&root)
}

fn is_in_document_order(tree: &DomTree, root: NodeId, result: &[NodeId]) -> bool {
    let order = preorder(tree, root);
    let positions: Vec<usize> = result
        .iter()
        .filter_map(|element| order.iter().position(|candidate| candidate == element))
        .collect();
    positions.len() == result.len() && positions.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn prop_nth_matches_brute_force(a: i8, b: i8, position: u8) -> bool {
    let nth = Nth::new(i32::from(a), i32::from(b));
    let position = usize::from(position) + 1;
    let expected = (0..=512_i32).any(|n| i32::from(a) * n + i32::from(b) == i32::try_from(position).unwrap_or(i32::MAX));
    nth.matches(position) == expected
}

#[quickcheck]
fn prop_universal_preserves_candidate_order(shape: Vec<u8>, seed: u8) -> bool {
    let (tree, root) = tree_from(&shape);
    let mut candidates = preorder(&tree, root);
    let len = candidates.len();
    if len > 0 {
        candidates.rotate_left(usize::from(seed) % len);
    }
    let selector: Selector<DomTree> = compile("*").unwrap();

    let mut doubled = candidates.clone();
    doubled.extend(candidates.iter().copied());
    selector.apply(&tree, doubled) == candidates
}

#[quickcheck]
fn prop_combinator_results_are_ordered_and_unique(shape: Vec<u8>) -> bool {
    let (tree, root) = tree_from(&shape);
    ["div *", "* > p", "* + *", "span ~ *", ".odd, .even > span, div", "*:nth-child(2n+1)"]
        .into_iter()
        .all(|source| {
            let selector: Selector<DomTree> = compile(source).unwrap();
            is_in_document_order(&tree, root, &selector.select(&tree, &root))
        })
}

#[quickcheck]
fn prop_descendant_matches_brute_force(shape: Vec<u8>) -> bool {
    let (tree, root) = tree_from(&shape);
    let selector: Selector<DomTree> = compile("div span").unwrap();
    let expected: Vec<NodeId> = preorder(&tree, root)
        .into_iter()
        .filter(|element| tree.local_name(element) == "span")
        .filter(|element| {
            let mut current = TreeAdapter::parent(&tree, element);
            while let Some(ancestor) = current {
                if tree.local_name(&ancestor) == "div" {
                    return true;
                }
                current = TreeAdapter::parent(&tree, &ancestor);
            }
            false
        })
        .collect();
    selector.select(&tree, &root) == expected
}

#[quickcheck]
fn prop_union_is_ordered_set_union(shape: Vec<u8>) -> bool {
    let (tree, root) = tree_from(&shape);
    let left: Selector<DomTree> = compile("div > *").unwrap();
    let right: Selector<DomTree> = compile(".odd").unwrap();
    let both: Selector<DomTree> = compile("div > *, .odd").unwrap();

    let left = left.select(&tree, &root);
    let right = right.select(&tree, &root);
    let expected: Vec<NodeId> = preorder(&tree, root)
        .into_iter()
        .filter(|element| left.contains(element) || right.contains(element))
        .collect();
    both.select(&tree, &root) == expected
}

#[quickcheck]
fn prop_compilation_is_deterministic(shape: Vec<u8>) -> bool {
    let (tree, root) = tree_from(&shape);
    let source = "div > .even:not(:first-child), span + p";
    let first: Selector<DomTree> = compile(source).unwrap();
    let second: Selector<DomTree> = compile(source).unwrap();
    let result = first.select(&tree, &root);
    result == second.select(&tree, &root) && result == first.select(&tree, &root)
}

#[quickcheck]
fn prop_filters_are_idempotent(shape: Vec<u8>) -> bool {
    let (tree, root) = tree_from(&shape);
    let selector: Selector<DomTree> = compile("p.odd:not(:last-child)").unwrap();
    let once = selector.select(&tree, &root);
    selector.apply(&tree, once.clone()) == once
}
