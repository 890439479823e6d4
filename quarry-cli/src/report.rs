//! Plain-text rendering for matches and selector diagnostics.

use quarry_dom::{DomTree, NodeId};
use quarry_selectors::SelectorError;

/// Describe one element as `tag#id.class1.class2`.
pub fn describe_element(tree: &DomTree, element: NodeId) -> String {
    let Some(data) = tree.as_element(element) else {
        return String::new();
    };
    let mut label = data.tag_name.clone();
    if let Some(id) = data.id() {
        label.push('#');
        label.push_str(id);
    }
    for class in data.classes() {
        label.push('.');
        label.push_str(class);
    }
    label
}

/// The element ancestors of `element`, outermost first, as ` > `-joined labels.
///
/// Returns an empty string for the document element.
pub fn ancestor_path(tree: &DomTree, element: NodeId) -> String {
    let mut labels: Vec<String> = tree
        .ancestors(element)
        .filter(|&ancestor| tree.is_element(ancestor))
        .map(|ancestor| describe_element(tree, ancestor))
        .collect();
    labels.reverse();
    labels.join(" > ")
}

/// The source line and a caret under the byte `offset` of `source`.
///
/// Offsets past the end point just after the last character.
pub fn caret_lines(source: &str, offset: usize) -> (String, String) {
    let column = source
        .get(..offset)
        .map_or_else(|| source.chars().count(), |prefix| prefix.chars().count());
    (source.to_string(), format!("{}^", " ".repeat(column)))
}

/// Header for a selector error, e.g. `syntax error: unknown pseudo-class ':x' at offset 1`.
pub fn error_header(error: &SelectorError) -> String {
    format!("{} error: {error}", error.category())
}
