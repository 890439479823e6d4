//! Tree adapters.
//!
//! The matching engine never touches a concrete node type. Everything it
//! needs to know about a tree is asked through [`TreeAdapter`], so the same
//! compiled selector can run over the bundled [`quarry_dom::DomTree`], an XML
//! tree, or a synthetic tree built in a test.

use std::hash::Hash;

/// [`TreeAdapter`] for the bundled arena tree.
pub mod dom;

/// Structural and attribute primitives over a tree of elements.
///
/// Only elements are visible through this trait. Text and comment nodes
/// surface solely through [`TreeAdapter::has_child_nodes`].
///
/// Implementors provide the five required methods; the rest have default
/// implementations in terms of them and may be overridden when the tree can
/// answer more cheaply.
///
/// Compiled selectors are independent of any tree instance, so adapters are
/// owned types (typically the tree itself) rather than borrowed views.
pub trait TreeAdapter: 'static {
    /// Handle to an element. Handles must compare equal exactly when they
    /// refer to the same element.
    type Element: Clone + Eq + Hash;

    /// The element's local name, e.g. `div`.
    fn local_name<'a>(&'a self, element: &'a Self::Element) -> &'a str;

    /// The value of the named attribute, if present.
    fn attribute<'a>(&'a self, element: &'a Self::Element, name: &str) -> Option<&'a str>;

    /// The parent element. `None` for a root element, including an element
    /// whose parent is a document node.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// The element children of `element`, in document order.
    fn element_children(&self, element: &Self::Element) -> Vec<Self::Element>;

    /// Whether `element` has children other than comments. Text children,
    /// whitespace-only text included, count.
    fn has_child_nodes(&self, element: &Self::Element) -> bool;

    /// [§ 6.5 ID selectors](https://www.w3.org/TR/selectors-3/#id-selectors)
    ///
    /// "What makes attributes of type ID special is that no two such attributes
    /// can have the same value in a conformant document."
    fn id<'a>(&'a self, element: &'a Self::Element) -> Option<&'a str> {
        self.attribute(element, "id")
    }

    /// The whitespace-separated tokens of the `class` attribute.
    fn class_list<'a>(&'a self, element: &'a Self::Element) -> Vec<&'a str> {
        self.attribute(element, "class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// The element sibling immediately after `element`.
    fn next_sibling_element(&self, element: &Self::Element) -> Option<Self::Element> {
        let parent = self.parent(element)?;
        let siblings = self.element_children(&parent);
        let index = siblings.iter().position(|sibling| sibling == element)?;
        siblings.into_iter().nth(index + 1)
    }

    /// Every element sibling after `element`, in document order.
    fn following_sibling_elements(&self, element: &Self::Element) -> Vec<Self::Element> {
        let Some(parent) = self.parent(element) else {
            return Vec::new();
        };
        let siblings = self.element_children(&parent);
        siblings
            .iter()
            .position(|sibling| sibling == element)
            .map(|index| siblings[index + 1..].to_vec())
            .unwrap_or_default()
    }

    /// Every element below `element` in preorder, excluding `element` itself.
    fn descendant_elements(&self, element: &Self::Element) -> Vec<Self::Element> {
        let mut result = Vec::new();
        let mut stack: Vec<Self::Element> = self.element_children(element).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            stack.extend(self.element_children(&next).into_iter().rev());
            result.push(next);
        }
        result
    }

    /// The node used to place `element` in document order.
    ///
    /// Defaults to [`TreeAdapter::parent`]. Trees whose root elements hang off
    /// a shared container, such as a document node with several top-level
    /// elements, return that container here so that those elements are
    /// ordered by position rather than by first appearance. The container
    /// must answer [`TreeAdapter::element_children`].
    fn order_parent(&self, element: &Self::Element) -> Option<Self::Element> {
        self.parent(element)
    }
}
