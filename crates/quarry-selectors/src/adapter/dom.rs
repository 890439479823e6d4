use quarry_dom::{DomTree, NodeId, NodeType};

use super::TreeAdapter;

impl TreeAdapter for DomTree {
    type Element = NodeId;

    fn local_name<'a>(&'a self, element: &'a NodeId) -> &'a str {
        self.as_element(*element).map_or("", |data| data.tag_name.as_str())
    }

    fn attribute<'a>(&'a self, element: &'a NodeId, name: &str) -> Option<&'a str> {
        self.as_element(*element)?.attrs.get(name).map(String::as_str)
    }

    /// The document node is not an element, so the document element has no parent.
    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        DomTree::parent(self, *element).filter(|&parent| self.is_element(parent))
    }

    fn element_children(&self, element: &NodeId) -> Vec<NodeId> {
        self.children(*element)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// [§ 6.6.5.10 :empty](https://www.w3.org/TR/selectors-3/#empty-pseudo)
    ///
    /// "Comments, processing instructions, and other nodes must not affect
    /// whether an element is considered empty or not."
    fn has_child_nodes(&self, element: &NodeId) -> bool {
        self.children(*element).iter().any(|&child| match self.get(child).map(|node| &node.node_type) {
            Some(NodeType::Element(_)) => true,
            Some(NodeType::Text(text)) => !text.is_empty(),
            _ => false,
        })
    }

    fn id<'a>(&'a self, element: &'a NodeId) -> Option<&'a str> {
        self.as_element(*element)?.id()
    }

    fn class_list<'a>(&'a self, element: &'a NodeId) -> Vec<&'a str> {
        self.as_element(*element)
            .map(|data| data.classes().collect())
            .unwrap_or_default()
    }

    fn next_sibling_element(&self, element: &NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(*element);
        while let Some(id) = current {
            if self.is_element(id) {
                return Some(id);
            }
            current = self.next_sibling(id);
        }
        None
    }

    fn following_sibling_elements(&self, element: &NodeId) -> Vec<NodeId> {
        std::iter::successors(self.next_sibling(*element), |&id| self.next_sibling(id))
            .filter(|&id| self.is_element(id))
            .collect()
    }

    fn descendant_elements(&self, element: &NodeId) -> Vec<NodeId> {
        self.descendants(*element).filter(|&id| self.is_element(id)).collect()
    }

    fn order_parent(&self, element: &NodeId) -> Option<NodeId> {
        DomTree::parent(self, *element)
    }
}
