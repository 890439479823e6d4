//! Document order for element sequences.
//!
//! [§ 4.2.1 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
//!
//! "An object A is preceding an object B if A and B are in the same tree and A
//! comes before B in tree order." Tree order is preorder, depth-first.
//!
//! Each element is keyed by the path of child indices from its topmost
//! ancestor; comparing paths lexicographically yields preorder, since an
//! ancestor's path is a prefix of its descendants' paths. Elements of
//! disconnected trees are grouped by the order in which their roots are first
//! seen.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::adapter::TreeAdapter;

/// Remove duplicates and sort `elements` into document order.
pub(crate) fn document_order<A: TreeAdapter>(adapter: &A, elements: Vec<A::Element>) -> Vec<A::Element> {
    let elements = dedup(elements);
    if elements.len() < 2 {
        return elements;
    }

    let mut keys = OrderKeys::new(adapter);
    let mut keyed: Vec<((usize, Vec<usize>), A::Element)> = elements
        .into_iter()
        .map(|element| (keys.key(&element), element))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, element)| element).collect()
}

/// Remove duplicates, keeping the first occurrence of each element.
pub(crate) fn dedup<E: Clone + Eq + Hash>(elements: Vec<E>) -> Vec<E> {
    let mut seen = HashSet::with_capacity(elements.len());
    elements
        .into_iter()
        .filter(|element| seen.insert(element.clone()))
        .collect()
}

/// Per-call cache of tree positions. Dropped when the sort finishes.
struct OrderKeys<'a, A: TreeAdapter> {
    adapter: &'a A,
    /// Root of each element's tree, and its path from that root.
    positions: HashMap<A::Element, (A::Element, Vec<usize>)>,
    /// Index of each child among its parent's element children.
    child_indices: HashMap<A::Element, HashMap<A::Element, usize>>,
    /// Roots in order of first appearance.
    roots: Vec<A::Element>,
}

impl<'a, A: TreeAdapter> OrderKeys<'a, A> {
    fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            positions: HashMap::new(),
            child_indices: HashMap::new(),
            roots: Vec::new(),
        }
    }

    fn key(&mut self, element: &A::Element) -> (usize, Vec<usize>) {
        let (root, path) = self.position(element);
        let rank = match self.roots.iter().position(|known| *known == root) {
            Some(rank) => rank,
            None => {
                self.roots.push(root);
                self.roots.len() - 1
            }
        };
        (rank, path)
    }

    fn position(&mut self, element: &A::Element) -> (A::Element, Vec<usize>) {
        if let Some(position) = self.positions.get(element) {
            return position.clone();
        }

        // Walk up to the first ancestor with a known position (or the root),
        // then fill in positions on the way back down.
        let mut chain = vec![element.clone()];
        let mut base = None;
        while let Some(parent) = self.adapter.order_parent(chain.last().unwrap_or(element)) {
            if let Some(position) = self.positions.get(&parent) {
                base = Some(position.clone());
                break;
            }
            chain.push(parent);
        }

        let (root, mut path) = match base {
            Some(position) => position,
            None => {
                let root = chain.pop().unwrap_or_else(|| element.clone());
                let position = (root.clone(), Vec::new());
                let _ = self.positions.insert(root, position.clone());
                position
            }
        };

        while let Some(child) = chain.pop() {
            path.push(self.child_index(&child));
            let _ = self.positions.insert(child, (root.clone(), path.clone()));
        }
        (root, path)
    }

    fn child_index(&mut self, child: &A::Element) -> usize {
        let Some(parent) = self.adapter.order_parent(child) else {
            return 0;
        };
        let adapter = self.adapter;
        let indices = self.child_indices.entry(parent).or_insert_with_key(|parent| {
            adapter
                .element_children(parent)
                .into_iter()
                .enumerate()
                .map(|(index, sibling)| (sibling, index))
                .collect()
        });
        indices.get(child).copied().unwrap_or(usize::MAX)
    }
}
