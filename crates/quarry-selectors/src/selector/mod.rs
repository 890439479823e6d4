//! Compiled selectors.
//!
//! A [`Selector`] is a function from an ordered sequence of candidate elements
//! to the ordered, duplicate-free sequence of elements it selects. Simple
//! selectors are filters over the candidates; combinators expand each
//! candidate into related elements (children, descendants, siblings).
//! Chaining the two left to right evaluates a complex selector:
//!
//! ```text
//! div > p.note  ==  filter(div) . expand(children) . filter(p) . filter(.note)
//! ```
//!
//! The tree is supplied at evaluation time, so one compiled selector can be
//! reused across any number of trees that share an adapter type.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::adapter::TreeAdapter;

/// Ordering helpers shared by expansions and unions.
mod order;

type Step<A> = dyn Fn(&A, Vec<<A as TreeAdapter>::Element>) -> Vec<<A as TreeAdapter>::Element> + Send + Sync;

/// A compiled, composable selector over trees seen through adapter `A`.
///
/// Cloning is cheap: clones share the same underlying function.
pub struct Selector<A: TreeAdapter> {
    step: Arc<Step<A>>,
}

impl<A: TreeAdapter> Selector<A> {
    /// Wrap a raw sequence transformation.
    ///
    /// The function must return elements without duplicates and in document
    /// order whenever its input satisfies the same.
    pub fn from_fn<F>(step: F) -> Self
    where
        F: Fn(&A, Vec<A::Element>) -> Vec<A::Element> + Send + Sync + 'static,
    {
        Self { step: Arc::new(step) }
    }

    /// The selector that returns its input unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|_, elements| elements)
    }

    /// Keep the candidates satisfying `predicate`, preserving their order.
    pub fn filter<F>(predicate: F) -> Self
    where
        F: Fn(&A, &A::Element) -> bool + Send + Sync + 'static,
    {
        Self::from_fn(move |adapter, elements| {
            elements
                .into_iter()
                .filter(|element| predicate(adapter, element))
                .collect()
        })
    }

    /// Replace every candidate with the elements `step` relates it to.
    ///
    /// The result is de-duplicated and in document order.
    pub fn expand<F>(step: F) -> Self
    where
        F: Fn(&A, &A::Element) -> Vec<A::Element> + Send + Sync + 'static,
    {
        Self::from_fn(move |adapter, elements| {
            let expanded = elements
                .iter()
                .flat_map(|element| step(adapter, element))
                .collect();
            order::document_order(adapter, expanded)
        })
    }

    /// Replace every candidate with the subtree `step` walks below it.
    ///
    /// `step` must return elements lying inside its argument's subtree.
    /// Candidates nested inside another candidate are skipped, since their
    /// subtree is already covered, so each element is walked at most once.
    pub fn expand_subtrees<F>(step: F) -> Self
    where
        F: Fn(&A, &A::Element) -> Vec<A::Element> + Send + Sync + 'static,
    {
        Self::from_fn(move |adapter, elements| {
            let candidates: HashSet<A::Element> = elements.iter().cloned().collect();
            let expanded = elements
                .iter()
                .filter(|element| !has_ancestor_in(adapter, element, &candidates))
                .flat_map(|element| step(adapter, element))
                .collect();
            order::document_order(adapter, expanded)
        })
    }

    /// Sequential composition: feed this selector's output into `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        let first = Arc::clone(&self.step);
        let second = Arc::clone(&next.step);
        Self::from_fn(move |adapter, elements| second(adapter, first(adapter, elements)))
    }

    /// Parallel composition: every branch sees the same candidates and the
    /// results are merged in document order without duplicates.
    pub fn union(branches: impl IntoIterator<Item = Self>) -> Self {
        let mut branches: Vec<Arc<Step<A>>> = branches.into_iter().map(|branch| branch.step).collect();
        if branches.len() == 1 {
            return Self {
                step: branches.swap_remove(0),
            };
        }
        Self::from_fn(move |adapter, elements| {
            let mut merged = Vec::new();
            for branch in &branches {
                merged.extend(branch(adapter, elements.clone()));
            }
            order::document_order(adapter, merged)
        })
    }

    /// Evaluate against an arbitrary candidate sequence.
    ///
    /// Duplicate candidates are dropped, keeping the first occurrence. Filters
    /// keep the candidates' relative order; once a combinator has been applied
    /// the output is in document order.
    pub fn apply(&self, adapter: &A, candidates: impl IntoIterator<Item = A::Element>) -> Vec<A::Element> {
        let candidates = order::dedup(candidates.into_iter().collect());
        (self.step)(adapter, candidates)
    }

    /// Every element below `root` that matches, in document order. `root`
    /// itself is never included.
    pub fn select(&self, adapter: &A, root: &A::Element) -> Vec<A::Element> {
        self.apply(adapter, adapter.descendant_elements(root))
    }

    /// The first element below `root` that matches.
    pub fn select_first(&self, adapter: &A, root: &A::Element) -> Option<A::Element> {
        self.select(adapter, root).into_iter().next()
    }

    /// Whether `element` matches, with its whole tree available to the
    /// selector's combinators.
    ///
    /// Elements sharing a non-element container (top-level elements under a
    /// document node) are all part of that tree.
    pub fn matches(&self, adapter: &A, element: &A::Element) -> bool {
        let mut top = element.clone();
        while let Some(parent) = adapter.parent(&top) {
            top = parent;
        }
        let candidates = match adapter.order_parent(&top) {
            Some(mut container) => {
                while let Some(outer) = adapter.order_parent(&container) {
                    container = outer;
                }
                adapter.descendant_elements(&container)
            }
            None => {
                let mut candidates = vec![top.clone()];
                candidates.extend(adapter.descendant_elements(&top));
                candidates
            }
        };
        self.apply(adapter, candidates).contains(element)
    }
}

fn has_ancestor_in<A: TreeAdapter>(adapter: &A, element: &A::Element, candidates: &HashSet<A::Element>) -> bool {
    let mut current = adapter.parent(element);
    while let Some(ancestor) = current {
        if candidates.contains(&ancestor) {
            return true;
        }
        current = adapter.parent(&ancestor);
    }
    false
}

impl<A: TreeAdapter> Clone for Selector<A> {
    fn clone(&self) -> Self {
        Self {
            step: Arc::clone(&self.step),
        }
    }
}

impl<A: TreeAdapter> Default for Selector<A> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<A: TreeAdapter> fmt::Debug for Selector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector").finish_non_exhaustive()
    }
}
