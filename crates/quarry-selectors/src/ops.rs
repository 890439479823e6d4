//! Element operations.
//!
//! [`ElementOps`] is the capability set the generator drives: one method per
//! selector primitive, each returning a [`Selector`]. [`StandardOps`] gives
//! every primitive its Selectors Level 3 meaning; a host that needs different
//! semantics for some primitive can implement the trait itself and delegate
//! the rest.

use crate::adapter::TreeAdapter;
use crate::options::{CaseSensitivity, MatchOptions};
use crate::parser::Nth;
use crate::selector::Selector;

/// Factory of primitive selectors.
pub trait ElementOps<A: TreeAdapter> {
    /// `E`: elements whose local name is `name`.
    fn type_selector(&self, name: &str) -> Selector<A>;
    /// `*`: every element.
    fn universal(&self) -> Selector<A>;
    /// `#id`
    fn id(&self, id: &str) -> Selector<A>;
    /// `.class`
    fn class(&self, class: &str) -> Selector<A>;

    /// `[att]`
    fn attribute_exists(&self, name: &str) -> Selector<A>;
    /// `[att=val]`
    fn attribute_exact(&self, name: &str, value: &str) -> Selector<A>;
    /// `[att~=val]`
    fn attribute_includes(&self, name: &str, value: &str) -> Selector<A>;
    /// `[att|=val]`
    fn attribute_dash_match(&self, name: &str, value: &str) -> Selector<A>;
    /// `[att^=val]`
    fn attribute_prefix(&self, name: &str, value: &str) -> Selector<A>;
    /// `[att$=val]`
    fn attribute_suffix(&self, name: &str, value: &str) -> Selector<A>;
    /// `[att*=val]`
    fn attribute_substring(&self, name: &str, value: &str) -> Selector<A>;

    /// `:root`
    fn root(&self) -> Selector<A>;
    /// `:first-child`
    fn first_child(&self) -> Selector<A>;
    /// `:last-child`
    fn last_child(&self) -> Selector<A>;
    /// `:only-child`
    fn only_child(&self) -> Selector<A>;
    /// `:nth-child(an+b)`
    fn nth_child(&self, a: i32, b: i32) -> Selector<A>;
    /// `:nth-last-child(an+b)`
    fn nth_last_child(&self, a: i32, b: i32) -> Selector<A>;
    /// `:first-of-type`
    fn first_of_type(&self) -> Selector<A>;
    /// `:last-of-type`
    fn last_of_type(&self) -> Selector<A>;
    /// `:only-of-type`
    fn only_of_type(&self) -> Selector<A>;
    /// `:nth-of-type(an+b)`
    fn nth_of_type(&self, a: i32, b: i32) -> Selector<A>;
    /// `:nth-last-of-type(an+b)`
    fn nth_last_of_type(&self, a: i32, b: i32) -> Selector<A>;
    /// `:empty`
    fn empty(&self) -> Selector<A>;
    /// `:not(X)`: candidates that `inner` rejects.
    fn negation(&self, inner: Selector<A>) -> Selector<A>;

    /// `E > F`: expand to element children.
    fn child(&self) -> Selector<A>;
    /// `E F`: expand to all element descendants.
    fn descendant(&self) -> Selector<A>;
    /// `E + F`: expand to the next element sibling.
    fn adjacent(&self) -> Selector<A>;
    /// `E ~ F`: expand to every following element sibling.
    fn general_sibling(&self) -> Selector<A>;
}

/// Selectors Level 3 semantics under the configured [`MatchOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardOps {
    options: MatchOptions,
}

impl StandardOps {
    /// Create operations using `options`.
    #[must_use]
    pub const fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> MatchOptions {
        self.options
    }

    /// Filter on the value of attribute `name`.
    fn attribute_value<A, F>(name: &str, test: F) -> Selector<A>
    where
        A: TreeAdapter,
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.to_string();
        Selector::filter(move |adapter: &A, element| adapter.attribute(element, &name).is_some_and(&test))
    }

    /// Filter on an element's 1-based position among its siblings, and the
    /// number of those siblings.
    fn positional<A, F>(&self, of_type: bool, test: F) -> Selector<A>
    where
        A: TreeAdapter,
        F: Fn(usize, usize) -> bool + Send + Sync + 'static,
    {
        let names = of_type.then_some(self.options.element_names);
        Selector::filter(move |adapter: &A, element| {
            sibling_position(adapter, element, names).is_some_and(|(position, count)| test(position, count))
        })
    }
}

/// Position of `element` among the element children of its parent, counting
/// only siblings with the same local name when `same_type` is set. `None` when
/// the element has no parent element.
fn sibling_position<A: TreeAdapter>(
    adapter: &A,
    element: &A::Element,
    same_type: Option<CaseSensitivity>,
) -> Option<(usize, usize)> {
    let parent = adapter.parent(element)?;
    let mut siblings = adapter.element_children(&parent);
    if let Some(names) = same_type {
        let name = adapter.local_name(element);
        siblings.retain(|sibling| names.equals(adapter.local_name(sibling), name));
    }
    let index = siblings.iter().position(|sibling| sibling == element)?;
    Some((index + 1, siblings.len()))
}

impl<A: TreeAdapter> ElementOps<A> for StandardOps {
    /// [§ 6.1 Type selector](https://www.w3.org/TR/selectors-3/#type-selectors)
    fn type_selector(&self, name: &str) -> Selector<A> {
        let name = name.to_string();
        let names = self.options.element_names;
        Selector::filter(move |adapter: &A, element| names.equals(adapter.local_name(element), &name))
    }

    fn universal(&self) -> Selector<A> {
        Selector::identity()
    }

    fn id(&self, id: &str) -> Selector<A> {
        let id = id.to_string();
        Selector::filter(move |adapter: &A, element| adapter.id(element) == Some(id.as_str()))
    }

    /// [§ 6.4 Class selectors](https://www.w3.org/TR/selectors-3/#class-html)
    ///
    /// "Working with HTML, authors may use the 'period' notation as an
    /// alternative to the ~= notation when representing the class attribute."
    fn class(&self, class: &str) -> Selector<A> {
        let class = class.to_string();
        Selector::filter(move |adapter: &A, element| adapter.class_list(element).contains(&class.as_str()))
    }

    fn attribute_exists(&self, name: &str) -> Selector<A> {
        Self::attribute_value(name, |_| true)
    }

    fn attribute_exact(&self, name: &str, value: &str) -> Selector<A> {
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| values.equals(actual, &value))
    }

    /// "If 'val' contains whitespace, it will never represent anything (since
    /// the words are separated by spaces). Also if 'val' is the empty string,
    /// it will never represent anything."
    fn attribute_includes(&self, name: &str, value: &str) -> Selector<A> {
        if value.is_empty() || value.contains(|c: char| c.is_ascii_whitespace()) {
            return Selector::filter(|_, _| false);
        }
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| {
            actual.split_ascii_whitespace().any(|word| values.equals(word, &value))
        })
    }

    /// "Represents an element with the att attribute, its value either being
    /// exactly 'val' or beginning with 'val' immediately followed by '-'."
    fn attribute_dash_match(&self, name: &str, value: &str) -> Selector<A> {
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| {
            values.equals(actual, &value)
                || (values.starts_with(actual, &value) && actual.as_bytes().get(value.len()) == Some(&b'-'))
        })
    }

    /// "If 'val' is the empty string then the selector does not represent anything."
    fn attribute_prefix(&self, name: &str, value: &str) -> Selector<A> {
        if value.is_empty() {
            return Selector::filter(|_, _| false);
        }
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| values.starts_with(actual, &value))
    }

    /// "If 'val' is the empty string then the selector does not represent anything."
    fn attribute_suffix(&self, name: &str, value: &str) -> Selector<A> {
        if value.is_empty() {
            return Selector::filter(|_, _| false);
        }
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| values.ends_with(actual, &value))
    }

    /// "If 'val' is the empty string then the selector does not represent anything."
    fn attribute_substring(&self, name: &str, value: &str) -> Selector<A> {
        if value.is_empty() {
            return Selector::filter(|_, _| false);
        }
        let value = value.to_string();
        let values = self.options.attribute_values;
        Self::attribute_value(name, move |actual| values.contains(actual, &value))
    }

    /// [§ 6.6.5.1 :root](https://www.w3.org/TR/selectors-3/#root-pseudo)
    fn root(&self) -> Selector<A> {
        Selector::filter(|adapter: &A, element| adapter.parent(element).is_none())
    }

    /// [§ 6.6.5.6 :first-child](https://www.w3.org/TR/selectors-3/#first-child-pseudo)
    fn first_child(&self) -> Selector<A> {
        self.positional(false, |position, _| position == 1)
    }

    /// [§ 6.6.5.7 :last-child](https://www.w3.org/TR/selectors-3/#last-child-pseudo)
    fn last_child(&self) -> Selector<A> {
        self.positional(false, |position, count| position == count)
    }

    /// [§ 6.6.5.10 :only-child](https://www.w3.org/TR/selectors-3/#only-child-pseudo)
    fn only_child(&self) -> Selector<A> {
        self.positional(false, |_, count| count == 1)
    }

    /// [§ 6.6.5.2 :nth-child()](https://www.w3.org/TR/selectors-3/#nth-child-pseudo)
    fn nth_child(&self, a: i32, b: i32) -> Selector<A> {
        let nth = Nth::new(a, b);
        self.positional(false, move |position, _| nth.matches(position))
    }

    /// [§ 6.6.5.3 :nth-last-child()](https://www.w3.org/TR/selectors-3/#nth-last-child-pseudo)
    fn nth_last_child(&self, a: i32, b: i32) -> Selector<A> {
        let nth = Nth::new(a, b);
        self.positional(false, move |position, count| nth.matches(count - position + 1))
    }

    /// [§ 6.6.5.8 :first-of-type](https://www.w3.org/TR/selectors-3/#first-of-type-pseudo)
    fn first_of_type(&self) -> Selector<A> {
        self.positional(true, |position, _| position == 1)
    }

    /// [§ 6.6.5.9 :last-of-type](https://www.w3.org/TR/selectors-3/#last-of-type-pseudo)
    fn last_of_type(&self) -> Selector<A> {
        self.positional(true, |position, count| position == count)
    }

    /// [§ 6.6.5.11 :only-of-type](https://www.w3.org/TR/selectors-3/#only-of-type-pseudo)
    fn only_of_type(&self) -> Selector<A> {
        self.positional(true, |_, count| count == 1)
    }

    /// [§ 6.6.5.4 :nth-of-type()](https://www.w3.org/TR/selectors-3/#nth-of-type-pseudo)
    fn nth_of_type(&self, a: i32, b: i32) -> Selector<A> {
        let nth = Nth::new(a, b);
        self.positional(true, move |position, _| nth.matches(position))
    }

    /// [§ 6.6.5.5 :nth-last-of-type()](https://www.w3.org/TR/selectors-3/#nth-last-of-type-pseudo)
    fn nth_last_of_type(&self, a: i32, b: i32) -> Selector<A> {
        let nth = Nth::new(a, b);
        self.positional(true, move |position, count| nth.matches(count - position + 1))
    }

    /// [§ 6.6.5.12 :empty](https://www.w3.org/TR/selectors-3/#empty-pseudo)
    fn empty(&self) -> Selector<A> {
        Selector::filter(|adapter: &A, element| !adapter.has_child_nodes(element))
    }

    /// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    fn negation(&self, inner: Selector<A>) -> Selector<A> {
        Selector::filter(move |adapter: &A, element| inner.apply(adapter, [element.clone()]).is_empty())
    }

    fn child(&self) -> Selector<A> {
        Selector::expand(|adapter: &A, element| adapter.element_children(element))
    }

    fn descendant(&self) -> Selector<A> {
        Selector::expand_subtrees(|adapter: &A, element| adapter.descendant_elements(element))
    }

    fn adjacent(&self) -> Selector<A> {
        Selector::expand(|adapter: &A, element| adapter.next_sibling_element(element).into_iter().collect())
    }

    fn general_sibling(&self) -> Selector<A> {
        Selector::expand(|adapter: &A, element| adapter.following_sibling_elements(element))
    }
}
