//! Translation from the syntax tree into calls on [`ElementOps`].
//!
//! Each compound selector becomes a chain of filters, each combinator an
//! expansion between them, and a comma group a union:
//!
//! ```text
//! ul > li.item, p  ==  union(ul . child . li . .item,  p)
//! ```

use crate::adapter::TreeAdapter;
use crate::ops::ElementOps;
use crate::parser::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList,
    SimpleSelector,
};
use crate::selector::Selector;

/// Build the selector for a whole selector group.
pub fn generate<A, O>(list: &SelectorList, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    Selector::union(list.selectors.iter().map(|complex| generate_complex(complex, ops)))
}

fn generate_complex<A, O>(complex: &ComplexSelector, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    complex
        .tail
        .iter()
        .fold(generate_compound(&complex.head, ops), |selector, (combinator, compound)| {
            let step = match combinator {
                Combinator::Descendant => ops.descendant(),
                Combinator::Child => ops.child(),
                Combinator::NextSibling => ops.adjacent(),
                Combinator::SubsequentSibling => ops.general_sibling(),
            };
            selector.then(&step).then(&generate_compound(compound, ops))
        })
}

fn generate_compound<A, O>(compound: &CompoundSelector, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    compound
        .simple_selectors
        .iter()
        .map(|simple| generate_simple(simple, ops))
        .reduce(|selector, next| selector.then(&next))
        .unwrap_or_else(|| ops.universal())
}

fn generate_simple<A, O>(simple: &SimpleSelector, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    match simple {
        SimpleSelector::Type(name) => ops.type_selector(name),
        SimpleSelector::Universal => ops.universal(),
        SimpleSelector::Id(id) => ops.id(id),
        SimpleSelector::Class(class) => ops.class(class),
        SimpleSelector::Attribute(attribute) => generate_attribute(attribute, ops),
        SimpleSelector::PseudoClass(pseudo) => generate_pseudo_class(*pseudo, ops),
        SimpleSelector::Negation(inner) => ops.negation(generate_simple(inner, ops)),
    }
}

fn generate_attribute<A, O>(attribute: &AttributeSelector, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    match attribute {
        AttributeSelector::Exists(name) => ops.attribute_exists(name),
        AttributeSelector::Equals(name, value) => ops.attribute_exact(name, value),
        AttributeSelector::Includes(name, value) => ops.attribute_includes(name, value),
        AttributeSelector::DashMatch(name, value) => ops.attribute_dash_match(name, value),
        AttributeSelector::PrefixMatch(name, value) => ops.attribute_prefix(name, value),
        AttributeSelector::SuffixMatch(name, value) => ops.attribute_suffix(name, value),
        AttributeSelector::SubstringMatch(name, value) => ops.attribute_substring(name, value),
    }
}

fn generate_pseudo_class<A, O>(pseudo: PseudoClass, ops: &O) -> Selector<A>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    match pseudo {
        PseudoClass::Root => ops.root(),
        PseudoClass::FirstChild => ops.first_child(),
        PseudoClass::LastChild => ops.last_child(),
        PseudoClass::OnlyChild => ops.only_child(),
        PseudoClass::FirstOfType => ops.first_of_type(),
        PseudoClass::LastOfType => ops.last_of_type(),
        PseudoClass::OnlyOfType => ops.only_of_type(),
        PseudoClass::Empty => ops.empty(),
        PseudoClass::NthChild(nth) => ops.nth_child(nth.a, nth.b),
        PseudoClass::NthLastChild(nth) => ops.nth_last_child(nth.a, nth.b),
        PseudoClass::NthOfType(nth) => ops.nth_of_type(nth.a, nth.b),
        PseudoClass::NthLastOfType(nth) => ops.nth_last_of_type(nth.a, nth.b),
    }
}
