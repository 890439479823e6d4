//! Selector syntax tree.
//!
//! The tree is purely syntactic: it is produced by the parser, consumed by the
//! generator, and never refers to elements.

use strum_macros::Display;

/// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The selectors in source order. Never empty.
    pub selectors: Vec<ComplexSelector>,
}

/// [§ 3 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
///
/// "A selector is a chain of one or more sequences of simple selectors
/// separated by combinators."
///
/// Example: `div.container > ul li` is stored left to right as
/// ```text
/// head: [div.container]  tail: [(Child, [ul]), (Descendant, [li])]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The leftmost compound selector.
    pub head: CompoundSelector,
    /// The remaining (combinator, compound) pairs in source order.
    pub tail: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// "The elements of a document tree that are represented by a selector are
    /// the subjects of the selector": the last compound selector.
    #[must_use]
    pub fn subject(&self) -> &CompoundSelector {
        self.tail.last().map_or(&self.head, |(_, compound)| compound)
    }

    /// Check if this selector has no combinators.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.tail.is_empty()
    }
}

/// [§ 3 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
///
/// "A sequence of simple selectors is a chain of simple selectors that are not
/// separated by a combinator. It always begins with a type selector or a
/// universal selector."
///
/// When the type selector is omitted the universal selector is implied, so the
/// list holds only the qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors in source order. Never empty.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Combinator {
    /// [§ 8.1 Descendant combinator](https://www.w3.org/TR/selectors-3/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two sequences of
    /// simple selectors."
    #[strum(serialize = " ")]
    Descendant,

    /// [§ 8.2 Child combinators](https://www.w3.org/TR/selectors-3/#child-combinators)
    /// "A child combinator describes a childhood relationship between two
    /// elements. A child combinator is made of the 'greater-than sign' (U+003E, >)."
    #[strum(serialize = ">")]
    Child,

    /// [§ 8.3.1 Next-sibling combinator](https://www.w3.org/TR/selectors-3/#adjacent-sibling-combinators)
    /// "The elements represented by the two sequences share the same parent in
    /// the document tree and the element represented by the first sequence
    /// immediately precedes the element represented by the second one."
    #[strum(serialize = "+")]
    NextSibling,

    /// [§ 8.3.2 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-3/#general-sibling-combinators)
    /// "The elements represented by the two sequences share the same parent in
    /// the document tree and the element represented by the first sequence
    /// precedes (not necessarily immediately) the element represented by the
    /// second one."
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// [§ 6 Simple selectors](https://www.w3.org/TR/selectors-3/#simple-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 6.1 Type selector](https://www.w3.org/TR/selectors-3/#type-selectors)
    /// "A type selector is the name of a document language element type written
    /// using the syntax of CSS qualified names."
    ///
    /// Examples: `div`, `p`, `h1`
    Type(String),

    /// [§ 6.2 Universal selector](https://www.w3.org/TR/selectors-3/#universal-selector)
    /// "The universal selector, written as a CSS qualified name with an asterisk
    /// as the local name, represents the qualified name of any element type."
    Universal,

    /// [§ 6.5 ID selectors](https://www.w3.org/TR/selectors-3/#id-selectors)
    ///
    /// Example: `#main`
    Id(String),

    /// [§ 6.4 Class selectors](https://www.w3.org/TR/selectors-3/#class-html)
    ///
    /// Example: `.nav-item`
    Class(String),

    /// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
    Attribute(AttributeSelector),

    /// [§ 6.6 Pseudo-classes](https://www.w3.org/TR/selectors-3/#pseudo-classes)
    PseudoClass(PseudoClass),

    /// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    /// "The negation pseudo-class, :not(X), is a functional notation taking a
    /// simple selector (excluding the negation pseudo-class itself) as an argument."
    Negation(Box<SimpleSelector>),
}

/// Attribute selectors per [§ 6.3.1](https://www.w3.org/TR/selectors-3/#attribute-representation)
/// and [§ 6.3.2](https://www.w3.org/TR/selectors-3/#attribute-substrings).
///
/// Each variant holds the attribute name, then the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[att]` "Represents an element with the att attribute, whatever the
    /// value of the attribute."
    Exists(String),

    /// `[att=val]` "Represents an element with the att attribute whose value is
    /// exactly 'val'."
    Equals(String, String),

    /// `[att~=val]` "Represents an element with the att attribute whose value is
    /// a whitespace-separated list of words, one of which is exactly 'val'."
    Includes(String, String),

    /// `[att|=val]` "Represents an element with the att attribute, its value
    /// either being exactly 'val' or beginning with 'val' immediately followed
    /// by '-' (U+002D)."
    DashMatch(String, String),

    /// `[att^=val]` "Represents an element with the att attribute whose value
    /// begins with the prefix 'val'."
    PrefixMatch(String, String),

    /// `[att$=val]` "Represents an element with the att attribute whose value
    /// ends with the suffix 'val'."
    SuffixMatch(String, String),

    /// `[att*=val]` "Represents an element with the att attribute whose value
    /// contains at least one instance of the substring 'val'."
    SubstringMatch(String, String),
}

/// [§ 6.6.5 Structural pseudo-classes](https://www.w3.org/TR/selectors-3/#structural-pseudos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// `:root` "represents an element that is the root of the document."
    Root,
    /// `:first-child`, same as `:nth-child(1)`.
    FirstChild,
    /// `:last-child`, same as `:nth-last-child(1)`.
    LastChild,
    /// `:only-child`, same as `:first-child:last-child`.
    OnlyChild,
    /// `:first-of-type`, same as `:nth-of-type(1)`.
    FirstOfType,
    /// `:last-of-type`, same as `:nth-last-of-type(1)`.
    LastOfType,
    /// `:only-of-type`, same as `:first-of-type:last-of-type`.
    OnlyOfType,
    /// `:empty` "represents an element that has no children at all."
    Empty,
    /// `:nth-child(an+b)`
    NthChild(Nth),
    /// `:nth-last-child(an+b)`
    NthLastChild(Nth),
    /// `:nth-of-type(an+b)`
    NthOfType(Nth),
    /// `:nth-last-of-type(an+b)`
    NthLastOfType(Nth),
}

/// The `an+b` argument of the `nth-*` pseudo-classes.
///
/// [§ 6.6.5.2 :nth-child()](https://www.w3.org/TR/selectors-3/#nth-child-pseudo)
///
/// "The :nth-child(an+b) pseudo-class notation represents an element that has
/// an+b-1 siblings before it in the document tree, for any positive integer or
/// zero value of n."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nth {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
}

impl Nth {
    /// Create an `an+b` pair.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Whether the 1-based `position` equals `a*n + b` for some `n >= 0`.
    #[must_use]
    pub fn matches(self, position: usize) -> bool {
        let Ok(position) = i64::try_from(position) else {
            return false;
        };
        let (a, b) = (i64::from(self.a), i64::from(self.b));
        if a == 0 {
            return position == b;
        }
        let diff = position - b;
        diff % a == 0 && diff / a >= 0
    }
}
