//! CSS3 selector compilation and matching for Quarry.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Identifiers, hashes, and strings with escape sequences
//!   - Attribute operators and combinators
//!   - Comment handling
//!   - Raw `an+b` arguments for the `nth-*` pseudo-classes
//!
//! - **Selector Parser** ([Selectors Level 3 § 10](https://www.w3.org/TR/selectors-3/#w3cselgrammar))
//!   - Selector groups, combinators, and compound selectors
//!   - Type, universal, ID, class, and attribute selectors
//!   - Structural pseudo-classes and `:not()`
//!
//! - **Matching** ([Selectors Level 3](https://www.w3.org/TR/selectors-3/))
//!   - Selectors compiled into composable [`Selector`] values via [`ElementOps`]
//!   - Results de-duplicated and in document order
//!   - Any tree model through [`TreeAdapter`]; [`quarry_dom::DomTree`] supported out of the box
//!
//! # Not Supported
//!
//! - Namespace prefixes
//! - Pseudo-elements
//! - Dynamic and UI pseudo-classes (`:hover`, `:checked`, ...) and `:lang()`
//!
//! These are rejected at compile time with [`SelectorError::Unsupported`].
//!
//! # Example
//!
//! ```
//! use quarry_dom::DomTree;
//! use quarry_selectors::compile;
//!
//! let mut tree = DomTree::new();
//! let root = tree.root();
//! let list = tree.append_element(root, "ul", &[]);
//! let first = tree.append_element(list, "li", &[("class", "item")]);
//! let _second = tree.append_element(list, "li", &[]);
//!
//! let selector = compile::<DomTree>("li.item:first-child").unwrap();
//! assert_eq!(selector.select(&tree, &root), vec![first]);
//! ```

/// Tree adapters.
pub mod adapter;
/// Compile errors.
pub mod error;
/// AST to selector translation.
pub mod generator;
/// Primitive selector operations.
pub mod ops;
/// Matching configuration.
pub mod options;
/// Selector parser.
pub mod parser;
/// Compiled selectors.
pub mod selector;
/// Selector tokenizer.
pub mod tokenizer;

pub use adapter::TreeAdapter;
pub use error::{ErrorCategory, LexicalErrorKind, SelectorError, SyntaxErrorKind};
pub use generator::generate;
pub use ops::{ElementOps, StandardOps};
pub use options::{CaseSensitivity, MatchOptions};
pub use parser::{SelectorList, parse};
pub use selector::Selector;
pub use tokenizer::{Token, TokenKind, Tokenizer, tokenize};

/// Compile `source` with HTML matching conventions.
///
/// # Errors
///
/// Returns the first lexical, syntax, or unsupported-construct error.
pub fn compile<A: TreeAdapter>(source: &str) -> Result<Selector<A>, SelectorError> {
    compile_with(source, &MatchOptions::default())
}

/// Compile `source` with the given matching options.
///
/// # Errors
///
/// Returns the first lexical, syntax, or unsupported-construct error.
pub fn compile_with<A: TreeAdapter>(source: &str, options: &MatchOptions) -> Result<Selector<A>, SelectorError> {
    compile_with_ops(source, &StandardOps::new(*options))
}

/// Compile `source` against a custom set of element operations.
///
/// # Errors
///
/// Returns the first lexical, syntax, or unsupported-construct error.
pub fn compile_with_ops<A, O>(source: &str, ops: &O) -> Result<Selector<A>, SelectorError>
where
    A: TreeAdapter,
    O: ElementOps<A> + ?Sized,
{
    let list = parse(source)?;
    Ok(generate(&list, ops))
}
