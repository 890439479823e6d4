//! Selector parser module.

/// Selector syntax tree.
pub mod ast;
/// `an+b` argument parsing.
pub mod nth;
/// Recursive-descent parser per [Selectors Level 3 § 10](https://www.w3.org/TR/selectors-3/#w3cselgrammar).
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Nth, PseudoClass, SelectorList,
    SimpleSelector,
};
pub use nth::parse_nth;
pub use parser::Parser;

use crate::error::SelectorError;

/// Parse a selector group into its syntax tree.
///
/// # Errors
///
/// Returns the first lexical, syntax, or unsupported-construct error.
pub fn parse(source: &str) -> Result<SelectorList, SelectorError> {
    Parser::new(source).parse_selector_list()
}
