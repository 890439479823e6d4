//! Selector tokenizer.

/// Token types of the selector grammar.
pub mod token;
/// Tokenizer implementation.
#[allow(clippy::module_inception)]
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, tokenize};
