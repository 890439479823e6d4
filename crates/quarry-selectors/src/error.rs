//! Errors raised while compiling a selector.
//!
//! Every error carries the byte offset into the selector source at which the
//! problem was detected. Compilation stops at the first error.

use strum_macros::Display;
use thiserror::Error;

/// An error produced while tokenizing or parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The source could not be split into tokens.
    #[error("{kind} at offset {offset}")]
    Lexical {
        /// What went wrong.
        kind: LexicalErrorKind,
        /// Byte offset of the offending input.
        offset: usize,
    },

    /// The tokens do not form a valid selector.
    #[error("{kind} at offset {offset}")]
    Syntax {
        /// What went wrong.
        kind: SyntaxErrorKind,
        /// Byte offset of the offending token.
        offset: usize,
    },

    /// The selector is valid CSS but cannot be evaluated against a static tree.
    #[error("unsupported selector {construct} at offset {offset}")]
    Unsupported {
        /// The construct as written, e.g. `::before` or `:hover`.
        construct: String,
        /// Byte offset of the construct.
        offset: usize,
    },
}

impl SelectorError {
    /// Byte offset into the selector source.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Lexical { offset, .. } | Self::Syntax { offset, .. } | Self::Unsupported { offset, .. } => {
                *offset
            }
        }
    }

    /// The class of error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Lexical { .. } => ErrorCategory::Lexical,
            Self::Syntax { .. } => ErrorCategory::Syntax,
            Self::Unsupported { .. } => ErrorCategory::Unsupported,
        }
    }

    pub(crate) const fn lexical(kind: LexicalErrorKind, offset: usize) -> Self {
        Self::Lexical { kind, offset }
    }

    pub(crate) const fn syntax(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self::Syntax { kind, offset }
    }

    pub(crate) fn unsupported(construct: impl Into<String>, offset: usize) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            offset,
        }
    }
}

/// Coarse classification of a [`SelectorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorCategory {
    /// Tokenizer failure.
    Lexical,
    /// Parser failure.
    Syntax,
    /// Valid but unsupported construct.
    Unsupported,
}

/// Tokenizer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexicalErrorKind {
    /// End of input or a raw newline before the closing quote.
    #[error("unterminated string")]
    UnterminatedString,

    /// A backslash followed by a newline outside a string, or at end of input.
    #[error("invalid escape")]
    InvalidEscape,

    /// `/*` without a matching `*/`.
    #[error("unterminated comment")]
    UnterminatedComment,
}

/// Parser failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// A token appeared where something else was required.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what the grammar allows here.
        expected: &'static str,
        /// Description of the token actually found.
        found: String,
    },

    /// The selector, or one member of a comma group, is empty.
    #[error("empty selector")]
    EmptySelector,

    /// End of input inside `[...]`.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    /// End of input inside a functional pseudo-class.
    #[error("unterminated argument list")]
    UnterminatedArguments,

    /// A pseudo-class name that CSS3 does not define.
    #[error("unknown pseudo-class ':{0}'")]
    UnknownPseudoClass(String),

    /// A functional pseudo-class written without its argument list.
    #[error("pseudo-class ':{0}' requires an argument")]
    MissingArgument(String),

    /// The argument of an `nth-*` pseudo-class is not of the form `an+b`.
    #[error("malformed nth argument '{0}'")]
    MalformedNth(String),

    /// `:not()` is empty, nested, or holds more than one simple selector.
    #[error(":not() takes exactly one simple selector")]
    InvalidNegation,
}
