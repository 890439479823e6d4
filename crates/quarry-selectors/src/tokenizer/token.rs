use std::fmt;

/// A token together with the source text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// What the token is.
    pub kind: TokenKind,
    /// The literal source slice, escapes and quotes included.
    pub text: &'a str,
    /// Byte offset of the first character of `text`.
    pub offset: usize,
}

impl Token<'_> {
    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// [Selectors Level 3 § 10.2 Lexical scanner](https://www.w3.org/TR/selectors-3/#lex)
///
/// Token types of the selector grammar. Identifier-like values have their
/// escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `ident`
    Ident(String),
    /// `ident` immediately followed by `(`. The value excludes the parenthesis.
    Function(String),
    /// `#name`. The value excludes the `#`.
    Hash(String),
    /// A quoted string. The value excludes the quotes.
    String(String),
    /// Raw argument text of an `nth-*` pseudo-class, up to the closing parenthesis.
    NthArgument(String),
    /// `.`
    Dot,
    /// `*`
    Star,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `)`
    RightParen,
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `>`
    Greater,
    /// `+`
    Plus,
    /// `~`
    Tilde,
    /// `|`
    Pipe,
    /// One or more whitespace characters.
    Whitespace,
    /// Any other single character.
    Delim(char),
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::Function(name) => write!(f, "function '{name}('"),
            Self::Hash(name) => write!(f, "'#{name}'"),
            Self::String(value) => write!(f, "string \"{value}\""),
            Self::NthArgument(raw) => write!(f, "argument '{raw}'"),
            Self::Dot => f.write_str("'.'"),
            Self::Star => f.write_str("'*'"),
            Self::Colon => f.write_str("':'"),
            Self::Comma => f.write_str("','"),
            Self::LeftBracket => f.write_str("'['"),
            Self::RightBracket => f.write_str("']'"),
            Self::RightParen => f.write_str("')'"),
            Self::Equals => f.write_str("'='"),
            Self::Includes => f.write_str("'~='"),
            Self::DashMatch => f.write_str("'|='"),
            Self::PrefixMatch => f.write_str("'^='"),
            Self::SuffixMatch => f.write_str("'$='"),
            Self::SubstringMatch => f.write_str("'*='"),
            Self::Greater => f.write_str("'>'"),
            Self::Plus => f.write_str("'+'"),
            Self::Tilde => f.write_str("'~'"),
            Self::Pipe => f.write_str("'|'"),
            Self::Whitespace => f.write_str("whitespace"),
            Self::Delim(c) => write!(f, "'{c}'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}
