use super::token::{Token, TokenKind};
use crate::error::{LexicalErrorKind, SelectorError};

/// Functional pseudo-classes whose argument is returned as a single
/// [`TokenKind::NthArgument`] token.
const NTH_FUNCTIONS: [&str; 4] = ["nth-child", "nth-last-child", "nth-of-type", "nth-last-of-type"];

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Lazy tokenizer over a selector string. Positions are byte offsets into the
/// source. Iteration yields tokens up to and including [`TokenKind::Eof`], or
/// stops after the first error.
pub struct Tokenizer<'a> {
    /// The selector source
    input: &'a str,
    /// Byte offset of the next unconsumed character
    position: usize,
    /// Set after an nth function token; the next token is its raw argument
    raw_argument: bool,
    /// Set once EOF or an error has been yielded
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            raw_argument: false,
            done: false,
        }
    }

    /// The selector source being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Returns [`TokenKind::Eof`] repeatedly once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError::Lexical`] for unterminated strings and
    /// comments and for invalid escapes.
    pub fn next_token(&mut self) -> Result<Token<'a>, SelectorError> {
        if self.raw_argument {
            self.raw_argument = false;
            return Ok(self.consume_nth_argument());
        }

        // "Consume comments."
        self.consume_comments()?;

        let start = self.position;
        if self.would_start_ident_sequence() {
            let kind = self.consume_ident_like()?;
            return Ok(self.token(kind, start));
        }

        let Some(c) = self.consume() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        let kind = match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Whitespace
            }
            '"' | '\'' => self.consume_string(c, start)?,
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    TokenKind::Hash(self.consume_ident_sequence()?)
                } else {
                    TokenKind::Delim('#')
                }
            }
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ')' => TokenKind::RightParen,
            '=' => TokenKind::Equals,
            '>' => TokenKind::Greater,
            '+' => TokenKind::Plus,
            '*' if self.consume_if('=') => TokenKind::SubstringMatch,
            '*' => TokenKind::Star,
            '~' if self.consume_if('=') => TokenKind::Includes,
            '~' => TokenKind::Tilde,
            '|' if self.consume_if('=') => TokenKind::DashMatch,
            '|' => TokenKind::Pipe,
            '^' if self.consume_if('=') => TokenKind::PrefixMatch,
            '$' if self.consume_if('=') => TokenKind::SuffixMatch,
            // A backslash that does not start an ident sequence is followed by
            // a newline or by nothing at all.
            '\\' => {
                return Err(SelectorError::lexical(LexicalErrorKind::InvalidEscape, start));
            }
            other => TokenKind::Delim(other),
        };
        Ok(self.token(kind, start))
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        let input = self.input;
        Token {
            kind,
            text: &input[start..self.position],
            offset: start,
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Unlike stylesheet tokenization, a comment running to end of input is an error.
    fn consume_comments(&mut self) -> Result<(), SelectorError> {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let start = self.position;
            let body = &self.input[start + 2..];
            match body.find("*/") {
                Some(end) => self.position = start + 2 + end + 2,
                None => {
                    return Err(SelectorError::lexical(LexicalErrorKind::UnterminatedComment, start));
                }
            }
        }
        Ok(())
    }

    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Where the CSS tokenizer would recover with a `<bad-string-token>`, this
    /// reports [`LexicalErrorKind::UnterminatedString`] at the opening quote.
    fn consume_string(&mut self, quote: char, start: usize) -> Result<TokenKind, SelectorError> {
        let unterminated = || SelectorError::lexical(LexicalErrorKind::UnterminatedString, start);
        let mut value = String::new();

        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(TokenKind::String(value)),
                None => return Err(unterminated()),
                Some(c) if is_newline(c) => return Err(unterminated()),
                Some('\\') => match self.peek() {
                    None => return Err(unterminated()),
                    // "Otherwise, if the next input code point is a newline, consume it."
                    Some(c) if is_newline(c) => {
                        let _ = self.consume();
                        if c == '\r' {
                            let _ = self.consume_if('\n');
                        }
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like(&mut self) -> Result<TokenKind, SelectorError> {
        let name = self.consume_ident_sequence()?;
        if self.consume_if('(') {
            if NTH_FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
                self.raw_argument = true;
            }
            return Ok(TokenKind::Function(name));
        }
        Ok(TokenKind::Ident(name))
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> Result<String, SelectorError> {
        let mut result = String::new();

        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }
                Some('\\') => {
                    if !is_valid_escape(Some('\\'), self.peek_at(1)) {
                        return Err(SelectorError::lexical(
                            LexicalErrorKind::InvalidEscape,
                            self.position,
                        ));
                    }
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }
                _ => return Ok(result),
            }
        }
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Assumes the backslash has been consumed and a valid escape follows.
    fn consume_escaped_code_point(&mut self) -> char {
        let Some(c) = self.consume() else {
            return REPLACEMENT_CHARACTER;
        };
        let Some(first_digit) = c.to_digit(16) else {
            // "anything else: Return the current input code point."
            return c;
        };

        // "Consume as many hex digits as possible, but no more than 5."
        let mut code_point = first_digit;
        for _ in 0..5 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    let _ = self.consume();
                    code_point = code_point * 16 + digit;
                }
                None => break,
            }
        }

        // "If the next input code point is whitespace, consume it as well."
        if self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }

        // "If this number is zero, or is for a surrogate, or is greater than the
        // maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
        if code_point == 0 {
            return REPLACEMENT_CHARACTER;
        }
        char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER)
    }

    /// Everything up to (not including) the next `)`, or to end of input.
    fn consume_nth_argument(&mut self) -> Token<'a> {
        let input = self.input;
        let start = self.position;
        let end = input[start..].find(')').map_or(input.len(), |i| start + i);
        self.position = end;
        let text = &input[start..end];
        Token {
            kind: TokenKind::NthArgument(text.to_string()),
            text,
            offset: start,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        match self.peek() {
            // "If the second code point is an ident-start code point or a U+002D
            // HYPHEN-MINUS, or the second and third code points are a valid
            // escape, return true."
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(|c| is_ident_start_code_point(c) || c == '-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            Some(c) => is_ident_start_code_point(c),
            None => false,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, SelectorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        self.done = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Tokenize a whole selector, ending with [`TokenKind::Eof`].
///
/// # Errors
///
/// Returns the first lexical error encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SelectorError> {
    Tokenizer::new(input).collect()
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
///
/// A backslash at end of input is treated as invalid.
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second.is_some_and(|c| !is_newline(c))
}

/// [§ 4.2 Definitions - newline](https://www.w3.org/TR/css-syntax-3/#newline)
const fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
