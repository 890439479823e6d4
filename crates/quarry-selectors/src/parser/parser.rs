use std::str::FromStr;

use strum_macros::EnumString;

use super::ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList,
    SimpleSelector,
};
use super::nth::parse_nth;
use crate::error::{SelectorError, SyntaxErrorKind};
use crate::tokenizer::{Token, TokenKind, Tokenizer};

/// Every pseudo-class and legacy pseudo-element name CSS3 defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
enum PseudoName {
    Root,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    Empty,
    NthChild,
    NthLastChild,
    NthOfType,
    NthLastOfType,
    Not,
    Link,
    Visited,
    Hover,
    Active,
    Focus,
    Target,
    Enabled,
    Disabled,
    Checked,
    Indeterminate,
    Lang,
    // CSS2 pseudo-elements that may be written with a single colon.
    Before,
    After,
    FirstLine,
    FirstLetter,
}

impl PseudoName {
    /// The pseudo-class this name denotes when written without arguments.
    const fn structural(self) -> Option<PseudoClass> {
        match self {
            Self::Root => Some(PseudoClass::Root),
            Self::FirstChild => Some(PseudoClass::FirstChild),
            Self::LastChild => Some(PseudoClass::LastChild),
            Self::OnlyChild => Some(PseudoClass::OnlyChild),
            Self::FirstOfType => Some(PseudoClass::FirstOfType),
            Self::LastOfType => Some(PseudoClass::LastOfType),
            Self::OnlyOfType => Some(PseudoClass::OnlyOfType),
            Self::Empty => Some(PseudoClass::Empty),
            _ => None,
        }
    }

    const fn takes_arguments(self) -> bool {
        matches!(
            self,
            Self::NthChild | Self::NthLastChild | Self::NthOfType | Self::NthLastOfType | Self::Not | Self::Lang
        )
    }

    /// Names that are valid CSS3 but depend on user interaction, navigation
    /// history, document language, or rendering.
    const fn is_unsupported(self) -> bool {
        matches!(
            self,
            Self::Link
                | Self::Visited
                | Self::Hover
                | Self::Active
                | Self::Focus
                | Self::Target
                | Self::Enabled
                | Self::Disabled
                | Self::Checked
                | Self::Indeterminate
                | Self::Lang
                | Self::Before
                | Self::After
                | Self::FirstLine
                | Self::FirstLetter
        )
    }
}

/// [Selectors Level 3 § 10.1 Grammar](https://www.w3.org/TR/selectors-3/#w3cselgrammar)
///
/// Recursive-descent parser over the token stream of a single selector group.
///
/// ```text
/// selectors_group          := S* selector (S* ',' S* selector)* S* EOF
/// selector                 := simple_selector_sequence (combinator simple_selector_sequence)*
/// combinator               := S* ('>' | '+' | '~') S* | S+
/// simple_selector_sequence := (type | universal) qualifier* | qualifier+
/// ```
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    peeked: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
            peeked: None,
        }
    }

    /// Parse the whole source as a comma-separated selector group.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, syntax, or unsupported-construct error.
    pub fn parse_selector_list(mut self) -> Result<SelectorList, SelectorError> {
        let _ = self.skip_whitespace()?;
        let mut selectors = vec![self.parse_group_member()?];

        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Comma => {
                    let _ = self.skip_whitespace()?;
                    selectors.push(self.parse_group_member()?);
                }
                TokenKind::Eof => break,
                _ => return Err(unexpected("',' or end of input", &token)),
            }
        }

        Ok(SelectorList { selectors })
    }

    /// A selector that must not be empty, e.g. after a comma.
    fn parse_group_member(&mut self) -> Result<ComplexSelector, SelectorError> {
        let token = self.peek()?;
        if matches!(token.kind, TokenKind::Comma | TokenKind::Eof) {
            return Err(SelectorError::syntax(SyntaxErrorKind::EmptySelector, token.offset));
        }
        self.parse_complex()
    }

    /// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators)
    ///
    /// Stops before a `,` or end of input, with trailing whitespace consumed.
    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let head = self.parse_compound()?;
        let mut tail = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace()?;
            let token = self.peek()?;
            let combinator = match token.kind {
                TokenKind::Comma | TokenKind::Eof => break,
                TokenKind::Greater => Combinator::Child,
                TokenKind::Plus => Combinator::NextSibling,
                TokenKind::Tilde => Combinator::SubsequentSibling,
                _ if had_whitespace => Combinator::Descendant,
                _ => return Err(unexpected("combinator, ',' or end of input", token)),
            };

            if combinator != Combinator::Descendant {
                let _ = self.next()?;
                let _ = self.skip_whitespace()?;
                let token = self.peek()?;
                if matches!(token.kind, TokenKind::Comma | TokenKind::Eof) {
                    return Err(unexpected("selector after combinator", token));
                }
            }

            tail.push((combinator, self.parse_compound()?));
        }

        Ok(ComplexSelector { head, tail })
    }

    /// [§ 3 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut simple_selectors = Vec::new();

        if let Some(element) = self.parse_type_or_universal()? {
            simple_selectors.push(element);
        }
        while let Some(qualifier) = self.parse_qualifier()? {
            simple_selectors.push(qualifier);
        }

        if simple_selectors.is_empty() {
            return Err(unexpected("simple selector", self.peek()?));
        }
        Ok(CompoundSelector { simple_selectors })
    }

    /// [§ 6.1 Type selector](https://www.w3.org/TR/selectors-3/#type-selectors)
    /// and [§ 6.2 Universal selector](https://www.w3.org/TR/selectors-3/#universal-selector).
    ///
    /// Namespace prefixes (`ns|E`, `*|E`, `|E`) are rejected.
    fn parse_type_or_universal(&mut self) -> Result<Option<SimpleSelector>, SelectorError> {
        let token = self.peek()?;
        let offset = token.offset;
        let is_pipe = token.kind == TokenKind::Pipe;
        let selector = match &token.kind {
            TokenKind::Ident(name) => Some(SimpleSelector::Type(name.clone())),
            TokenKind::Star => Some(SimpleSelector::Universal),
            _ => None,
        };
        if is_pipe {
            return Err(self.namespace_error(offset));
        }
        let Some(selector) = selector else {
            return Ok(None);
        };

        let _ = self.next()?;
        if self.peek()?.kind == TokenKind::Pipe {
            return Err(self.namespace_error(offset));
        }
        Ok(Some(selector))
    }

    /// One of `#id`, `.class`, `[attr]`, `:pseudo`, or `:not(...)`.
    fn parse_qualifier(&mut self) -> Result<Option<SimpleSelector>, SelectorError> {
        let selector = match self.peek()?.kind.clone() {
            TokenKind::Hash(id) => {
                let _ = self.next()?;
                SimpleSelector::Id(id)
            }
            TokenKind::Dot => {
                let _ = self.next()?;
                let token = self.next()?;
                match token.kind {
                    TokenKind::Ident(name) => SimpleSelector::Class(name),
                    _ => return Err(unexpected("class name after '.'", &token)),
                }
            }
            TokenKind::LeftBracket => SimpleSelector::Attribute(self.parse_attribute()?),
            TokenKind::Colon => self.parse_pseudo()?,
            _ => return Ok(None),
        };
        Ok(Some(selector))
    }

    /// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
    ///
    /// ```text
    /// attrib := '[' S* ident S* (op S* (ident | string) S*)? ']'
    /// ```
    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        let _ = self.next()?; // [
        let _ = self.skip_whitespace()?;

        let token = self.next()?;
        let name = match token.kind {
            TokenKind::Ident(name) => name,
            TokenKind::Star | TokenKind::Pipe => return Err(self.namespace_error(token.offset)),
            TokenKind::Eof => return Err(unterminated_attribute(&token)),
            _ => return Err(unexpected("attribute name", &token)),
        };
        if self.peek()?.kind == TokenKind::Pipe {
            return Err(self.namespace_error(token.offset));
        }
        let _ = self.skip_whitespace()?;

        let token = self.next()?;
        let operator: fn(String, String) -> AttributeSelector = match token.kind {
            TokenKind::RightBracket => return Ok(AttributeSelector::Exists(name)),
            TokenKind::Equals => AttributeSelector::Equals,
            TokenKind::Includes => AttributeSelector::Includes,
            TokenKind::DashMatch => AttributeSelector::DashMatch,
            TokenKind::PrefixMatch => AttributeSelector::PrefixMatch,
            TokenKind::SuffixMatch => AttributeSelector::SuffixMatch,
            TokenKind::SubstringMatch => AttributeSelector::SubstringMatch,
            TokenKind::Eof => return Err(unterminated_attribute(&token)),
            _ => return Err(unexpected("attribute operator or ']'", &token)),
        };
        let _ = self.skip_whitespace()?;

        let token = self.next()?;
        let value = match token.kind {
            TokenKind::Ident(value) | TokenKind::String(value) => value,
            TokenKind::Eof => return Err(unterminated_attribute(&token)),
            _ => return Err(unexpected("attribute value", &token)),
        };
        let _ = self.skip_whitespace()?;

        let token = self.next()?;
        match token.kind {
            TokenKind::RightBracket => Ok(operator(name, value)),
            TokenKind::Eof => Err(unterminated_attribute(&token)),
            _ => Err(unexpected("']'", &token)),
        }
    }

    /// [§ 6.6 Pseudo-classes](https://www.w3.org/TR/selectors-3/#pseudo-classes)
    /// and [§ 7 Pseudo-elements](https://www.w3.org/TR/selectors-3/#pseudo-elements).
    fn parse_pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let colon = self.next()?;

        if self.peek()?.kind == TokenKind::Colon {
            let _ = self.next()?;
            let token = self.next()?;
            return match token.kind {
                TokenKind::Ident(name) | TokenKind::Function(name) => {
                    Err(SelectorError::unsupported(format!("::{name}"), colon.offset))
                }
                _ => Err(unexpected("pseudo-element name", &token)),
            };
        }

        let token = self.next()?;
        let token_offset = token.offset;
        let (name, is_function) = match token.kind {
            TokenKind::Ident(name) => (name, false),
            TokenKind::Function(name) => (name, true),
            _ => return Err(unexpected("pseudo-class name", &token)),
        };
        let Ok(pseudo) = PseudoName::from_str(&name) else {
            return Err(SelectorError::syntax(
                SyntaxErrorKind::UnknownPseudoClass(name),
                colon.offset,
            ));
        };

        if pseudo.is_unsupported() {
            let construct = if is_function { format!(":{name}()") } else { format!(":{name}") };
            return Err(SelectorError::unsupported(construct, colon.offset));
        }
        if !is_function {
            return pseudo.structural().map(SimpleSelector::PseudoClass).ok_or_else(|| {
                SelectorError::syntax(SyntaxErrorKind::MissingArgument(name), colon.offset)
            });
        }
        if !pseudo.takes_arguments() {
            return Err(SelectorError::syntax(
                SyntaxErrorKind::UnexpectedToken {
                    expected: "pseudo-class without arguments",
                    found: TokenKind::Function(name).to_string(),
                },
                token_offset,
            ));
        }

        if pseudo == PseudoName::Not {
            return self.parse_negation(colon.offset);
        }

        let argument = self.next()?;
        let nth = match &argument.kind {
            TokenKind::NthArgument(raw) => parse_nth(raw, argument.offset)?,
            _ => return Err(unexpected("nth argument", &argument)),
        };
        self.expect_close_paren()?;

        Ok(SimpleSelector::PseudoClass(match pseudo {
            PseudoName::NthChild => PseudoClass::NthChild(nth),
            PseudoName::NthLastChild => PseudoClass::NthLastChild(nth),
            PseudoName::NthOfType => PseudoClass::NthOfType(nth),
            _ => PseudoClass::NthLastOfType(nth),
        }))
    }

    /// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    ///
    /// "Negations may not be nested; :not(:not(...)) is invalid. Note also that
    /// since pseudo-elements are not simple selectors, they are not a valid
    /// argument to :not()."
    fn parse_negation(&mut self, offset: usize) -> Result<SimpleSelector, SelectorError> {
        let _ = self.skip_whitespace()?;

        let token = self.peek()?;
        match token.kind {
            TokenKind::RightParen => {
                return Err(SelectorError::syntax(SyntaxErrorKind::InvalidNegation, token.offset));
            }
            TokenKind::Eof => {
                return Err(SelectorError::syntax(
                    SyntaxErrorKind::UnterminatedArguments,
                    token.offset,
                ));
            }
            _ => {}
        }

        let argument_offset = token.offset;
        let argument = match self.parse_type_or_universal()? {
            Some(element) => element,
            None => match self.parse_qualifier()? {
                Some(qualifier) => qualifier,
                None => return Err(unexpected("simple selector", self.peek()?)),
            },
        };
        if matches!(argument, SimpleSelector::Negation(_)) {
            return Err(SelectorError::syntax(SyntaxErrorKind::InvalidNegation, argument_offset));
        }

        let _ = self.skip_whitespace()?;
        let token = self.next()?;
        match token.kind {
            TokenKind::RightParen => Ok(SimpleSelector::Negation(Box::new(argument))),
            TokenKind::Eof => Err(SelectorError::syntax(
                SyntaxErrorKind::UnterminatedArguments,
                token.offset,
            )),
            _ => Err(SelectorError::syntax(SyntaxErrorKind::InvalidNegation, offset)),
        }
    }

    fn expect_close_paren(&mut self) -> Result<(), SelectorError> {
        let token = self.next()?;
        match token.kind {
            TokenKind::RightParen => Ok(()),
            TokenKind::Eof => Err(SelectorError::syntax(
                SyntaxErrorKind::UnterminatedArguments,
                token.offset,
            )),
            _ => Err(unexpected("')'", &token)),
        }
    }

    fn namespace_error(&self, offset: usize) -> SelectorError {
        let source = self.tokenizer.source();
        let end = source[offset..]
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | '>' | '+' | '~' | ']'))
            .map_or(source.len(), |i| offset + i);
        SelectorError::unsupported(format!("namespace prefix in '{}'", &source[offset..end]), offset)
    }

    /// Consume whitespace tokens, returning whether any were present.
    fn skip_whitespace(&mut self) -> Result<bool, SelectorError> {
        let mut skipped = false;
        while self.peek()?.kind == TokenKind::Whitespace {
            let _ = self.next()?;
            skipped = true;
        }
        Ok(skipped)
    }

    fn peek(&mut self) -> Result<&Token<'a>, SelectorError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.tokenizer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn next(&mut self) -> Result<Token<'a>, SelectorError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.tokenizer.next_token(),
        }
    }
}

fn unexpected(expected: &'static str, token: &Token<'_>) -> SelectorError {
    SelectorError::syntax(
        SyntaxErrorKind::UnexpectedToken {
            expected,
            found: token.kind.to_string(),
        },
        token.offset,
    )
}

fn unterminated_attribute(eof: &Token<'_>) -> SelectorError {
    SelectorError::syntax(SyntaxErrorKind::UnterminatedAttribute, eof.offset)
}
