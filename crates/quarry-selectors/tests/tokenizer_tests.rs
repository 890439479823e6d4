//! Integration tests for the selector tokenizer.

use quarry_selectors::tokenizer::{Token, TokenKind, Tokenizer, tokenize};
use quarry_selectors::{LexicalErrorKind, SelectorError};

/// Helper to tokenize a string and return the token kinds
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn lexical_error(input: &str) -> (LexicalErrorKind, usize) {
    match tokenize(input) {
        Err(SelectorError::Lexical { kind, offset }) => (kind, offset),
        other => panic!("expected a lexical error for {input:?}, got {other:?}"),
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

#[test]
fn test_ident() {
    assert_eq!(kinds("div"), vec![ident("div"), TokenKind::Eof]);
}

#[test]
fn test_ident_with_hyphen_and_underscore() {
    assert_eq!(kinds("-my_class"), vec![ident("-my_class"), TokenKind::Eof]);
    assert_eq!(kinds("--custom"), vec![ident("--custom"), TokenKind::Eof]);
}

#[test]
fn test_lone_hyphen_is_delim() {
    assert_eq!(kinds("-"), vec![TokenKind::Delim('-'), TokenKind::Eof]);
}

#[test]
fn test_hash() {
    assert_eq!(
        kinds("#main-nav"),
        vec![TokenKind::Hash("main-nav".to_string()), TokenKind::Eof]
    );
    // A bare '#' is just a delimiter.
    assert_eq!(kinds("# "), vec![TokenKind::Delim('#'), TokenKind::Whitespace, TokenKind::Eof]);
}

#[test]
fn test_class_and_universal() {
    assert_eq!(
        kinds("*.note"),
        vec![TokenKind::Star, TokenKind::Dot, ident("note"), TokenKind::Eof]
    );
}

#[test]
fn test_attribute_operators() {
    assert_eq!(
        kinds("[a=b][a~=b][a|=b][a^=b][a$=b][a*=b]")
            .into_iter()
            .filter(|kind| !matches!(kind, TokenKind::Ident(_) | TokenKind::LeftBracket | TokenKind::RightBracket))
            .collect::<Vec<_>>(),
        vec![
            TokenKind::Equals,
            TokenKind::Includes,
            TokenKind::DashMatch,
            TokenKind::PrefixMatch,
            TokenKind::SuffixMatch,
            TokenKind::SubstringMatch,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_combinators() {
    assert_eq!(
        kinds("a > b + c ~ d"),
        vec![
            ident("a"),
            TokenKind::Whitespace,
            TokenKind::Greater,
            TokenKind::Whitespace,
            ident("b"),
            TokenKind::Whitespace,
            TokenKind::Plus,
            TokenKind::Whitespace,
            ident("c"),
            TokenKind::Whitespace,
            TokenKind::Tilde,
            TokenKind::Whitespace,
            ident("d"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_pipe_and_comma() {
    assert_eq!(
        kinds("svg|rect,p"),
        vec![ident("svg"), TokenKind::Pipe, ident("rect"), TokenKind::Comma, ident("p"), TokenKind::Eof]
    );
}

#[test]
fn test_string_double_quote() {
    assert_eq!(
        kinds(r#""hello world""#),
        vec![TokenKind::String("hello world".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_string_single_quote_with_escapes() {
    assert_eq!(
        kinds(r"'it\'s \41 b'"),
        vec![TokenKind::String("it's Ab".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_string_line_continuation() {
    assert_eq!(
        kinds("\"a\\\nb\""),
        vec![TokenKind::String("ab".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_escaped_identifier() {
    // "\31 0" is the identifier "10"; "\:" escapes the colon.
    assert_eq!(kinds(r"\31 0"), vec![ident("10"), TokenKind::Eof]);
    assert_eq!(kinds(r"a\:b"), vec![ident("a:b"), TokenKind::Eof]);
}

#[test]
fn test_escape_of_null_is_replacement_character() {
    assert_eq!(kinds(r"\0"), vec![ident("\u{FFFD}"), TokenKind::Eof]);
}

#[test]
fn test_function_and_raw_nth_argument() {
    assert_eq!(
        kinds(":nth-child( 2n + 1 )"),
        vec![
            TokenKind::Colon,
            TokenKind::Function("nth-child".to_string()),
            TokenKind::NthArgument(" 2n + 1 ".to_string()),
            TokenKind::RightParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_not_argument_is_tokenized_normally() {
    assert_eq!(
        kinds(":not(.a)"),
        vec![
            TokenKind::Colon,
            TokenKind::Function("not".to_string()),
            TokenKind::Dot,
            ident("a"),
            TokenKind::RightParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comment_is_skipped() {
    assert_eq!(kinds("a/* note */.b"), vec![ident("a"), TokenKind::Dot, ident("b"), TokenKind::Eof]);
}

#[test]
fn test_offsets_and_source_text() {
    let tokens = tokenize("ul  > li").unwrap();
    let summary: Vec<(&str, usize)> = tokens.iter().map(|token| (token.text, token.offset)).collect();
    assert_eq!(
        summary,
        vec![("ul", 0), ("  ", 2), (">", 4), (" ", 5), ("li", 6), ("", 8)]
    );
}

#[test]
fn test_offsets_are_bytes() {
    let tokens = tokenize("é.x").unwrap();
    assert_eq!(tokens[1].offset, 2);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(lexical_error(r#"[a="abc"#), (LexicalErrorKind::UnterminatedString, 3));
    assert_eq!(lexical_error("'a\nb'"), (LexicalErrorKind::UnterminatedString, 0));
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(lexical_error("a /* open"), (LexicalErrorKind::UnterminatedComment, 2));
}

#[test]
fn test_invalid_escape() {
    assert_eq!(lexical_error("a\\"), (LexicalErrorKind::InvalidEscape, 1));
    assert_eq!(lexical_error("\\\nx"), (LexicalErrorKind::InvalidEscape, 0));
}

#[test]
fn test_iterator_stops_after_eof() {
    let tokens: Vec<Token<'_>> = Tokenizer::new("a").map(Result::unwrap).collect();
    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].is_eof());
}

#[test]
fn test_iterator_stops_after_error() {
    let results: Vec<_> = Tokenizer::new("a 'oops").collect();
    assert_eq!(results.len(), 3);
    assert!(results[2].is_err());
}
