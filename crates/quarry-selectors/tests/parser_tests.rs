//! Integration tests for selector parsing and compile errors.

use quarry_selectors::parser::{
    AttributeSelector, Combinator, Nth, PseudoClass, SelectorList, SimpleSelector, parse,
};
use quarry_selectors::{ErrorCategory, SelectorError, SyntaxErrorKind};

fn parse_ok(source: &str) -> SelectorList {
    parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
}

/// The simple selectors of the single compound in `source`.
fn simple(source: &str) -> Vec<SimpleSelector> {
    let list = parse_ok(source);
    assert_eq!(list.selectors.len(), 1);
    assert!(list.selectors[0].is_simple());
    list.selectors[0].head.simple_selectors.clone()
}

fn syntax_error(source: &str) -> (SyntaxErrorKind, usize) {
    match parse(source) {
        Err(SelectorError::Syntax { kind, offset }) => (kind, offset),
        other => panic!("expected a syntax error for {source:?}, got {other:?}"),
    }
}

fn unsupported(source: &str) -> (String, usize) {
    match parse(source) {
        Err(SelectorError::Unsupported { construct, offset }) => (construct, offset),
        other => panic!("expected an unsupported error for {source:?}, got {other:?}"),
    }
}

#[test]
fn test_parse_type_selector() {
    assert_eq!(simple("body"), vec![SimpleSelector::Type("body".to_string())]);
}

#[test]
fn test_parse_class_and_id() {
    assert_eq!(
        simple(".highlight#main-content"),
        vec![
            SimpleSelector::Class("highlight".to_string()),
            SimpleSelector::Id("main-content".to_string()),
        ]
    );
}

#[test]
fn test_parse_universal_selector() {
    assert_eq!(simple("*"), vec![SimpleSelector::Universal]);
}

#[test]
fn test_parse_compound_selector() {
    let selectors = simple("div.item:first-child");
    assert_eq!(
        selectors,
        vec![
            SimpleSelector::Type("div".to_string()),
            SimpleSelector::Class("item".to_string()),
            SimpleSelector::PseudoClass(PseudoClass::FirstChild),
        ]
    );
}

#[test]
fn test_parse_attribute_selectors() {
    let cases = [
        ("[href]", AttributeSelector::Exists("href".to_string())),
        ("[type=text]", AttributeSelector::Equals("type".to_string(), "text".to_string())),
        ("[class~=\"a\"]", AttributeSelector::Includes("class".to_string(), "a".to_string())),
        ("[lang|=en]", AttributeSelector::DashMatch("lang".to_string(), "en".to_string())),
        ("[href^='https']", AttributeSelector::PrefixMatch("href".to_string(), "https".to_string())),
        ("[src$=\".png\"]", AttributeSelector::SuffixMatch("src".to_string(), ".png".to_string())),
        ("[ data-x *= dark ]", AttributeSelector::SubstringMatch("data-x".to_string(), "dark".to_string())),
    ];
    for (source, expected) in cases {
        assert_eq!(simple(source), vec![SimpleSelector::Attribute(expected)], "{source}");
    }
}

#[test]
fn test_parse_combinators_left_to_right() {
    let list = parse_ok("div.container > ul li + a ~ span");
    let complex = &list.selectors[0];
    assert_eq!(complex.head.simple_selectors.len(), 2);

    let combinators: Vec<Combinator> = complex.tail.iter().map(|(combinator, _)| *combinator).collect();
    assert_eq!(
        combinators,
        vec![
            Combinator::Child,
            Combinator::Descendant,
            Combinator::NextSibling,
            Combinator::SubsequentSibling,
        ]
    );
    assert_eq!(
        complex.subject().simple_selectors,
        vec![SimpleSelector::Type("span".to_string())]
    );
}

#[test]
fn test_combinator_display() {
    assert_eq!(Combinator::Child.to_string(), ">");
    assert_eq!(Combinator::Descendant.to_string(), " ");
}

#[test]
fn test_parse_group() {
    let list = parse_ok("  h1 , h2,h3  ");
    assert_eq!(list.selectors.len(), 3);
}

#[test]
fn test_parse_nth_pseudo_classes() {
    assert_eq!(
        simple("li:nth-child(odd)")[1],
        SimpleSelector::PseudoClass(PseudoClass::NthChild(Nth::new(2, 1)))
    );
    assert_eq!(
        simple(":nth-last-of-type(-n + 3)")[0],
        SimpleSelector::PseudoClass(PseudoClass::NthLastOfType(Nth::new(-1, 3)))
    );
    assert_eq!(
        simple(":NTH-OF-TYPE(2)")[0],
        SimpleSelector::PseudoClass(PseudoClass::NthOfType(Nth::new(0, 2)))
    );
}

#[test]
fn test_parse_negation() {
    assert_eq!(
        simple("p:not(.x)"),
        vec![
            SimpleSelector::Type("p".to_string()),
            SimpleSelector::Negation(Box::new(SimpleSelector::Class("x".to_string()))),
        ]
    );
    assert_eq!(
        simple(":not( [disabled] )"),
        vec![SimpleSelector::Negation(Box::new(SimpleSelector::Attribute(
            AttributeSelector::Exists("disabled".to_string())
        )))]
    );
}

#[test]
fn test_pseudo_class_names_are_case_insensitive() {
    assert_eq!(simple(":First-Child"), vec![SimpleSelector::PseudoClass(PseudoClass::FirstChild)]);
}

#[test]
fn test_empty_selector() {
    assert_eq!(syntax_error(""), (SyntaxErrorKind::EmptySelector, 0));
    assert_eq!(syntax_error("   "), (SyntaxErrorKind::EmptySelector, 3));
    assert_eq!(syntax_error("a,"), (SyntaxErrorKind::EmptySelector, 2));
    assert_eq!(syntax_error("a, ,b"), (SyntaxErrorKind::EmptySelector, 3));
}

#[test]
fn test_unterminated_attribute_reports_end_of_input() {
    assert_eq!(syntax_error("[attr="), (SyntaxErrorKind::UnterminatedAttribute, 6));
    assert_eq!(syntax_error("[attr"), (SyntaxErrorKind::UnterminatedAttribute, 5));
    assert_eq!(syntax_error("[attr=x"), (SyntaxErrorKind::UnterminatedAttribute, 7));
}

#[test]
fn test_missing_attribute_value() {
    let (kind, offset) = syntax_error("[attr=]");
    assert!(matches!(kind, SyntaxErrorKind::UnexpectedToken { expected: "attribute value", .. }));
    assert_eq!(offset, 6);
}

#[test]
fn test_dangling_combinator() {
    let (kind, offset) = syntax_error("div >");
    assert!(matches!(kind, SyntaxErrorKind::UnexpectedToken { .. }));
    assert_eq!(offset, 5);
    assert!(parse("> div").is_err());
    assert!(parse("a + + b").is_err());
}

#[test]
fn test_missing_class_name() {
    let (kind, offset) = syntax_error("div.");
    assert!(matches!(kind, SyntaxErrorKind::UnexpectedToken { .. }));
    assert_eq!(offset, 4);
}

#[test]
fn test_unknown_pseudo_class() {
    assert_eq!(
        syntax_error("a:bogus"),
        (SyntaxErrorKind::UnknownPseudoClass("bogus".to_string()), 1)
    );
}

#[test]
fn test_functional_pseudo_class_requires_argument() {
    assert_eq!(
        syntax_error(":nth-child"),
        (SyntaxErrorKind::MissingArgument("nth-child".to_string()), 0)
    );
}

#[test]
fn test_malformed_nth() {
    assert_eq!(
        syntax_error("li:nth-child(2n+)"),
        (SyntaxErrorKind::MalformedNth("2n+".to_string()), 13)
    );
}

#[test]
fn test_unterminated_arguments() {
    assert_eq!(syntax_error(":nth-child(2"), (SyntaxErrorKind::UnterminatedArguments, 12));
    assert_eq!(syntax_error(":not(.a"), (SyntaxErrorKind::UnterminatedArguments, 7));
}

#[test]
fn test_invalid_negation() {
    assert_eq!(syntax_error(":not()"), (SyntaxErrorKind::InvalidNegation, 5));
    assert_eq!(syntax_error(":not(:not(a))"), (SyntaxErrorKind::InvalidNegation, 5));
    assert_eq!(syntax_error("a:not(b c)"), (SyntaxErrorKind::InvalidNegation, 1));
}

#[test]
fn test_unsupported_pseudo_elements() {
    assert_eq!(unsupported("p::before"), ("::before".to_string(), 1));
    assert_eq!(unsupported("p:first-line"), (":first-line".to_string(), 1));
}

#[test]
fn test_unsupported_dynamic_pseudo_classes() {
    assert_eq!(unsupported("a:hover"), (":hover".to_string(), 1));
    assert_eq!(unsupported("input:checked"), (":checked".to_string(), 5));
    assert_eq!(unsupported("p:lang(en)"), (":lang()".to_string(), 1));
}

#[test]
fn test_unsupported_namespaces() {
    let (construct, offset) = unsupported("svg|rect");
    assert!(construct.contains("svg|rect"));
    assert_eq!(offset, 0);
    assert_eq!(unsupported("*|a").1, 0);
    assert_eq!(unsupported("|a").1, 0);
    assert_eq!(unsupported("[xlink|href]").1, 1);
}

#[test]
fn test_lexical_errors_surface_through_parse() {
    let err = parse("\"abc").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lexical);
    assert_eq!(err.offset(), 0);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse("a:bogus").unwrap_err().to_string(),
        "unknown pseudo-class ':bogus' at offset 1"
    );
    assert_eq!(ErrorCategory::Unsupported.to_string(), "unsupported");
}
