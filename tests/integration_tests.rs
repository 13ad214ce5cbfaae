//! Integration tests for the whole front end.
//!
//! These tests run source text through tokenization and parsing using only
//! the public API, and check the outcome a caller would report.

use std::{fs::read_to_string, rc::Rc};

use pretty_assertions::assert_eq;
use teachlang::{
    errors::errors::Severity,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::{parser::parse, symbols::ScalarType},
    render_error,
};

fn check(source: &str) -> (Vec<String>, Result<(), String>) {
    let tokens = tokenize(source.to_string(), Some("test.tl".to_string()));
    let (parser, result) = parse(tokens, Rc::new("test.tl".to_string()));
    (parser.messages(), result.map_err(|error| error.to_string()))
}

#[test]
fn test_sample_program_is_clean() {
    let source = read_to_string("tests/programs/sample.tl").unwrap();
    let tokens = tokenize(source, Some("sample.tl".to_string()));
    let (parser, result) = parse(tokens, Rc::new("sample.tl".to_string()));

    assert!(result.is_ok(), "{:?}", result);
    assert!(parser.errors().is_empty(), "{:?}", parser.messages());

    let declared: Vec<(&str, ScalarType)> = parser.symbols().variables().collect();
    assert_eq!(
        declared,
        vec![
            ("count", ScalarType::Int),
            ("total", ScalarType::Float),
            ("i", ScalarType::Int)
        ]
    );
}

#[test]
fn test_diagnostics_program() {
    let source = read_to_string("tests/programs/diagnostics.tl").unwrap();
    let (messages, result) = check(&source);

    assert!(result.is_ok());
    assert_eq!(
        messages,
        vec![
            "Variable x is already declared.",
            "Array grid declares 3 elements but its initializer has 2.",
            "Variable y is not declared.",
            "Variable x is already declared.",
            "Variable ratio is declared with a different type.",
        ]
    );
}

#[test]
fn test_soft_errors_are_never_fatal() {
    let source = read_to_string("tests/programs/diagnostics.tl").unwrap();
    let tokens = tokenize(source, None);
    let (parser, _) = parse(tokens, Rc::new("shell".to_string()));

    assert!(parser
        .errors()
        .iter()
        .all(|error| error.severity() == Severity::Soft));
}

#[test]
fn test_tokens_end_with_single_eof() {
    let tokens = tokenize("var x int = 5; x++;".to_string(), None);

    let eofs = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Eof)
        .count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
}

#[test]
fn test_fatal_error_message_names_both_kinds() {
    let (_, result) = check("var x int = 1;\nif (x");

    assert_eq!(
        result,
        Err(String::from(
            "Expected token type LEFT_BRACE but found LEFT_PAREN"
        ))
    );
}

#[test]
fn test_render_error_points_at_token() {
    let source = "if (x";
    let tokens = tokenize(source.to_string(), Some("test.tl".to_string()));
    let (_, result) = parse(tokens, Rc::new("test.tl".to_string()));
    let error = result.unwrap_err();

    assert_eq!(
        render_error(&error, source),
        "Error: ExpectedToken (Expected token type LEFT_BRACE but found LEFT_PAREN)\n\
         -> test.tl\n  |\n1 | if (x\n  | ---^\n"
    );
}
