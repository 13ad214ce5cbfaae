//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Variable and array declarations
//! - Assignments, increments and decrements
//! - Control flow statements and functions
//! - Expressions
//! - Soft error recording, resynchronisation and the semantic sweep

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{
    parser::{parse, Parser},
    symbols::{Role, ScalarType},
};
use crate::{errors::errors::Error, lexer::lexer::tokenize};

fn run(source: &str) -> (Parser, Result<(), Error>) {
    let tokens = tokenize(source.to_string(), Some("test.tl".to_string()));
    parse(tokens, Rc::new("test.tl".to_string()))
}

fn fatal_message(source: &str) -> String {
    let (_, result) = run(source);
    result.expect_err("parse should fail").to_string()
}

#[test]
fn test_parse_scalar_declaration() {
    let (parser, result) = run("var x int = 5;");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
    assert_eq!(parser.symbols().get("x"), Some(ScalarType::Int));
}

#[test]
fn test_parse_declaration_without_initializer() {
    let (parser, result) = run("var ratio float;");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
    assert_eq!(parser.symbols().get("ratio"), Some(ScalarType::Float));
}

#[test]
fn test_redeclaration_is_reported() {
    let (parser, result) = run("var x int = 5; var x float = 1.0;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec![
            "Variable x is already declared.",
            "Variable x is already declared."
        ]
    );
    assert_eq!(parser.symbols().get("x"), Some(ScalarType::Int));
}

#[test]
fn test_redeclaration_resynchronises() {
    let (parser, result) = run("var x int = 1; var x int = 2; var y int = 3;");

    assert!(result.is_ok());
    assert_eq!(parser.symbols().get("y"), Some(ScalarType::Int));
    assert_eq!(parser.symbols().len(), 2);
}

#[test]
fn test_redeclaration_in_nested_scope() {
    let (parser, result) = run("var x int = 1; func f() { var x int = 2; }");

    assert!(result.is_ok());
    assert_eq!(parser.errors().len(), 2);

    let scopes: Vec<usize> = parser
        .symbols()
        .occurrences("x")
        .iter()
        .filter(|occurrence| matches!(occurrence.role, Role::Declaration { .. }))
        .map(|occurrence| occurrence.scope)
        .collect();
    assert_eq!(scopes, vec![0, 1]);
}

#[test]
fn test_array_length_mismatch() {
    let (parser, result) = run("var arr = [3]int{1,2};");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Array arr declares 3 elements but its initializer has 2."]
    );
}

#[test]
fn test_array_length_match() {
    let (parser, result) = run("var arr = [2]int{1,2};");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_array_declarations_are_checked_independently() {
    let (parser, result) = run("var a = [2]int{1, 2}; var b = [3]float{1.0, 2.0, 3.0};");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_array_initializer_forms() {
    let (parser, result) = run("var a = [2]int{1, 2,}; var b = [1]{7} var c = [0]{};");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_array_length_must_be_a_literal() {
    let (parser, result) = run("var a = [n]int{1}; var b int = 2;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Expected token type INTEGER_LITERAL but found IDENTIFIER"]
    );
    assert_eq!(parser.symbols().get("b"), Some(ScalarType::Int));
}

#[test]
fn test_array_length_out_of_range() {
    let (parser, result) = run("var a = [99999999999999999999999]int{1};");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Invalid array length: 99999999999999999999999"]
    );
}

#[test]
fn test_assignment_to_undeclared_variable() {
    let (parser, result) = run("y = 5;");

    assert!(result.is_ok());
    assert_eq!(parser.messages(), vec!["Variable y is not declared."]);
    assert_eq!(parser.errors()[0].get_position().0, 0);
}

#[test]
fn test_assignment_to_declared_variable() {
    let (parser, result) = run("var y int; y = y + 5 * 2;");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_missing_type_keyword() {
    let (parser, result) = run("var x string; var z int = 1;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Expected token type INT or FLOAT but found IDENTIFIER"]
    );
    assert!(!parser.symbols().is_declared("x"));
    assert!(parser.symbols().is_declared("z"));
}

#[test]
fn test_missing_semicolon_in_declaration() {
    let (parser, result) = run("var x int = 5 var y int = 1;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Expected token type SEMICOLON but found VAR"]
    );
    assert!(!parser.symbols().is_declared("x"));
}

#[test]
fn test_literal_type_mismatch() {
    let (parser, result) = run("var x int = 2.5;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Variable x is declared with a different type."]
    );
}

#[test]
fn test_float_accepts_integer_literal() {
    let (parser, _) = run("var f float = 2; f = -3; f = 0.5;");

    assert!(parser.errors().is_empty());
}

#[test]
fn test_assigned_literal_mismatch() {
    let (parser, _) = run("var n int; n = -1.5;");

    assert_eq!(
        parser.messages(),
        vec!["Variable n is declared with a different type."]
    );
}

#[test]
fn test_if_without_brace_is_fatal() {
    let (parser, result) = run("if (x");

    assert_eq!(
        result.unwrap_err().to_string(),
        "Expected token type LEFT_BRACE but found LEFT_PAREN"
    );
    assert!(parser.errors().is_empty());
}

#[test]
fn test_if_else_chain() {
    let source = "var x int = 1; if x == 1 { x = 2; } else if x != 3 { x++; } else { x--; }";
    let (parser, result) = run(source);

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_if_without_condition() {
    let (_, result) = run("if { } else { }");

    assert!(result.is_ok());
}

#[test]
fn test_for_loop_with_declaration() {
    let (parser, result) = run("for (var i int = 0;; i < 10; i++) { var y int = i; }");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
    assert!(parser.symbols().is_declared("i"));
    assert!(parser.symbols().is_declared("y"));
}

#[test]
fn test_for_loop_declaration_needs_second_semicolon() {
    assert_eq!(
        fatal_message("for (var i int = 0; i < 3; i++) { }"),
        "Expected token type SEMICOLON but found IDENTIFIER"
    );
}

#[test]
fn test_for_loop_with_assignment() {
    let (parser, result) = run("var i int; for (i = 0; i <= 3; i--) { }");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_for_loop_without_step() {
    let (_, result) = run("var i int; for (i = 0; i > 3; i) { }");

    assert!(result.is_ok());
}

#[test]
fn test_function_declaration() {
    let (parser, result) = run("func main() { var a float = 1.5; a = a * 2 + 1; }");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_function_parameters_are_fatal() {
    assert_eq!(
        fatal_message("func add(a) { }"),
        "Expected token type RIGHT_PAREN but found IDENTIFIER"
    );
}

#[test]
fn test_expression_precedence_levels() {
    let source = "var r int = (1 + 2) * -3 / 4 - 5; var b int = 1 < 2 && 3 >= 4 || 5 != 6;";
    let (parser, result) = run(source);

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_comparisons_do_not_chain() {
    let (parser, result) = run("var c int = 1 < 2 < 3;");

    assert!(result.is_ok());
    assert_eq!(
        parser.messages(),
        vec!["Expected token type SEMICOLON but found LESS_THAN"]
    );
}

#[test]
fn test_array_element_assignment_and_read() {
    let (parser, result) = run("arr[0] = 5; var x int = arr[1 + 2];");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_increment_and_decrement_statements() {
    let (parser, result) = run("x++; x--;");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_constructor_call() {
    let (_, result) = run("var p int; p = new = Point();");

    assert!(result.is_ok());
}

#[test]
fn test_nested_assignment_expression() {
    let (parser, result) = run("var a int; var b int; a = b = 3;");

    assert!(result.is_ok());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_postfix_increment_in_expression() {
    let (_, result) = run("var a int; var b int = 0; a = b++ + 1;");

    assert!(result.is_ok());
}

#[test]
fn test_unexpected_statement_lead() {
    assert_eq!(fatal_message("5;"), "Unexpected token: INTEGER_LITERAL");
    assert_eq!(fatal_message(";"), "Unexpected token: SEMICOLON");
}

#[test]
fn test_identifier_without_assignment_is_fatal() {
    assert_eq!(
        fatal_message("x + 1;"),
        "Expected token type ASSIGN but found PLUS"
    );
}

#[test]
fn test_unclosed_block() {
    assert_eq!(fatal_message("func f() {"), "Unexpected token: EOF");
}

#[test]
fn test_fatal_error_keeps_soft_errors() {
    let (parser, result) = run("var x int = 1; var x int = 2; 5;");

    assert!(result.is_err());
    assert_eq!(parser.messages(), vec!["Variable x is already declared."]);
    assert!(parser.errors().iter().all(|error| !error.is_fatal()));
}

#[test]
fn test_fatal_error_skips_semantic_sweep() {
    let (parser, result) = run("var x int = 2.5; if (x");

    assert!(result.is_err());
    assert!(parser.errors().is_empty());
    assert!(parser.symbols().is_declared("x"));
}

#[test]
fn test_empty_program() {
    let (parser, result) = run("");
    assert!(result.is_ok());
    assert!(parser.errors().is_empty());

    let (_, result) = parse(vec![], Rc::new("empty.tl".to_string()));
    assert!(result.is_ok());
}
