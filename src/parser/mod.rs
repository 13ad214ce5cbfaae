//! Recursive-descent parser.
//!
//! This module walks the token stream produced by the lexer. It does not
//! build a tree; it checks the program's structure and records what it
//! learns about variables:
//!
//! - Statement parsing (declarations, assignments, control flow, functions)
//! - Expression parsing over a fixed precedence ladder
//! - A symbol table of declared variables and their occurrences
//! - A semantic sweep after the last statement
//!
//! Binary operator precedence and statement handlers are registered in
//! lookup tables keyed by token kind.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod symbols;

#[cfg(test)]
mod tests;
