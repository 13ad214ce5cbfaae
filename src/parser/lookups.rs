use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{decl::parse_var_decl_stmt, parser::Parser, stmt::*};

/// Precedence levels of the binary operators, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Relational,
    Additive,
    Multiplicative,
}

pub type StmtHandler = fn(&mut Parser) -> Result<(), Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.binary(TokenKind::And, BindingPower::Logical);
    parser.binary(TokenKind::Or, BindingPower::Logical);

    // Relational
    parser.binary(TokenKind::Equal, BindingPower::Relational);
    parser.binary(TokenKind::NotEqual, BindingPower::Relational);
    parser.binary(TokenKind::LessThan, BindingPower::Relational);
    parser.binary(TokenKind::LessThanOrEqual, BindingPower::Relational);
    parser.binary(TokenKind::GreaterThan, BindingPower::Relational);
    parser.binary(TokenKind::GreaterThanOrEqual, BindingPower::Relational);

    // Additive and multiplicative
    parser.binary(TokenKind::Plus, BindingPower::Additive);
    parser.binary(TokenKind::Minus, BindingPower::Additive);
    parser.binary(TokenKind::Multiply, BindingPower::Multiplicative);
    parser.binary(TokenKind::Divide, BindingPower::Multiplicative);

    // Statements
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Identifier, parse_identifier_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Func, parse_fn_decl_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
