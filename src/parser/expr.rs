//! Expression grammar, lowest precedence first:
//!
//! ```text
//! expression     = comparison { (&& | ||) comparison }
//! comparison     = additive [ (== | != | < | <= | > | >=) additive ]
//! additive       = multiplicative { (+ | -) multiplicative }
//! multiplicative = unary { (* | /) unary }
//! unary          = - primary | NAME ++ | primary
//! primary        = literal
//!                | NAME [ = expression | [ expression ] ]
//!                | new NAME ( )
//!                | ( expression )
//! ```
//!
//! Comparisons do not chain: `a < b < c` stops after `a < b`.

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_boolean_expr(parser)
}

fn at_level(parser: &Parser, level: BindingPower) -> bool {
    parser.binding_power(parser.current_token_kind()) == level
}

fn parse_boolean_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_comparison_expr(parser)?;

    while at_level(parser, BindingPower::Logical) {
        parser.advance();
        parse_comparison_expr(parser)?;
    }

    Ok(())
}

fn parse_comparison_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_additive_expr(parser)?;

    if at_level(parser, BindingPower::Relational) {
        parser.advance();
        parse_additive_expr(parser)?;
    }

    Ok(())
}

fn parse_additive_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_multiplicative_expr(parser)?;

    while at_level(parser, BindingPower::Additive) {
        parser.advance();
        parse_multiplicative_expr(parser)?;
    }

    Ok(())
}

fn parse_multiplicative_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_unary_expr(parser)?;

    while at_level(parser, BindingPower::Multiplicative) {
        parser.advance();
        parse_unary_expr(parser)?;
    }

    Ok(())
}

fn parse_unary_expr(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Minus => {
            parser.advance();
        }
        TokenKind::Identifier if parser.peek_kind() == TokenKind::Increment => {
            let identifier = parser.advance();
            parser.record_use(&identifier, None);
            parser.advance();
            return Ok(());
        }
        _ => {}
    }

    parse_primary_expr(parser)
}

fn parse_primary_expr(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        kind if kind.is_literal() => {
            parser.advance();
        }
        TokenKind::Identifier => {
            let identifier = parser.advance();

            match parser.current_token_kind() {
                // TODO: decide whether `NAME = expression` and `NAME ++`
                // belong in expressions at all; until then `a = b = 1` parses
                // as nested assignment and `x++` as an increment operand.
                TokenKind::Assign => {
                    parser.advance();
                    let start = parser.cursor();
                    parse_expr(parser)?;
                    let observed = parser.literal_since(start);
                    parser.record_use(&identifier, observed);
                }
                TokenKind::LeftBracket => {
                    parser.record_use(&identifier, None);
                    parser.advance();
                    parse_expr(parser)?;
                    parser.expect(TokenKind::RightBracket)?;
                }
                _ => parser.record_use(&identifier, None),
            }
        }
        TokenKind::New => {
            parser.advance();
            parser.expect(TokenKind::Identifier)?;
            parser.expect(TokenKind::LeftParen)?;
            parser.expect(TokenKind::RightParen)?;
        }
        TokenKind::LeftParen => {
            parser.advance();
            parse_expr(parser)?;
            parser.expect(TokenKind::RightParen)?;
        }
        _ => return Err(parser.unexpected()),
    }

    Ok(())
}
