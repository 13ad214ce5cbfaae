use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{decl::parse_var_decl_stmt, expr::parse_expr, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<(), Error> {
    let kind = parser.current_token_kind();
    debug!(lead = %kind, position = parser.cursor(), "parsing statement");

    match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

/// Dispatches a statement that starts with an identifier on the token after it.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<(), Error> {
    match parser.peek_kind() {
        TokenKind::LeftBracket => parse_array_assignment_stmt(parser),
        TokenKind::Increment => parse_step_stmt(parser, TokenKind::Increment),
        TokenKind::Decrement => parse_step_stmt(parser, TokenKind::Decrement),
        TokenKind::Assign => parse_assignment_stmt(parser),
        _ => parse_arithmetic_assignment_stmt(parser),
    }
}

/// `name = expression ;` where `name` must already be declared.
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<(), Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;

    if !parser.symbols().is_declared(&identifier.value) {
        parser.record_use(&identifier, None);
        parser.record_error(
            ErrorImpl::VariableNotDeclared {
                variable: identifier.value.clone(),
            },
            identifier.span.start.clone(),
        );
        parser.resynchronize();
        return Ok(());
    }

    parser.expect(TokenKind::Assign)?;

    let start = parser.cursor();
    parse_expr(parser)?;
    let observed = parser.literal_since(start);
    parser.record_use(&identifier, observed);

    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// Fallback for identifier-led statements: same shape as an assignment but
/// without the declaration check, so anything but `=` after the name fails.
pub fn parse_arithmetic_assignment_stmt(parser: &mut Parser) -> Result<(), Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.record_use(&identifier, None);

    parser.expect(TokenKind::Assign)?;
    parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// `name [ index ] = value ;`
pub fn parse_array_assignment_stmt(parser: &mut Parser) -> Result<(), Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.record_use(&identifier, None);

    parser.expect(TokenKind::LeftBracket)?;
    parse_expr(parser)?;
    parser.expect(TokenKind::RightBracket)?;
    parser.expect(TokenKind::Assign)?;
    parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// `name ++ ;` or `name -- ;`
pub fn parse_step_stmt(parser: &mut Parser, operator: TokenKind) -> Result<(), Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.record_use(&identifier, None);

    parser.expect(operator)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// `if [name (==|!=) expression] block [else (if ... | block)]`
///
/// The condition is optional and limited to one comparison against a bare
/// identifier; a parenthesised condition is not part of the grammar.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::If)?;

    if parser.current_token_kind() == TokenKind::Identifier {
        let identifier = parser.advance();
        parser.record_use(&identifier, None);

        if matches!(
            parser.current_token_kind(),
            TokenKind::Equal | TokenKind::NotEqual
        ) {
            parser.advance();
            parse_expr(parser)?;
        }
    }

    parse_block(parser)?;

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            parse_if_stmt(parser)?;
        } else {
            parse_block(parser)?;
        }
    }

    Ok(())
}

/// `for ( declaration ; | assignment  condition ; name [++|--] ) block`
///
/// A declaration ends with its own `;` and is followed by another one. An
/// assignment's `;` stands alone.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::LeftParen)?;

    if parser.current_token_kind() == TokenKind::Var {
        parse_var_decl_stmt(parser)?;
        parser.expect(TokenKind::Semicolon)?;
    } else {
        parse_assignment_stmt(parser)?;
    }

    parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let counter = parser.expect(TokenKind::Identifier)?;
    parser.record_use(&counter, None);

    if matches!(
        parser.current_token_kind(),
        TokenKind::Increment | TokenKind::Decrement
    ) {
        parser.advance();
    }

    parser.expect(TokenKind::RightParen)?;
    parse_block(parser)
}

/// `func name ( ) block`
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Func)?;
    let name = parser.expect(TokenKind::Identifier)?;
    debug!(function = %name.value, "function declaration");

    parser.expect(TokenKind::LeftParen)?;
    parser.expect(TokenKind::RightParen)?;
    parse_block(parser)
}

pub fn parse_block(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::LeftBrace)?;
    parser.enter_scope();

    while parser.current_token_kind() != TokenKind::RightBrace {
        parse_stmt(parser)?;
    }

    parser.exit_scope();
    parser.expect(TokenKind::RightBrace)?;
    Ok(())
}
