//! Variable and array declarations.
//!
//! ```text
//! var NAME (int|float) [= expression] ;
//! var NAME = [ LENGTH ] [int|float] { expression, ... } [;]
//! ```
//!
//! Problems that only concern one declaration (a redeclared name, a missing
//! type keyword or semicolon, a bad array length) are recorded as soft
//! errors; the rest of that statement is then skipped.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, parser::Parser, symbols::ScalarType};

/// Declared length of an array against the number of initializer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayShape {
    pub declared: usize,
    pub observed: usize,
}

impl ArrayShape {
    pub fn matches(&self) -> bool {
        self.declared == self.observed
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Var)?;

    let identifier = parser.expect(TokenKind::Identifier)?;
    let declared_type = ScalarType::from_token(parser.current_token_kind());
    parser.record_declaration(&identifier, declared_type);

    if parser.symbols().is_declared(&identifier.value) {
        parser.record_error(
            ErrorImpl::VariableAlreadyDeclared {
                variable: identifier.value.clone(),
            },
            identifier.span.start.clone(),
        );
        parser.resynchronize();
        return Ok(());
    }

    match (parser.current_token_kind(), declared_type) {
        (_, Some(ty)) => parse_scalar_declaration(parser, &identifier, ty),
        (TokenKind::Assign, None) => parse_array_declaration(parser, &identifier),
        (found, None) => {
            malformed(parser, "INT or FLOAT", found);
            Ok(())
        }
    }
}

fn parse_scalar_declaration(
    parser: &mut Parser,
    identifier: &Token,
    ty: ScalarType,
) -> Result<(), Error> {
    parser.expect(ty.token_kind())?;

    if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();

        let start = parser.cursor();
        parse_expr(parser)?;
        if let Some(literal) = parser.literal_since(start) {
            parser.record_use(identifier, Some(literal));
        }
    }

    if parser.current_token_kind() != TokenKind::Semicolon {
        let found = parser.current_token_kind();
        malformed(parser, "SEMICOLON", found);
        return Ok(());
    }
    parser.advance();

    // Cannot fail: the name was checked before the type keyword was read.
    let _ = parser.symbols_mut().declare(&identifier.value, ty);
    Ok(())
}

fn parse_array_declaration(parser: &mut Parser, identifier: &Token) -> Result<(), Error> {
    parser.expect(TokenKind::Assign)?;

    let Some(declared) = parse_array_length(parser)? else {
        parser.resynchronize();
        return Ok(());
    };
    let observed = parse_array_initializer(parser)?;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    let shape = ArrayShape { declared, observed };
    if !shape.matches() {
        parser.record_error(
            ErrorImpl::ArrayLengthMismatch {
                array: identifier.value.clone(),
                declared: shape.declared,
                observed: shape.observed,
            },
            identifier.span.start.clone(),
        );
    }

    Ok(())
}

/// `[ LENGTH ] [int|float]`, returning the length.
///
/// `None` means a soft error was recorded and the caller must resynchronise.
fn parse_array_length(parser: &mut Parser) -> Result<Option<usize>, Error> {
    parser.expect(TokenKind::LeftBracket)?;

    if parser.current_token_kind() != TokenKind::IntegerLiteral {
        let found = parser.current_token_kind();
        parser.record_error(
            ErrorImpl::MalformedDeclaration {
                expected: TokenKind::IntegerLiteral.to_string(),
                found,
            },
            parser.get_position(),
        );
        return Ok(None);
    }

    let literal = parser.advance();
    let Ok(declared) = literal.value.parse::<usize>() else {
        parser.record_error(
            ErrorImpl::NumberParseError {
                token: literal.value.clone(),
            },
            literal.span.start.clone(),
        );
        return Ok(None);
    };

    parser.expect(TokenKind::RightBracket)?;

    if matches!(parser.current_token_kind(), TokenKind::Int | TokenKind::Float) {
        parser.advance();
    }

    Ok(Some(declared))
}

/// `{ expression, ... }` with an optional trailing comma, returning how
/// many expressions it held.
fn parse_array_initializer(parser: &mut Parser) -> Result<usize, Error> {
    parser.expect(TokenKind::LeftBrace)?;

    let mut observed = 0;
    while parser.current_token_kind() != TokenKind::RightBrace {
        parse_expr(parser)?;
        if parser.current_token_kind() != TokenKind::RightBrace {
            parser.expect(TokenKind::Comma)?;
        }
        observed += 1;
    }

    parser.expect(TokenKind::RightBrace)?;
    Ok(observed)
}

fn malformed(parser: &mut Parser, expected: &str, found: TokenKind) {
    parser.record_error(
        ErrorImpl::MalformedDeclaration {
            expected: expected.to_string(),
            found,
        },
        parser.get_position(),
    );
    parser.resynchronize();
}
