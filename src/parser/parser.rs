//! Parser state and the `parse` entry point.
//!
//! The parser walks the token stream with recursive descent. It keeps:
//! - a cursor into the token stream
//! - lookup tables for statement handlers and operator binding powers
//! - the symbol table (declared variables and their occurrences)
//! - the log of soft errors
//!
//! Structural mismatches are returned as `Err` and stop the parse. Soft
//! errors are appended to the log, after which the current statement is
//! abandoned and the cursor resynchronised to the next statement boundary.

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{create_token_lookups, BPLookup, BindingPower, StmtHandler, StmtLookup},
    stmt::parse_stmt,
    symbols::{LiteralKind, Occurrence, Role, ScalarType, SymbolTable},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always ending with `Eof`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for binary operator binding powers
    binding_power_lookup: BPLookup,
    /// Declared variables and every recorded occurrence
    symbols: SymbolTable,
    /// Soft errors, in the order they were found
    errors: Vec<Error>,
    /// Current block nesting depth
    scope: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `Eof` token is appended when the stream does not already end with
    /// one, so the cursor always has a token to look at.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let position = Position(0, Rc::clone(&file));
            tokens.push(MK_TOKEN!(
                TokenKind::Eof,
                String::from("EOF"),
                Span {
                    start: position.clone(),
                    end: position
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            scope: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past the final `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a fatal
    /// `ExpectedToken` error naming both kinds.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: expected_kind,
                    found: token.kind,
                },
                token.span.start.clone(),
            ))
        } else {
            Ok(self.advance())
        }
    }

    /// Builds the fatal error for a token no grammar rule accepts here.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken { found: token.kind },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::Eof
    }

    /// Index of the current token.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Kind of the literal consumed since `start`, when that is all that
    /// was consumed. A leading minus is allowed on numeric literals.
    pub fn literal_since(&self, start: usize) -> Option<LiteralKind> {
        match &self.tokens[start..self.pos] {
            [literal] => LiteralKind::from_token(literal.kind),
            [sign, literal] if sign.kind == TokenKind::Minus => {
                LiteralKind::from_token(literal.kind).filter(|kind| *kind != LiteralKind::String)
            }
            _ => None,
        }
    }

    /// Discards tokens up to the next statement boundary.
    ///
    /// Consumes through the next `;` outside any braces opened during the
    /// skip. Stops without consuming at an unmatched `}` or at `Eof`.
    pub fn resynchronize(&mut self) {
        let mut depth = 0usize;
        let skipped_from = self.pos;

        loop {
            match self.current_token_kind() {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace if depth == 0 => break,
                TokenKind::RightBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }

        debug!(skipped = self.pos - skipped_from, "resynchronised");
    }

    /// Appends a soft error to the log.
    pub fn record_error(&mut self, error: ErrorImpl, position: Position) {
        let error = Error::new(error, position);
        debug!(error = %error, "recorded soft error");
        self.errors.push(error);
    }

    pub fn record_declaration(&mut self, identifier: &Token, ty: Option<ScalarType>) {
        let occurrence = Occurrence {
            role: Role::Declaration { ty },
            scope: self.scope,
            position: identifier.span.start.clone(),
        };
        self.symbols.record(&identifier.value, occurrence);
    }

    pub fn record_use(&mut self, identifier: &Token, observed: Option<LiteralKind>) {
        let occurrence = Occurrence {
            role: Role::Use { observed },
            scope: self.scope,
            position: identifier.span.start.clone(),
        };
        self.symbols.record(&identifier.value, occurrence);
    }

    pub fn enter_scope(&mut self) {
        self.scope += 1;
    }

    pub fn exit_scope(&mut self) {
        self.scope = self.scope.saturating_sub(1);
    }

    /// Soft errors collected so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Soft errors rendered as plain messages.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Binding power of `kind` as a binary operator.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a binary operator at the given precedence level.
    pub fn binary(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    fn run_semantic_sweep(&mut self) {
        let findings = self.symbols.sweep();
        for error in &findings {
            debug!(error = %error, "semantic sweep finding");
        }
        self.errors.extend(findings);
    }
}

/// Parses a stream of tokens.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables and parses statements until `Eof`. The
/// semantic sweep runs only when every statement parsed; a fatal error
/// stops the parse with the soft errors found so far.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the soft error log and symbol table
/// - `Ok(())`, or the fatal error that stopped the parse
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<(), Error>) {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let mut result = Ok(());

    while parser.has_tokens() {
        if let Err(error) = parse_stmt(&mut parser) {
            debug!(error = %error, "parse aborted");
            result = Err(error);
            break;
        }
    }

    if result.is_ok() {
        parser.run_semantic_sweep();
    }

    (parser, result)
}
