use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("array", TokenKind::Array);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Reserved
    Var,
    Int,
    Float,
    If,
    Else,
    For,
    Func,
    Return,
    Array,
    True,
    False,
    New,

    Identifier,

    IntegerLiteral,
    FloatLiteral,
    StringLiteral,

    Plus,
    Minus,
    Multiply,
    Divide,
    Assign,           // =
    Equal,            // ==
    NotEqual,         // !=
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Not,
    Or,
    And,
    Increment,        // ++
    Decrement,        // --

    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    Eof,
    Error,
}

impl TokenKind {
    /// The upper-case name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Var => "VAR",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RETURN",
            TokenKind::Array => "ARRAY",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::New => "NEW",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            TokenKind::Not => "NOT",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Increment => "INCREMENT",
            TokenKind::Decrement => "DECREMENT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral | TokenKind::StringLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {}, value: {} }}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One line summary, `KIND (lexeme)` for tokens whose lexeme varies.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::StringLiteral,
            TokenKind::Identifier,
            TokenKind::IntegerLiteral,
            TokenKind::FloatLiteral,
            TokenKind::Error,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
