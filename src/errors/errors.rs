use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// Whether an error stops the parse or is only recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Soft,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::ExpectedToken { .. } | ErrorImpl::UnexpectedToken { .. } => Severity::Fatal,
            _ => Severity::Soft,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MalformedDeclaration { .. } => "MalformedDeclaration",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ArrayLengthMismatch { .. } => "ArrayLengthMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::ExpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected token type {} but found {}",
                expected, found
            )),
            ErrorImpl::UnexpectedToken { found } => match found {
                TokenKind::Semicolon => ErrorTip::Suggestion(String::from(
                    "Unexpected token: SEMICOLON, is there a stray semicolon?",
                )),
                _ => ErrorTip::Suggestion(format!("Unexpected token: {}", found)),
            },
            ErrorImpl::MalformedDeclaration { expected, found } => ErrorTip::Suggestion(format!(
                "Expected token type {} but found {}, the declaration was skipped",
                expected, found
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid array length: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` not declared, did you forget `var {} int;`?",
                variable, variable
            )),
            ErrorImpl::TypeMatchError { .. } => ErrorTip::None,
            ErrorImpl::ArrayLengthMismatch { declared, observed, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} initializer values, received {}",
                    declared, observed
                ))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Expected token type {expected} but found {found}")]
    ExpectedToken { expected: TokenKind, found: TokenKind },
    #[error("Unexpected token: {found}")]
    UnexpectedToken { found: TokenKind },
    // Same wording as `ExpectedToken`, but recorded instead of raised.
    #[error("Expected token type {expected} but found {found}")]
    MalformedDeclaration { expected: String, found: TokenKind },
    #[error("Invalid array length: {token}")]
    NumberParseError { token: String },
    #[error("Variable {variable} is already declared.")]
    VariableAlreadyDeclared { variable: String },
    #[error("Variable {variable} is not declared.")]
    VariableNotDeclared { variable: String },
    #[error("Variable {variable} is declared with a different type.")]
    TypeMatchError { variable: String },
    #[error("Array {array} declares {declared} elements but its initializer has {observed}.")]
    ArrayLengthMismatch {
        array: String,
        declared: usize,
        observed: usize,
    },
}
