//! Declared variables and the occurrence index behind the semantic sweep.
//!
//! Every time the parser consumes a variable name it records an
//! [`Occurrence`]: either a declaration (with the type keyword that followed
//! the name, if any) or a use (with the kind of literal assigned to it, when
//! the right-hand side was a single literal). The sweep then works from
//! these records instead of re-scanning the raw token stream.

use std::{collections::HashMap, fmt::Display};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
}

impl ScalarType {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(ScalarType::Int),
            TokenKind::Float => Some(ScalarType::Float),
            _ => None,
        }
    }

    pub fn token_kind(&self) -> TokenKind {
        match self {
            ScalarType::Int => TokenKind::Int,
            ScalarType::Float => TokenKind::Float,
        }
    }

    /// Whether a literal of this kind may be stored in a variable of this type.
    pub fn accepts(&self, literal: LiteralKind) -> bool {
        matches!(
            (self, literal),
            (ScalarType::Int, LiteralKind::Integer)
                | (ScalarType::Float, LiteralKind::Float)
                | (ScalarType::Float, LiteralKind::Integer)
        )
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Int => write!(f, "int"),
            ScalarType::Float => write!(f, "float"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
}

impl LiteralKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntegerLiteral => Some(LiteralKind::Integer),
            TokenKind::FloatLiteral => Some(LiteralKind::Float),
            TokenKind::StringLiteral => Some(LiteralKind::String),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// `var NAME ...`; `ty` is the type keyword right after the name.
    Declaration { ty: Option<ScalarType> },
    /// Any other appearance of the name.
    Use { observed: Option<LiteralKind> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub role: Role,
    /// Block depth, 0 at top level
    pub scope: usize,
    pub position: Position,
}

impl Occurrence {
    pub fn is_declaration(&self) -> bool {
        matches!(self.role, Role::Declaration { .. })
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    declared: HashMap<String, ScalarType>,
    declaration_order: Vec<String>,
    occurrences: HashMap<String, Vec<Occurrence>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<ScalarType> {
        self.declared.get(name).copied()
    }

    /// Adds `name` to the declaration table.
    ///
    /// The first declaration wins: when the name is already present the
    /// table is left untouched and the existing type is returned as `Err`.
    pub fn declare(&mut self, name: &str, ty: ScalarType) -> Result<(), ScalarType> {
        if let Some(existing) = self.declared.get(name) {
            return Err(*existing);
        }

        self.declared.insert(name.to_string(), ty);
        self.declaration_order.push(name.to_string());
        Ok(())
    }

    pub fn record(&mut self, name: &str, occurrence: Occurrence) {
        self.occurrences
            .entry(name.to_string())
            .or_default()
            .push(occurrence);
    }

    pub fn occurrences(&self, name: &str) -> &[Occurrence] {
        self.occurrences
            .get(name)
            .map(|occurrences| occurrences.as_slice())
            .unwrap_or(&[])
    }

    /// Declared variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, ScalarType)> + '_ {
        self.declaration_order
            .iter()
            .map(|name| (name.as_str(), self.declared[name]))
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Checks every declared variable once, in declaration order.
    ///
    /// A name declared more than once yields a duplicate-declaration error at
    /// its second declaration. Otherwise, the first literal whose kind the
    /// declared type does not accept yields a type-mismatch error.
    pub fn sweep(&self) -> Vec<Error> {
        let mut findings = Vec::new();

        for (name, ty) in self.variables() {
            let occurrences = self.occurrences(name);

            if let Some(second) = occurrences.iter().filter(|o| o.is_declaration()).nth(1) {
                findings.push(Error::new(
                    ErrorImpl::VariableAlreadyDeclared {
                        variable: name.to_string(),
                    },
                    second.position.clone(),
                ));
                continue;
            }

            let mismatch = occurrences.iter().find(|occurrence| match occurrence.role {
                Role::Use {
                    observed: Some(literal),
                } => !ty.accepts(literal),
                _ => false,
            });

            if let Some(occurrence) = mismatch {
                findings.push(Error::new(
                    ErrorImpl::TypeMatchError {
                        variable: name.to_string(),
                    },
                    occurrence.position.clone(),
                ));
            }
        }

        findings
    }
}
