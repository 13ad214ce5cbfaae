//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using an ordered regex pattern table
//! - Recognition of keywords, identifiers, literals, and operators
//! - The `new =` and `identifier"string"` lookahead rules
//! - Token position tracking for error reporting
//! - Silent skipping of whitespace and unrecognised characters

pub mod lexer;
pub mod lookahead;
pub mod tokens;
