//! Error types shared by the lexer and the parser.
//!
//! Two severities exist:
//!
//! - fatal errors stop the parse and are returned as `Err`
//! - soft errors are appended to the parser's error log and parsing continues
//!
//! Both carry the source position they were raised at.

pub mod errors;
