//! Lookahead applied after a non-keyword identifier has been scanned.
//!
//! Two spellings change meaning depending on the raw characters that follow
//! the identifier:
//!
//! - `new` followed by exactly one space and `=` becomes a single `NEW` token
//! - any other identifier followed directly by `"` starts a string literal,
//!   and the identifier text itself is dropped
//!
//! Both are driven by one transition table keyed on the pending candidate and
//! the next raw character, so every case is listed in a single `match`.

use super::tokens::TokenKind;

/// What the identifier scanned so far may still turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// The text is `new`.
    NewKeyword,
    /// `new` and one space have been consumed.
    NewAfterSpace,
    /// Any other identifier.
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Consume the character and continue from the given state.
    Advance(Pending),
    /// Consume the character and emit a token of this kind.
    AdvanceAndEmit(TokenKind),
    /// Leave the character in place and emit a token of this kind.
    Emit(TokenKind),
    /// Consume the opening quote and scan a string literal.
    StringLiteral,
}

impl Pending {
    pub fn for_identifier(text: &str) -> Self {
        if text == "new" {
            Pending::NewKeyword
        } else {
            Pending::Word
        }
    }
}

pub fn transition(pending: Pending, next: Option<char>) -> Transition {
    match (pending, next) {
        (Pending::NewKeyword, Some(' ')) => Transition::Advance(Pending::NewAfterSpace),
        (Pending::NewKeyword, _) => Transition::Emit(TokenKind::Identifier),
        (Pending::NewAfterSpace, Some('=')) => Transition::AdvanceAndEmit(TokenKind::New),
        (Pending::NewAfterSpace, _) => Transition::Emit(TokenKind::Identifier),
        (Pending::Word, Some('"')) => Transition::StringLiteral,
        (Pending::Word, _) => Transition::Emit(TokenKind::Identifier),
    }
}
