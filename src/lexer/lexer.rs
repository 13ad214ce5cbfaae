use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    lookahead::{transition, Pending, Transition},
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer patterns are valid regexes"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so two
    // character operators come before their one character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^\p{L}[\p{L}\p{Nd}]*", symbol_handler),
        pattern(r"^\d+(\.\d*)?", number_handler),
        pattern(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::Increment, "++")),
        pattern(r"^--", MK_DEFAULT_HANDLER!(TokenKind::Decrement, "--")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equal, "==")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEqual, "!=")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessThanOrEqual, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterThanOrEqual, ">=")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Multiply, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Divide, "/")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assign, "=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::LessThan, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::GreaterThan, ">")),
        pattern(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::LeftParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::RightParen, ")")),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::LeftBrace, "{")),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::RightBrace, "}")),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::LeftBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::RightBracket, "]")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Steps over one character, whatever its encoded width.
    pub fn advance_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    pub fn push(&mut self, token: Token) {
        trace!(token = %token.debug(), "token");
        self.tokens.push(token);
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn span_from(&self, start: usize, end: usize) -> Span {
        Span {
            start: Position(start as u32, Rc::clone(&self.file)),
            end: Position(end as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.pos;
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());

    let kind = if matched.contains('.') {
        TokenKind::FloatLiteral
    } else {
        TokenKind::IntegerLiteral
    };

    let span = lexer.span_from(start, lexer.pos);
    lexer.push(MK_TOKEN!(kind, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex).len();
    lexer.advance_n(matched);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.pos;
    let value = lexer.matched(regex);
    lexer.advance_n(value.len());

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        let span = lexer.span_from(start, lexer.pos);
        lexer.push(MK_TOKEN!(*kind, value, span));
        return;
    }

    let mut pending = Pending::for_identifier(&value);
    loop {
        match transition(pending, lexer.peek_char()) {
            Transition::Advance(next) => {
                lexer.advance_char();
                pending = next;
            }
            Transition::AdvanceAndEmit(kind) => {
                lexer.advance_char();
                let span = lexer.span_from(start, lexer.pos);
                lexer.push(MK_TOKEN!(kind, value, span));
                return;
            }
            Transition::Emit(kind) => {
                let span = lexer.span_from(start, lexer.pos);
                lexer.push(MK_TOKEN!(kind, value, span));
                return;
            }
            Transition::StringLiteral => {
                string_handler(lexer, value);
                return;
            }
        }
    }
}

/// Scans a string literal whose opening quote is at the cursor.
///
/// `identifier` is the text scanned right before the quote; an unterminated
/// literal is reported as an `Error` token carrying it.
fn string_handler(lexer: &mut Lexer, identifier: String) {
    let start = lexer.pos;
    lexer.advance_char();

    match lexer.remainder().find('"') {
        Some(length) => {
            let content = lexer.remainder()[..length].to_string();
            lexer.advance_n(length + 1);
            let span = lexer.span_from(start, lexer.pos);
            lexer.push(MK_TOKEN!(TokenKind::StringLiteral, content, span));
        }
        None => {
            lexer.advance_n(lexer.remainder().len());
            let span = lexer.span_from(start, lexer.pos);
            lexer.push(MK_TOKEN!(TokenKind::Error, identifier, span));
        }
    }
}

/// Converts source text into tokens, always ending with one `Eof` token.
///
/// Never fails: characters no pattern accepts (a lone `&`, `|`, `"` or any
/// other stray symbol) are skipped without producing a token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let matched = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match matched {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                trace!(character = ?lex.peek_char(), offset = lex.pos, "skipping unrecognised character");
                lex.advance_char();
            }
        }
    }

    let span = lex.span_from(lex.pos, lex.pos);
    lex.push(MK_TOKEN!(TokenKind::Eof, String::from("EOF"), span));

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized source");
    lex.tokens
}
