//! # Scanner
//!
//! The lexical stage of the front-end. A [`Scanner`] feeds the input bytes
//! through the transition table in [`state`] and commits lexemes whenever a
//! boundary byte is reached; the boundary byte always belongs to the *next*
//! lexeme. Lexical errors never abort the scan: the machine resynchronizes
//! and keeps producing tokens.
//!
//! Alongside the token stream the scanner maintains the line counter and the
//! symbol table, which starts out with the eight reserved words and grows by
//! one row for every identifier on first sight.

mod state;
mod token;

pub use state::*;
pub use token::*;

use std::fmt::Display;

use log::trace;
use serde::{Deserialize, Serialize};

/// Error lexemes are clipped to this many bytes in reports.
const ERROR_LEXEME_LIMIT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexicalErrorKind {
    InvalidNumber,
    InvalidInput,
    UnmatchedComment,
    UnclosedComment,
}

impl Display for LexicalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            LexicalErrorKind::InvalidNumber => "Invalid number",
            LexicalErrorKind::InvalidInput => "Invalid input",
            LexicalErrorKind::UnmatchedComment => "Unmatched comment",
            LexicalErrorKind::UnclosedComment => "Unclosed comment",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub lexeme: String,
    pub lineno: usize,
}

impl LexicalError {
    fn new(kind: LexicalErrorKind, lexeme: &str, lineno: usize) -> Self {
        Self {
            kind,
            lexeme: clip(lexeme),
            lineno,
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.lexeme, self.kind))
    }
}

fn clip(lexeme: &str) -> String {
    if lexeme.len() > ERROR_LEXEME_LIMIT {
        format!("{}...", &lexeme[..ERROR_LEXEME_LIMIT])
    } else {
        lexeme.to_string()
    }
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

pub struct Scanner {
    source: Vec<u8>,
    cursor: usize,
    state: State,
    buffer: String,
    lineno: usize,
    finished: bool,
    served: usize,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    symbol_table: Vec<String>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.as_bytes().to_vec(),
            cursor: 0,
            state: State::Start,
            buffer: String::new(),
            lineno: 1,
            finished: false,
            served: 0,
            tokens: vec![],
            errors: vec![],
            symbol_table: KEYWORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    /// Pull the next token, advancing the state machine as far as needed.
    /// Once the input is exhausted this keeps returning the END token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.served < self.tokens.len() {
                let token = self.tokens[self.served].clone();
                self.served += 1;
                return token;
            }

            match self.source.get(self.cursor).copied() {
                Some(byte) => {
                    self.cursor += 1;
                    self.step(byte);
                    if byte == b'\n' {
                        self.lineno += 1;
                    }
                }
                None => {
                    if !self.finished {
                        self.finish();
                        continue;
                    }
                    return Token::end(self.lineno);
                }
            }
        }
    }

    /// All tokens committed so far.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    pub fn symbol_table(&self) -> &[String] {
        &self.symbol_table
    }

    fn step(&mut self, byte: u8) {
        let Some(rule) = rules(self.state).iter().find(|rule| (rule.pred)(byte)) else {
            let lexeme = format!("{}{}", self.buffer, byte as char);
            let lineno = self.lineno - newlines(&lexeme);
            self.errors
                .push(LexicalError::new(LexicalErrorKind::InvalidInput, &lexeme, lineno));
            self.buffer.clear();
            self.state = State::PanicMode;
            return;
        };

        match rule.effect {
            Effect::Extend => self.buffer.push(byte as char),
            Effect::Boundary => {
                self.commit();
                self.buffer.push(byte as char);
            }
            Effect::Absorb => {}
            Effect::Discard => self.buffer.clear(),
        }

        self.state = rule.next;
    }

    /// Commit the pending buffer as the product of the current state.
    fn commit(&mut self) {
        let lexeme = std::mem::take(&mut self.buffer);
        if lexeme.is_empty() {
            return;
        }

        let lineno = self.lineno - newlines(&lexeme);

        match self.state {
            State::Identifier => {
                let kind = if is_keyword(&lexeme) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Id
                };

                if !self.symbol_table.iter().any(|row| *row == lexeme) {
                    self.symbol_table.push(lexeme.clone());
                }

                trace!("committed {kind} '{lexeme}' on line {lineno}");
                self.tokens.push(Token::new(kind, lexeme, lineno));
            }
            State::Number => {
                trace!("committed NUM '{lexeme}' on line {lineno}");
                self.tokens.push(Token::new(TokenKind::Num, lexeme, lineno));
            }
            State::Symbol | State::SymbolEqual | State::DoubleEqual | State::SymbolStar => {
                trace!("committed SYMBOL '{lexeme}' on line {lineno}");
                self.tokens.push(Token::new(TokenKind::Symbol, lexeme, lineno));
            }
            State::InvalidNumber => {
                self.errors
                    .push(LexicalError::new(LexicalErrorKind::InvalidNumber, &lexeme, lineno));
            }
            State::UnmatchedComment => {
                self.errors
                    .push(LexicalError::new(LexicalErrorKind::UnmatchedComment, &lexeme, lineno));
            }
            State::PanicMode | State::StartingComment => {
                self.errors
                    .push(LexicalError::new(LexicalErrorKind::InvalidInput, &lexeme, lineno));
            }
            _ => {}
        }
    }

    /// Flush the machine with a synthetic newline and report a comment left
    /// open at end-of-input.
    fn finish(&mut self) {
        self.finished = true;
        self.step(b'\n');

        if matches!(self.state, State::OngoingComment | State::EndingComment) {
            let body = self
                .buffer
                .strip_suffix('\n')
                .unwrap_or(&self.buffer)
                .to_string();
            let lineno = self.lineno - newlines(&self.buffer) + 1;
            self.errors
                .push(LexicalError::new(LexicalErrorKind::UnclosedComment, &body, lineno));
            self.buffer.clear();
        }
    }
}
