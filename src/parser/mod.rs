//! # Parser
//!
//! Recursive descent over the declarative grammar table. The parser pulls
//! tokens from the scanner one lookahead at a time, predicts productions via
//! FIRST (falling back to a nullable alternative when the lookahead sits in
//! FOLLOW), and builds the parse tree as it expands paths. Code-generator
//! actions embedded in the paths fire at their position with the most
//! recently consumed token.
//!
//! Recovery is panic mode: an unusable lookahead inside FOLLOW drops the
//! whole non-terminal (`missing <N>`), anything else is skipped one token at
//! a time (`illegal <t>`) until something usable appears. Reaching
//! end-of-input this way halts the parser for good; no further productions
//! or actions run after that.

pub mod grammar;
pub mod tree;

pub use grammar::*;
pub use tree::*;

use std::error::Error;
use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codegen::CodeGen;
use crate::scanner::{Scanner, Token};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    pub message: String,
    pub lineno: usize,
}

impl SyntaxError {
    fn new(message: impl ToString, lineno: usize) -> Self {
        Self {
            message: message.to_string(),
            lineno,
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "#{} : syntax error, {}",
            self.lineno, self.message
        ))
    }
}

impl Error for SyntaxError {}

pub struct Parser {
    scanner: Scanner,
    codegen: CodeGen,
    tree: ParseTree,
    errors: Vec<SyntaxError>,
    token: Token,
    lookahead: Option<Term>,
    consumed: Option<Token>,
    parsing: bool,
    done: bool,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut scanner = Scanner::new(source);
        let token = scanner.next_token();
        let lookahead = Term::from_token(&token);

        Self {
            scanner,
            codegen: CodeGen::new(),
            tree: ParseTree::new(),
            errors: vec![],
            token,
            lookahead,
            consumed: None,
            parsing: true,
            done: false,
        }
    }

    /// Run `program` to completion. Calling this a second time is a no-op
    /// returning the same tree and error list.
    pub fn parse(&mut self) -> (&ParseTree, &[SyntaxError]) {
        if !self.done {
            self.done = true;
            self.expand(NonTerminal::Program, None);
        }

        (&self.tree, &self.errors)
    }

    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn codegen(&self) -> &CodeGen {
        &self.codegen
    }

    /// Expand one non-terminal, retrying after panic-mode skips.
    fn expand(&mut self, nt: NonTerminal, parent: Option<NodeId>) {
        loop {
            let node = self.tree.add(parent, nt.display_name());

            if let Some(production) = GRAMMAR.select(nt, self.lookahead) {
                let path = production.path.clone();
                for symbol in path {
                    if !self.parsing {
                        break;
                    }
                    match symbol {
                        Symbol::N(child) => self.expand(child, Some(node)),
                        Symbol::T(term) => self.match_terminal(term, node),
                        Symbol::A(action) => self.codegen.apply(action, self.consumed.as_ref()),
                        Symbol::Epsilon => {
                            self.tree.add(Some(node), "epsilon");
                        }
                    }
                }
                return;
            }

            // nothing matched: this occurrence of the non-terminal is dropped
            self.tree.remove(node);

            if let Some(term) = self.lookahead {
                if GRAMMAR.follow(nt).contains(term) {
                    self.report(format!("missing {}", nt.display_name()));
                    return;
                }

                if term == Term::End {
                    self.report("Unexpected EOF");
                    self.parsing = false;
                    return;
                }
            }

            let surface = self
                .lookahead
                .map(|term| term.surface().to_string())
                .unwrap_or_else(|| self.token.lexeme.clone());
            self.report(format!("illegal {surface}"));
            debug!(
                "panic mode: skipping '{}' on line {}",
                self.token.lexeme, self.token.lineno
            );
            self.advance();
        }
    }

    /// Match one terminal of a path against the lookahead. A mismatch is
    /// reported but treated as if the terminal had been there.
    fn match_terminal(&mut self, term: Term, parent: NodeId) {
        if self.lookahead != Some(term) {
            self.report(format!("missing {}", term.surface()));
            return;
        }

        if term == Term::End {
            self.tree.add(Some(parent), "$");
            return;
        }

        self.tree.add(Some(parent), self.token.to_string());
        self.advance();
    }

    fn advance(&mut self) {
        let next = self.scanner.next_token();
        if next.lineno != self.token.lineno {
            self.codegen.semantic_refresh(next.lineno);
        }

        self.consumed = Some(std::mem::replace(&mut self.token, next));
        self.lookahead = Term::from_token(&self.token);
    }

    fn report(&mut self, message: impl ToString) {
        self.errors.push(SyntaxError::new(message, self.token.lineno));
    }
}
