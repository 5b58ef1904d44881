//! cmc-par - Recursive-descent parser for the Cm language.
//!
//! The parser drives a single-token-lookahead [`Lexer`] and builds the
//! [`ast::Node`] tree bottom-up. Operator precedence is resolved by the
//! nesting of the grammar levels in `expr` (lowest-binding outermost);
//! all binary operators are left-associative except assignment.
//!
//! Error handling is panic-mode recovery at three levels:
//! - top level: discard through the next `;` or EOF, then resume;
//! - inside a compound statement: discard to `;`/`}`/EOF, consuming a `;`;
//! - inside expressions and declarators: report and leave the offending
//!   slot absent, discarding nothing.
//!
//! Module layout:
//! - `ast` - tree node definitions
//! - `items` - top-level declarations, function tails, parameters
//! - `stmt` - statements and block synchronization
//! - `expr` - the expression precedence ladder
//! - `dump` - human-readable tree printer

pub mod ast;
pub mod dump;

mod expr;
mod items;
mod stmt;

use std::io::Read;

use cmc_lex::{Lexer, Token, TokenKind};
use cmc_util::Handler;

pub use ast::{
    AssignExpr, BinOp, BinaryExpr, CallExpr, DataType, Function, IfStmt, Node, Parameter,
    ReturnStmt, SubscriptExpr, UnOp, UnaryExpr, VariableDecl, WhileStmt,
};
pub use dump::TreeDump;

/// Recursive-descent parser over a single-token lookahead lexer.
///
/// The parser owns the lexer and shares the diagnostics handler with it.
/// Its only other state is what lives on the call stack.
pub struct Parser<'a, R: Read> {
    lexer: Lexer<'a, R>,
    handler: &'a Handler,
}

impl<'a, R: Read> Parser<'a, R> {
    /// Creates a parser over the given lexer.
    pub fn new(lexer: Lexer<'a, R>, handler: &'a Handler) -> Self {
        Self { lexer, handler }
    }

    /// Parses a whole translation unit.
    ///
    /// Never fails: errors are reported through the handler and recovered
    /// per the rules above, so the returned Program holds whatever
    /// declarations survived.
    pub fn parse_program(&mut self) -> Node {
        let mut decls = Vec::new();
        while !self.at_eof() {
            if self.check(TokenKind::Pound) {
                self.skip_directive();
                continue;
            }
            match self.parse_top_decl() {
                Some(decl) => decls.push(decl),
                None => self.sync_top_level(),
            }
        }
        Node::Program(decls)
    }

    /// Skips a preprocessor line: `# IDENT { token } [';']`.
    ///
    /// Directives run through the next `;`, not to the end of the line.
    fn skip_directive(&mut self) {
        self.bump();
        self.eat(TokenKind::Identifier);
        while !self.check(TokenKind::Semicolon) && !self.at_eof() {
            self.bump();
        }
        if self.check(TokenKind::Semicolon) {
            self.bump();
        }
    }

    /// Top-level recovery: discard up to and including the next `;`,
    /// or stop at EOF.
    fn sync_top_level(&mut self) {
        while !self.at_eof() {
            if self.bump().kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    /// The current (un-consumed) token.
    pub(crate) fn current(&self) -> &Token {
        self.lexer.peek()
    }

    /// True if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// True at the end of the token stream.
    pub(crate) fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consumes and returns the current token.
    pub(crate) fn bump(&mut self) -> Token {
        self.lexer.advance()
    }

    /// Consumes the expected token kind, or reports "expected X, got Y"
    /// and returns false. Does not attempt recovery; callers decide.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            let message = format!("expected {}, got {}", kind, self.current().kind);
            self.error_at_current(message);
            false
        }
    }

    /// Reports an error at the current token, quoting its lexeme.
    pub(crate) fn error_at_current(&self, message: impl Into<String>) {
        let token = self.current();
        self.handler.report_with_token(
            &token.filename,
            token.line,
            token.column,
            &token.lexeme,
            message,
        );
    }
}
