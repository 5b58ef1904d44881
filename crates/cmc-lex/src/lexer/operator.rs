//! Operator lexing for the initial bytes with two-character forms.
//!
//! Single-byte operators and punctuation are handled directly by the
//! dispatch in `core`; these methods cover the bytes where the longer
//! match must win.

use std::io::Read;

use crate::token::Token;
use crate::{Lexer, TokenKind};

impl<'a, R: Read> Lexer<'a, R> {
    /// Lexes `+` or `++`.
    pub(crate) fn lex_plus(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'+') {
            self.make_token(TokenKind::Inc, "++")
        } else {
            self.make_token(TokenKind::Plus, "+")
        }
    }

    /// Lexes `-` or `--`.
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'-') {
            self.make_token(TokenKind::Dec, "--")
        } else {
            self.make_token(TokenKind::Minus, "-")
        }
    }

    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'=') {
            self.make_token(TokenKind::Eq, "==")
        } else {
            self.make_token(TokenKind::Assign, "=")
        }
    }

    /// Lexes `!` or `!=`.
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'=') {
            self.make_token(TokenKind::Neq, "!=")
        } else {
            self.make_token(TokenKind::Not, "!")
        }
    }

    /// Lexes `<`, `<=`, or `<<`.
    pub(crate) fn lex_less(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'=') {
            self.make_token(TokenKind::Lte, "<=")
        } else if self.match_byte(b'<') {
            self.make_token(TokenKind::Shl, "<<")
        } else {
            self.make_token(TokenKind::Lt, "<")
        }
    }

    /// Lexes `>`, `>=`, or `>>`.
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'=') {
            self.make_token(TokenKind::Gte, ">=")
        } else if self.match_byte(b'>') {
            self.make_token(TokenKind::Shr, ">>")
        } else {
            self.make_token(TokenKind::Gt, ">")
        }
    }

    /// Lexes `&` or `&&`.
    pub(crate) fn lex_ampersand(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'&') {
            self.make_token(TokenKind::And, "&&")
        } else {
            self.make_token(TokenKind::BitAnd, "&")
        }
    }

    /// Lexes `|` or `||`.
    pub(crate) fn lex_pipe(&mut self) -> Token {
        self.reader.advance();
        if self.match_byte(b'|') {
            self.make_token(TokenKind::Or, "||")
        } else {
            self.make_token(TokenKind::BitOr, "|")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};
    use cmc_util::Handler;

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        let handler = Handler::quiet();
        Lexer::from_source(source, "test.cm", &handler)
            .map(|t| t.kind)
            .collect()
    }

    fn lex_kind(source: &str) -> TokenKind {
        let kinds = lex_kinds(source);
        assert_eq!(kinds.len(), 1, "expected a single token from {:?}", source);
        kinds[0]
    }

    #[test]
    fn test_single_character_operators() {
        assert_eq!(lex_kind("+"), TokenKind::Plus);
        assert_eq!(lex_kind("-"), TokenKind::Minus);
        assert_eq!(lex_kind("*"), TokenKind::Star);
        assert_eq!(lex_kind("/"), TokenKind::Slash);
        assert_eq!(lex_kind("%"), TokenKind::Percent);
        assert_eq!(lex_kind("="), TokenKind::Assign);
        assert_eq!(lex_kind("!"), TokenKind::Not);
        assert_eq!(lex_kind("<"), TokenKind::Lt);
        assert_eq!(lex_kind(">"), TokenKind::Gt);
        assert_eq!(lex_kind("&"), TokenKind::BitAnd);
        assert_eq!(lex_kind("|"), TokenKind::BitOr);
        assert_eq!(lex_kind("^"), TokenKind::BitXor);
        assert_eq!(lex_kind("~"), TokenKind::BitNot);
        assert_eq!(lex_kind("#"), TokenKind::Pound);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex_kinds("; : , . ( ) { } [ ]"),
            vec![
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn test_longer_match_wins() {
        assert_eq!(lex_kind("++"), TokenKind::Inc);
        assert_eq!(lex_kind("--"), TokenKind::Dec);
        assert_eq!(lex_kind("=="), TokenKind::Eq);
        assert_eq!(lex_kind("!="), TokenKind::Neq);
        assert_eq!(lex_kind("<="), TokenKind::Lte);
        assert_eq!(lex_kind("<<"), TokenKind::Shl);
        assert_eq!(lex_kind(">="), TokenKind::Gte);
        assert_eq!(lex_kind(">>"), TokenKind::Shr);
        assert_eq!(lex_kind("&&"), TokenKind::And);
        assert_eq!(lex_kind("||"), TokenKind::Or);
    }

    #[test]
    fn test_adjacent_operators_split_greedily() {
        assert_eq!(lex_kinds("+++"), vec![TokenKind::Inc, TokenKind::Plus]);
        assert_eq!(lex_kinds("==="), vec![TokenKind::Eq, TokenKind::Assign]);
        assert_eq!(lex_kinds("<<="), vec![TokenKind::Shl, TokenKind::Assign]);
        assert_eq!(
            lex_kinds("a=-1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Minus,
                TokenKind::Integer
            ]
        );
    }

    #[test]
    fn test_operator_lexemes() {
        let handler = Handler::quiet();
        let lexemes: Vec<String> = Lexer::from_source("<= >> != ||", "test.cm", &handler)
            .map(|t| t.lexeme)
            .collect();
        assert_eq!(lexemes, vec!["<=", ">>", "!=", "||"]);
    }
}
