//! Identifier and keyword lexing.

use std::io::Read;

use crate::token::{keyword_from_ident, Token};
use crate::{Lexer, TokenKind};

/// Returns true if the byte can continue an identifier.
pub(crate) fn is_ident_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

impl<'a, R: Read> Lexer<'a, R> {
    /// Lexes an identifier or keyword.
    ///
    /// Consumes the longest run of `[A-Za-z0-9_]` starting at a letter or
    /// underscore, then checks the lexeme against the reserved words.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let mut lexeme = String::new();
        while is_ident_continue(self.reader.peek()) {
            lexeme.push(self.reader.peek() as char);
            self.reader.advance();
        }

        match keyword_from_ident(&lexeme) {
            Some(kind) => self.make_token(kind, lexeme),
            None => self.make_token(TokenKind::Identifier, lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token, TokenKind};
    use cmc_util::Handler;

    fn lex_one(source: &str) -> Token {
        let handler = Handler::quiet();
        let lexer = Lexer::from_source(source, "test.cm", &handler);
        lexer.peek().clone()
    }

    #[test]
    fn test_simple_identifier() {
        let token = lex_one("foo");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "foo");
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let token = lex_one("_foo_bar123");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "_foo_bar123");
    }

    #[test]
    fn test_longest_run_consumed() {
        let handler = Handler::quiet();
        let mut lexer = Lexer::from_source("abc123+x", "test.cm", &handler);
        assert_eq!(lexer.advance().lexeme, "abc123");
        assert_eq!(lexer.advance().kind, TokenKind::Plus);
        assert_eq!(lexer.advance().lexeme, "x");
    }

    #[test]
    fn test_keywords() {
        for (source, kind) in [
            ("int", TokenKind::Int),
            ("char", TokenKind::Char),
            ("void", TokenKind::Void),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("return", TokenKind::Return),
        ] {
            let token = lex_one(source);
            assert_eq!(token.kind, kind, "keyword {}", source);
            assert_eq!(token.lexeme, source);
        }
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(lex_one("iff").kind, TokenKind::Identifier);
        assert_eq!(lex_one("intx").kind, TokenKind::Identifier);
        assert_eq!(lex_one("returned").kind, TokenKind::Identifier);
        assert_eq!(lex_one("_int").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_case_sensitive_keywords() {
        assert_eq!(lex_one("If").kind, TokenKind::Identifier);
        assert_eq!(lex_one("INT").kind, TokenKind::Identifier);
    }
}
