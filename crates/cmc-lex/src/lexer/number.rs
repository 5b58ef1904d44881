//! Integer literal lexing.

use std::io::Read;

use crate::token::Token;
use crate::{Lexer, TokenKind};

impl<'a, R: Read> Lexer<'a, R> {
    /// Lexes a decimal integer literal.
    ///
    /// Consumes the longest run of `[0-9]` and keeps the lexeme verbatim;
    /// decoding is the parser's job.
    pub(crate) fn lex_number(&mut self) -> Token {
        let mut lexeme = String::new();
        while self.reader.peek().is_ascii_digit() {
            lexeme.push(self.reader.peek() as char);
            self.reader.advance();
        }
        self.make_token(TokenKind::Integer, lexeme)
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
    fn test_integers() {
        for source in ["0", "7", "42", "123456789"] {
            let token = lex_one(source);
            assert_eq!(token.kind, TokenKind::Integer);
            assert_eq!(token.lexeme, source);
        }
    }

    #[test]
    fn test_leading_zeros_kept_verbatim() {
        assert_eq!(lex_one("007").lexeme, "007");
    }

    #[test]
    fn test_number_stops_at_non_digit() {
        let handler = Handler::quiet();
        let mut lexer = Lexer::from_source("12ab", "test.cm", &handler);
        assert_eq!(lexer.advance().lexeme, "12");
        // The trailing letters lex as a separate identifier.
        assert_eq!(lexer.advance().lexeme, "ab");
    }
}
