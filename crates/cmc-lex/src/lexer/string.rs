//! Character and string literal lexing.

use std::io::Read;

use crate::token::Token;
use crate::{Lexer, TokenKind};

impl<'a, R: Read> Lexer<'a, R> {
    /// Lexes a character literal.
    ///
    /// After the opening quote, accepts a single non-backslash byte or
    /// one of the escapes `\n \t \r \0 \\ \' \"`, then requires the
    /// closing quote. The token's lexeme is one byte holding the decoded
    /// value.
    pub(crate) fn lex_character(&mut self) -> Token {
        self.reader.advance();

        if self.reader.peek() == 0 {
            return self.error_token("unterminated character literal".to_string());
        }
        if self.reader.peek() == b'\'' {
            self.reader.advance();
            return self.error_token("empty character literal".to_string());
        }

        let value = if self.reader.peek() == b'\\' {
            self.reader.advance();
            match self.decode_escape() {
                Some(b) => b,
                None => return self.error_token("invalid escape sequence".to_string()),
            }
        } else {
            let b = self.reader.peek();
            self.reader.advance();
            b
        };

        if self.reader.peek() != b'\'' {
            return self.error_token("unterminated character literal".to_string());
        }
        self.reader.advance();

        self.make_token(TokenKind::Character, (value as char).to_string())
    }

    /// Lexes a string literal.
    ///
    /// Accepts any bytes up to the next unescaped `"`. A backslash makes
    /// the following byte part of the content without interpretation;
    /// both bytes are kept verbatim. The lexeme is the raw content
    /// between the quotes.
    pub(crate) fn lex_string(&mut self) -> Token {
        self.reader.advance();

        let mut content = String::new();
        loop {
            match self.reader.peek() {
                0 => return self.error_token("unterminated string literal".to_string()),
                b'"' => {
                    self.reader.advance();
                    break;
                }
                b'\\' => {
                    content.push('\\');
                    self.reader.advance();
                    if self.reader.peek() != 0 {
                        content.push(self.reader.peek() as char);
                        self.reader.advance();
                    }
                }
                b => {
                    content.push(b as char);
                    self.reader.advance();
                }
            }
        }

        self.make_token(TokenKind::Str, content)
    }

    /// Decodes one escape character (the byte after the backslash).
    ///
    /// Returns the decoded byte, or None for an unknown escape (the
    /// offending byte is consumed either way).
    fn decode_escape(&mut self) -> Option<u8> {
        let b = self.reader.peek();
        self.reader.advance();
        match b {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'0' => Some(0),
            b'\\' => Some(b'\\'),
            b'\'' => Some(b'\''),
            b'"' => Some(b'"'),
            _ => None,
        }
    }
}
