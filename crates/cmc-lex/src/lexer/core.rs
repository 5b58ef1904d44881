//! Core lexer implementation.
//!
//! This module contains the main Lexer struct, the single-token
//! lookahead contract, and the dispatch on the first byte of each token.

use std::io::{self, Read};
use std::mem;
use std::rc::Rc;

use cmc_util::Handler;

use crate::reader::SourceReader;
use crate::token::{Token, TokenKind};

/// Lexer for the Cm language.
///
/// The lexer always holds one scanned-ahead token: [`Lexer::peek`]
/// inspects it without consuming, [`Lexer::advance`] hands it to the
/// caller and scans the next one. After the EOF token is reached,
/// `advance` keeps returning EOF and never touches the input again.
pub struct Lexer<'a, R: Read> {
    /// Buffered character source.
    pub(crate) reader: SourceReader<R>,

    /// Diagnostics sink shared with the rest of the pipeline.
    pub(crate) handler: &'a Handler,

    /// Name of the source, shared by every token of this compilation.
    pub(crate) filename: Rc<str>,

    /// The lookahead token. Always populated after construction.
    current: Token,

    /// Line where the token being scanned starts (1-based).
    pub(crate) token_line: u32,

    /// Column where the token being scanned starts (1-based).
    pub(crate) token_column: u32,
}

impl<'a, R: Read> Lexer<'a, R> {
    /// Creates a lexer over the given input with the first token pre-loaded.
    pub fn new(input: R, filename: &str, handler: &'a Handler) -> Self {
        Self::with_reader(SourceReader::new(input), filename, handler)
    }

    /// Creates a lexer with a caller-chosen buffer size (for tests).
    pub fn with_buffer_size(input: R, size: usize, filename: &str, handler: &'a Handler) -> Self {
        Self::with_reader(SourceReader::with_buffer_size(input, size), filename, handler)
    }

    fn with_reader(reader: SourceReader<R>, filename: &str, handler: &'a Handler) -> Self {
        let filename: Rc<str> = Rc::from(filename);
        let mut lexer = Self {
            reader,
            handler,
            filename: Rc::clone(&filename),
            current: Token::new(TokenKind::Eof, "EOF", 1, 1, filename),
            token_line: 1,
            token_column: 1,
        };
        lexer.current = lexer.next_token();
        lexer
    }

    /// Returns the current (un-consumed) token without advancing.
    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Consumes the current token, returning it, and loads the next one.
    ///
    /// Once EOF has been reached, further calls return the EOF token
    /// again; no token is ever produced after it.
    pub fn advance(&mut self) -> Token {
        if self.current.kind == TokenKind::Eof {
            return self.current.clone();
        }
        let next = self.next_token();
        mem::replace(&mut self.current, next)
    }

    /// Returns the source name this lexer was created with.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Scans the next token from the input.
    pub(crate) fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_line = self.reader.line();
        self.token_column = self.reader.column();

        match self.reader.peek() {
            0 => {
                if let Some(e) = self.reader.take_error() {
                    self.handler
                        .report(&self.filename, format!("read failed: {}", e));
                }
                self.make_token(TokenKind::Eof, "EOF")
            }
            b'(' => self.punct(TokenKind::LParen, "("),
            b')' => self.punct(TokenKind::RParen, ")"),
            b'{' => self.punct(TokenKind::LBrace, "{"),
            b'}' => self.punct(TokenKind::RBrace, "}"),
            b'[' => self.punct(TokenKind::LBracket, "["),
            b']' => self.punct(TokenKind::RBracket, "]"),
            b';' => self.punct(TokenKind::Semicolon, ";"),
            b':' => self.punct(TokenKind::Colon, ":"),
            b',' => self.punct(TokenKind::Comma, ","),
            b'.' => self.punct(TokenKind::Dot, "."),
            b'#' => self.punct(TokenKind::Pound, "#"),
            b'*' => self.punct(TokenKind::Star, "*"),
            // Comment forms were consumed by the skip loop, so a slash
            // here is division.
            b'/' => self.punct(TokenKind::Slash, "/"),
            b'%' => self.punct(TokenKind::Percent, "%"),
            b'^' => self.punct(TokenKind::BitXor, "^"),
            b'~' => self.punct(TokenKind::BitNot, "~"),
            b'+' => self.lex_plus(),
            b'-' => self.lex_minus(),
            b'=' => self.lex_equals(),
            b'!' => self.lex_bang(),
            b'<' => self.lex_less(),
            b'>' => self.lex_greater(),
            b'&' => self.lex_ampersand(),
            b'|' => self.lex_pipe(),
            b'\'' => self.lex_character(),
            b'"' => self.lex_string(),
            b if b == b'_' || b.is_ascii_alphabetic() => self.lex_identifier(),
            b if b.is_ascii_digit() => self.lex_number(),
            b => {
                self.reader.advance();
                let shown = if b.is_ascii_graphic() || b == b' ' {
                    format!("'{}'", b as char)
                } else {
                    format!("'\\x{:02X}'", b)
                };
                self.error_token(format!("unrecognized character {}", shown))
            }
        }
    }

    /// Builds a token starting at the recorded token position.
    pub(crate) fn make_token(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(
            kind,
            lexeme,
            self.token_line,
            self.token_column,
            Rc::clone(&self.filename),
        )
    }

    /// Consumes one byte and builds a token for it.
    fn punct(&mut self, kind: TokenKind, text: &str) -> Token {
        self.reader.advance();
        self.make_token(kind, text)
    }

    /// Consumes the next byte if it matches.
    pub(crate) fn match_byte(&mut self, expected: u8) -> bool {
        if self.reader.peek() == expected {
            self.reader.advance();
            true
        } else {
            false
        }
    }

    /// Reports a lexical error at the current token's start position and
    /// returns an Error token carrying the diagnostic text.
    pub(crate) fn error_token(&mut self, message: String) -> Token {
        self.handler
            .report_at(&self.filename, self.token_line, self.token_column, message.clone());
        self.make_token(TokenKind::Error, message)
    }
}

impl<'a> Lexer<'a, io::Cursor<Vec<u8>>> {
    /// Creates a lexer over an in-memory source. Convenience for tests
    /// and tools that already hold the text.
    pub fn from_source(source: &str, filename: &str, handler: &'a Handler) -> Self {
        Self::new(io::Cursor::new(source.as_bytes().to_vec()), filename, handler)
    }
}

impl<'a, R: Read> Iterator for Lexer<'a, R> {
    type Item = Token;

    /// Yields tokens up to (not including) EOF, then fuses.
    fn next(&mut self) -> Option<Token> {
        if self.current.kind == TokenKind::Eof {
            None
        } else {
            Some(self.advance())
        }
    }
}
