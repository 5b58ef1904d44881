//! cmc-lex - Lexical analyzer for the Cm language.
//!
//! Transforms a byte stream into a stream of [`Token`]s with a single
//! token of lookahead. The lexer owns a buffered [`SourceReader`] and the
//! current token; parsers drive it through [`Lexer::peek`] and
//! [`Lexer::advance`].
//!
//! Module layout:
//! - `reader` - buffered character source with two-byte lookahead
//! - `token` - token kinds and the token record
//! - `lexer` - the scanner itself, one concern per file

pub mod reader;
pub mod token;

mod lexer;

pub use lexer::Lexer;
pub use reader::SourceReader;
pub use token::{keyword_from_ident, Token, TokenKind};
