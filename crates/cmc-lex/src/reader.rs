//! Character source for traversing a byte stream.
//!
//! This module provides [`SourceReader`], which feeds the lexer one byte
//! at a time from a fixed-size buffer that is refilled on demand. It
//! offers a two-byte lookahead and tracks line/column information for
//! error reporting.

use std::io::{self, Read};

use static_assertions::const_assert;

/// Default size of the refillable input buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// The lexer looks at most two bytes ahead, so a refill must always be
/// able to hold that much.
const MIN_BUFFER_SIZE: usize = 2;

const_assert!(DEFAULT_BUFFER_SIZE >= MIN_BUFFER_SIZE);

/// A buffered character source with a two-byte lookahead.
///
/// `peek` returns the byte at the cursor, `peek2` the byte one past it,
/// and `advance` moves the cursor forward while maintaining 1-based
/// line/column counters. The null byte `0` is the canonical end-of-input
/// signal; there is no separate EOF predicate.
///
/// Refilling never loses unread bytes: the unread suffix of the buffer is
/// compacted to the front before more input is read, so lookahead stays
/// valid across a reload.
///
/// # Example
///
/// ```
/// use cmc_lex::reader::SourceReader;
///
/// let mut reader = SourceReader::new(std::io::Cursor::new(b"ab".to_vec()));
/// assert_eq!(reader.peek(), b'a');
/// assert_eq!(reader.peek2(), b'b');
/// reader.advance();
/// assert_eq!(reader.peek(), b'b');
/// reader.advance();
/// assert_eq!(reader.peek(), 0);
/// ```
pub struct SourceReader<R: Read> {
    /// The underlying input stream.
    input: R,

    /// Refillable byte buffer.
    buf: Box<[u8]>,

    /// Number of valid bytes in `buf`.
    len: usize,

    /// Cursor into the valid region of `buf`.
    pos: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based).
    column: u32,

    /// Set once the stream has been exhausted (or has failed).
    eof: bool,

    /// First read failure, if any; surfaced once via [`SourceReader::take_error`].
    error: Option<io::Error>,
}

impl<R: Read> SourceReader<R> {
    /// Creates a reader with the default buffer size.
    pub fn new(input: R) -> Self {
        Self::with_buffer_size(input, DEFAULT_BUFFER_SIZE)
    }

    /// Creates a reader with a caller-chosen buffer size.
    ///
    /// Sizes below the lookahead depth are rounded up. Tests use tiny
    /// buffers to force refills inside every token.
    pub fn with_buffer_size(input: R, size: usize) -> Self {
        let size = size.max(MIN_BUFFER_SIZE);
        Self {
            input,
            buf: vec![0u8; size].into_boxed_slice(),
            len: 0,
            pos: 0,
            line: 1,
            column: 1,
            eof: false,
            error: None,
        }
    }

    /// Returns the byte at the cursor, or `0` at end of input.
    #[inline]
    pub fn peek(&mut self) -> u8 {
        self.byte_at(0)
    }

    /// Returns the byte one past the cursor, or `0` at end of input.
    #[inline]
    pub fn peek2(&mut self) -> u8 {
        self.byte_at(1)
    }

    fn byte_at(&mut self, offset: usize) -> u8 {
        debug_assert!(offset < MIN_BUFFER_SIZE);
        if self.pos + offset >= self.len {
            self.refill();
        }
        if self.pos + offset < self.len {
            self.buf[self.pos + offset]
        } else {
            0
        }
    }

    /// Moves the cursor one byte forward.
    ///
    /// A newline increments `line` and resets `column` to 1; any other
    /// byte increments `column`. Does nothing at end of input.
    pub fn advance(&mut self) {
        let b = self.peek();
        if self.pos >= self.len {
            return;
        }
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Refills the buffer from the input stream.
    ///
    /// The unread suffix is moved to the front of the buffer first, so
    /// bytes the cursor has not consumed are never lost and lookahead
    /// never observes stale data after a reload.
    fn refill(&mut self) {
        if self.eof {
            return;
        }
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.len, 0);
            self.len -= self.pos;
            self.pos = 0;
        }
        while self.len < self.buf.len() {
            match self.input.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => self.len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    self.eof = true;
                    break;
                }
            }
        }
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Takes the first read failure, if one occurred.
    ///
    /// After a failure the reader behaves as if the stream had ended.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}
