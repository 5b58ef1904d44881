//! Whitespace and comment skipping.

use std::io::Read;

use crate::Lexer;

impl<'a, R: Read> Lexer<'a, R> {
    /// Skips whitespace and comments before the next token.
    ///
    /// Repeats until neither applies: a run of whitespace (space, tab,
    /// CR, LF), a `//` line comment, or a `/* */` block comment.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.reader.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => self.reader.advance(),
                b'/' => match self.reader.peek2() {
                    b'/' => self.skip_line_comment(),
                    b'*' => self.skip_block_comment(),
                    _ => return,
                },
                _ => return,
            }
        }
    }

    /// Skips a `//` comment up to (not including) the end of the line.
    fn skip_line_comment(&mut self) {
        self.reader.advance();
        self.reader.advance();
        while self.reader.peek() != 0 && self.reader.peek() != b'\n' {
            self.reader.advance();
        }
    }

    /// Skips a `/* */` comment. Block comments do not nest.
    ///
    /// An unterminated comment is reported at the comment's start; the
    /// reader is then at end of input and the caller produces EOF.
    fn skip_block_comment(&mut self) {
        let line = self.reader.line();
        let column = self.reader.column();
        self.reader.advance();
        self.reader.advance();

        loop {
            if self.reader.peek() == 0 {
                self.handler
                    .report_at(&self.filename, line, column, "unterminated block comment");
                return;
            }
            if self.reader.peek() == b'*' && self.reader.peek2() == b'/' {
                self.reader.advance();
                self.reader.advance();
                return;
            }
            self.reader.advance();
        }
    }
}
