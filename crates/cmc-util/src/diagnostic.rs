//! Diagnostic module - error and warning reporting infrastructure.
//!
//! Every diagnostic is a single line on standard error, tagged with the
//! source filename and, when known, the line/column of the offending
//! construct. The [`Handler`] collects what was emitted so callers can
//! query the error count after a compilation.
//!
//! One handler is shared by the whole pipeline: the lexer and the parser
//! each hold a `&Handler` and report at the point of detection. The
//! handler uses interior mutability so the shared reference suffices;
//! the design is single-threaded throughout.

use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that makes the resulting tree unreliable.
    Error,
    /// A condition worth flagging that does not invalidate the parse.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic message.
///
/// `position` is absent for file-level messages (e.g. an I/O failure
/// discovered mid-stream); `token` carries the offending lexeme when the
/// reporter had one in hand.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub filename: String,
    pub position: Option<(u32, u32)>,
    pub token: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)?;
        if let Some((line, column)) = self.position {
            write!(f, ":{}:{}", line, column)?;
        }
        write!(f, ": {}: ", self.level)?;
        if let Some(token) = &self.token {
            write!(f, "near '{}': ", token)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Handler for collecting and reporting diagnostics.
///
/// Reports are formatted to standard error as they arrive and recorded
/// for later queries. [`Handler::count`] returns the number of errors so
/// far; [`Handler::reset`] clears the record.
///
/// # Examples
///
/// ```
/// use cmc_util::Handler;
///
/// let handler = Handler::quiet();
/// handler.report_at("main.cm", 3, 7, "expected ';', got '}'");
/// assert_eq!(handler.count(), 1);
/// handler.reset();
/// assert_eq!(handler.count(), 0);
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    /// When false, diagnostics are recorded but not written to stderr.
    write_stderr: bool,
}

impl Handler {
    /// Creates a handler that writes each diagnostic to standard error.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            write_stderr: true,
        }
    }

    /// Creates a handler that records diagnostics without printing them.
    ///
    /// Used by tests and benchmarks.
    pub fn quiet() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            write_stderr: false,
        }
    }

    /// Reports an error with no source position.
    pub fn report(&self, filename: &str, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Error,
            filename: filename.to_string(),
            position: None,
            token: None,
            message: message.into(),
        });
    }

    /// Reports an error at a source position.
    pub fn report_at(&self, filename: &str, line: u32, column: u32, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Error,
            filename: filename.to_string(),
            position: Some((line, column)),
            token: None,
            message: message.into(),
        });
    }

    /// Reports an error at a source position, quoting the offending token.
    pub fn report_with_token(
        &self,
        filename: &str,
        line: u32,
        column: u32,
        token_text: &str,
        message: impl Into<String>,
    ) {
        self.emit(Diagnostic {
            level: Level::Error,
            filename: filename.to_string(),
            position: Some((line, column)),
            token: Some(token_text.to_string()),
            message: message.into(),
        });
    }

    /// Reports a warning at a source position.
    pub fn warn_at(&self, filename: &str, line: u32, column: u32, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Warning,
            filename: filename.to_string(),
            position: Some((line, column)),
            token: None,
            message: message.into(),
        });
    }

    fn emit(&self, diagnostic: Diagnostic) {
        if self.write_stderr {
            eprintln!("{}", diagnostic);
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns the number of errors reported so far.
    pub fn count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Returns the number of warnings reported so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Returns true if any error has been reported.
    pub fn has_errors(&self) -> bool {
        self.count() > 0
    }

    /// Clears all recorded diagnostics.
    pub fn reset(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    /// Returns a snapshot of every diagnostic reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
    }

    #[test]
    fn test_new_handler_is_clean() {
        let handler = Handler::quiet();
        assert_eq!(handler.count(), 0);
        assert_eq!(handler.warning_count(), 0);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_report() {
        let handler = Handler::quiet();
        handler.report("main.cm", "could not read input");
        assert_eq!(handler.count(), 1);
        assert!(handler.has_errors());

        let diags = handler.diagnostics();
        assert_eq!(format!("{}", diags[0]), "main.cm: error: could not read input");
    }

    #[test]
    fn test_report_at() {
        let handler = Handler::quiet();
        handler.report_at("main.cm", 3, 7, "unterminated string literal");

        let diags = handler.diagnostics();
        assert_eq!(
            format!("{}", diags[0]),
            "main.cm:3:7: error: unterminated string literal"
        );
    }

    #[test]
    fn test_report_with_token() {
        let handler = Handler::quiet();
        handler.report_with_token("main.cm", 1, 5, "}", "expected ';', got '}'");

        let diags = handler.diagnostics();
        assert_eq!(
            format!("{}", diags[0]),
            "main.cm:1:5: error: near '}': expected ';', got '}'"
        );
    }

    #[test]
    fn test_warning_does_not_count_as_error() {
        let handler = Handler::quiet();
        handler.warn_at("main.cm", 2, 1, "empty declaration");
        assert_eq!(handler.count(), 0);
        assert_eq!(handler.warning_count(), 1);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_each_report_increments_once() {
        let handler = Handler::quiet();
        for i in 0..5 {
            handler.report_at("main.cm", i, 1, "boom");
        }
        assert_eq!(handler.count(), 5);
    }

    #[test]
    fn test_reset() {
        let handler = Handler::quiet();
        handler.report("main.cm", "boom");
        handler.reset();
        assert_eq!(handler.count(), 0);
        assert!(handler.diagnostics().is_empty());
    }
}
