//! Driver error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the driver itself.
///
/// Parse and lexical diagnostics are not errors at this level; they go
/// through the diagnostics handler and leave the exit status untouched.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Wrong command line.
    #[error("expected exactly one source file\nusage: cmc <source-file>")]
    Usage,

    /// The input file could not be opened.
    #[error("cannot open '{file}': {source}", file = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DriverError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Usage => 2,
            DriverError::Io { .. } => 1,
        }
    }
}
