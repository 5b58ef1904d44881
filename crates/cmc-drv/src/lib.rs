//! cmc-drv - Compiler driver.
//!
//! Orchestrates the front end: command-line parsing, opening the source
//! file, running lexer and parser, and printing the tree dump. The
//! pipeline is
//!
//! ```text
//! source file -> [SourceReader] -> [Lexer] -> [Parser] -> tree dump
//! ```
//!
//! Diagnostics stream to standard error as they are found; the dump (if
//! produced) goes to standard output. The process exits 0 regardless of
//! the diagnostic count - only a bad command line or an unreadable file
//! fails the driver.

pub mod error;

use std::fs::File;
use std::path::PathBuf;

use cmc_lex::Lexer;
use cmc_par::Parser;
use cmc_util::Handler;

pub use error::DriverError;

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the single source file to compile.
    pub input: PathBuf,
}

impl Config {
    /// Parses the process arguments: exactly one positional input path.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, DriverError> {
        let mut inputs: Vec<String> = args.into_iter().skip(1).collect();
        if inputs.len() != 1 {
            return Err(DriverError::Usage);
        }
        Ok(Self {
            input: PathBuf::from(inputs.remove(0)),
        })
    }
}

/// Runs the front end over the configured input.
///
/// Prints the filename and then the syntax tree to standard output.
/// Lexical and syntactic diagnostics do not fail the compilation; the
/// tree holds whatever survived recovery.
pub fn compile(config: &Config) -> Result<(), DriverError> {
    let file = File::open(&config.input).map_err(|source| DriverError::Io {
        path: config.input.clone(),
        source,
    })?;
    let filename = config.input.display().to_string();

    let handler = Handler::new();
    let lexer = Lexer::new(file, &filename, &handler);
    let mut parser = Parser::new(lexer, &handler);
    let program = parser.parse_program();

    println!("{}", filename);
    print!("{}", program.dump());

    Ok(())
}

/// Entry point shared with the `cmc` binary.
pub fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args())?;
    compile(&config)?;
    Ok(())
}
