//! cmc-util - Shared infrastructure for the Cm compiler.
//!
//! This crate holds the pieces every phase of the front end needs:
//! the diagnostic handler and its message types. The lexer and parser
//! report through a shared [`Handler`]; the driver queries it after the
//! pipeline has run.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Handler, Level};
