//! Interactive chat module
//!
//! Provides a reedline-based REPL that sends each line as a query.

mod repl;

pub use repl::ChatRepl;
