//! Presentation layer for answer-desk
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, FormatArg, ModeArg};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress, notifier_for};
