//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Show a spinner while a handler runs
    pub show_progress: bool,
    /// History file, `None` keeps history in memory only
    pub history_file: Option<PathBuf>,
    /// Maximum number of history entries
    pub history_size: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            history_size: 500,
        }
    }
}
