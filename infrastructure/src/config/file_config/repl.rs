//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while a handler runs
    pub show_progress: bool,
    /// Path to history file (defaults to the platform data dir)
    pub history_file: Option<PathBuf>,
    /// Number of history entries kept
    pub history_size: usize,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            history_size: 500,
        }
    }
}

impl FileReplConfig {
    /// Configured history path, or `<data dir>/answer-desk/history.txt`
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("answer-desk").join("history.txt")))
    }
}
