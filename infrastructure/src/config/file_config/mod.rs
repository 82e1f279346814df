//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod handlers;
mod output;
mod repl;

pub use handlers::FileHandlersConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use desk_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Handler module and resolution settings
    pub handlers: FileHandlersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks the resolver strategy, the handler deadline, and the default
    /// mode. A missing manifest is not an issue: runs fall back to demo
    /// answers.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.handlers.to_run_params().1);
        issues.extend(self.handlers.parse_default_mode().1);
        issues
    }
}
