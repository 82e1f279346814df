//! Configuration file loading for answer-desk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ANSWER_DESK_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./answer-desk.toml` or `./.answer-desk.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/answer-desk/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileHandlersConfig, FileOutputConfig, FileReplConfig};
pub use loader::ConfigLoader;
