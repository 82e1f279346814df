//! Infrastructure layer for answer-desk
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod handlers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileHandlersConfig, FileOutputConfig, FileReplConfig};
pub use handlers::{
    CommandHandler, CommandSpec, FnHandler, ManifestModuleLoader, UnconfiguredModuleLoader,
};
