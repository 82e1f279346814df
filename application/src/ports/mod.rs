//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod handler;
pub mod module_loader;
pub mod progress;
