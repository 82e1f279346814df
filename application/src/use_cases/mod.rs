//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke_handler;
pub mod resolve_handler;
pub mod run_query;
