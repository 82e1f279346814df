//! Application layer for answer-desk
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ResolverStrategy, RunParams};
pub use ports::{
    handler::{AnswerHandler, HandlerArgs, HandlerError},
    module_loader::{HandlerModule, ModuleError, ModuleLoader},
    progress::{NoRunProgress, RunProgressNotifier},
};
pub use use_cases::invoke_handler::{CallPolicy, InvocationAdapter};
pub use use_cases::resolve_handler::{CandidateInfo, HandlerResolver, Resolution};
pub use use_cases::run_query::{
    EMPTY_QUERY_PROMPT, RunQueryUseCase, RunReport, demo_answer, not_found_message,
};
