//! Progress notification port
//!
//! Defines the interface for reporting progress during a run.

use crate::use_cases::resolve_handler::Resolution;
use desk_domain::AnswerMode;

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default.
pub trait RunProgressNotifier: Send + Sync {
    /// Called once the handler for a run has been resolved
    fn on_resolved(&self, _mode: AnswerMode, _resolution: &Resolution) {}

    /// Called right before a handler is invoked
    fn on_invoke_start(&self, _handler: &str) {}

    /// Called after the handler returned (or failed)
    fn on_invoke_end(&self, _handler: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoRunProgress;

impl RunProgressNotifier for NoRunProgress {}
