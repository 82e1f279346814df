//! Answer handler port
//!
//! Defines the interface every answer-generation handler implements,
//! whatever it runs on (an external command, an in-process function, ...).

use async_trait::async_trait;
use desk_domain::{AnswerMode, HandlerSignature, RawResult};
use std::time::Duration;
use thiserror::Error;

/// Arguments of a single handler call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerArgs<'a> {
    /// `(query)`
    Query(&'a str),
    /// `(query, mode)`
    QueryAndMode(&'a str, AnswerMode),
}

impl<'a> HandlerArgs<'a> {
    pub fn query(&self) -> &'a str {
        match self {
            HandlerArgs::Query(q) | HandlerArgs::QueryAndMode(q, _) => q,
        }
    }

    pub fn mode(&self) -> Option<AnswerMode> {
        match self {
            HandlerArgs::Query(_) => None,
            HandlerArgs::QueryAndMode(_, mode) => Some(*mode),
        }
    }

    /// Number of positional arguments
    pub fn count(&self) -> usize {
        match self {
            HandlerArgs::Query(_) => 1,
            HandlerArgs::QueryAndMode(..) => 2,
        }
    }
}

/// Errors a handler call can end with
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler does not take this many arguments
    #[error("takes {expected} argument(s) but {given} were given")]
    ArityMismatch { expected: usize, given: usize },

    #[error("{0}")]
    Failed(String),

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, HandlerError::ArityMismatch { .. })
    }
}

/// A named answer-generation handler.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerHandler: Send + Sync {
    /// Name the handler is registered and configured under
    fn name(&self) -> &str;

    /// Declared parameter list, or `None` when it is unknown.
    ///
    /// Handlers without a signature are never auto-selected, but can still be
    /// configured by name.
    fn signature(&self) -> Option<&HandlerSignature>;

    /// Produce a raw answer
    async fn answer(&self, args: HandlerArgs<'_>) -> Result<RawResult, HandlerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_accessors() {
        let one = HandlerArgs::Query("q");
        assert_eq!(one.query(), "q");
        assert_eq!(one.mode(), None);
        assert_eq!(one.count(), 1);

        let two = HandlerArgs::QueryAndMode("q", AnswerMode::FineTuned);
        assert_eq!(two.query(), "q");
        assert_eq!(two.mode(), Some(AnswerMode::FineTuned));
        assert_eq!(two.count(), 2);
    }

    #[test]
    fn test_error_display() {
        let e = HandlerError::ArityMismatch {
            expected: 1,
            given: 2,
        };
        assert_eq!(e.to_string(), "takes 1 argument(s) but 2 were given");
        assert!(e.is_arity_mismatch());

        let t = HandlerError::Timeout(Duration::from_millis(1500));
        assert_eq!(t.to_string(), "timed out after 1.5s");
        assert!(!t.is_arity_mismatch());
    }
}
