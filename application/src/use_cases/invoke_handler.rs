//! Invocation adapter.
//!
//! Calls a resolved handler with the right number of arguments and turns every
//! failure into a [`RawResult::Failed`]. Nothing raised by a handler leaves
//! this module.

use crate::ports::handler::{AnswerHandler, HandlerArgs, HandlerError};
use desk_domain::{QueryRequest, RawResult};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How the argument list for a call is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPolicy {
    /// `(query, mode)` when the declared arity is 2 or more, else `(query)`.
    /// Unknown signatures get `(query)`.
    ByArity,
    /// `(query, mode)` first; retry once with `(query)` on an arity mismatch.
    RichestFirst,
}

/// Calls handlers within the optional deadline.
///
/// The deadline covers the whole invocation, retry included.
#[derive(Debug, Clone, Default)]
pub struct InvocationAdapter {
    timeout: Option<Duration>,
}

impl InvocationAdapter {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub async fn invoke(
        &self,
        handler: &dyn AnswerHandler,
        request: &QueryRequest,
        policy: CallPolicy,
    ) -> RawResult {
        let query = request.query();
        let deadline = self.timeout.map(|limit| Instant::now() + limit);
        let with_mode = HandlerArgs::QueryAndMode(query, request.mode());

        let result = match policy {
            CallPolicy::ByArity => {
                let accepts_mode = handler.signature().is_some_and(|s| s.accepts_mode());
                let args = if accepts_mode {
                    with_mode
                } else {
                    HandlerArgs::Query(query)
                };
                self.call(handler, args, deadline).await
            }
            CallPolicy::RichestFirst => match self.call(handler, with_mode, deadline).await {
                Err(e) if e.is_arity_mismatch() => {
                    debug!(
                        handler = handler.name(),
                        error = %e,
                        "Retrying with (query) only"
                    );
                    self.call(handler, HandlerArgs::Query(query), deadline)
                        .await
                }
                other => other,
            },
        };

        match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(handler = handler.name(), error = %e, "Handler call failed");
                RawResult::failed(handler.name(), e.to_string())
            }
        }
    }

    async fn call(
        &self,
        handler: &dyn AnswerHandler,
        args: HandlerArgs<'_>,
        deadline: Option<Instant>,
    ) -> Result<RawResult, HandlerError> {
        debug!(handler = handler.name(), args = args.count(), "Invoking handler");
        match (deadline, self.timeout) {
            (Some(deadline), Some(limit)) => {
                tokio::time::timeout_at(deadline, handler.answer(args))
                    .await
                    .unwrap_or(Err(HandlerError::Timeout(limit)))
            }
            _ => handler.answer(args).await,
        }
    }
}
