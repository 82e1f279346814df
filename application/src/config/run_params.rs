//! Run parameters: resolution strategy and invocation deadline.
//!
//! These are application-layer concerns, not domain policy.

use desk_domain::AnswerMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the handler for a run is chosen.
///
/// | Strategy | Resolution | Invocation |
/// |----------|------------|------------|
/// | `Auto` | best signature score | by declared arity |
/// | `Configured` | name lookup per mode | `(query, mode)`, then `(query)` on arity mismatch |
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ResolverStrategy {
    #[default]
    Auto,
    Configured { rag: String, fine_tuned: String },
}

impl ResolverStrategy {
    pub fn configured(rag: impl Into<String>, fine_tuned: impl Into<String>) -> Self {
        Self::Configured {
            rag: rag.into(),
            fine_tuned: fine_tuned.into(),
        }
    }

    /// Handler name configured for `mode`, if any
    pub fn configured_name(&self, mode: AnswerMode) -> Option<&str> {
        match (self, mode) {
            (Self::Auto, _) => None,
            (Self::Configured { rag, .. }, AnswerMode::Rag) => Some(rag),
            (Self::Configured { fine_tuned, .. }, AnswerMode::FineTuned) => Some(fine_tuned),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl std::fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Configured { rag, fine_tuned } => {
                write!(f, "configured (RAG: {}, Fine-Tuned: {})", rag, fine_tuned)
            }
        }
    }
}

/// Parameters shared by every run of a [`RunQueryUseCase`](crate::use_cases::run_query::RunQueryUseCase).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunParams {
    pub strategy: ResolverStrategy,
    /// Deadline for a single handler call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl RunParams {
    pub fn with_strategy(mut self, strategy: ResolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto_without_deadline() {
        let params = RunParams::default();
        assert!(params.strategy.is_auto());
        assert!(params.timeout.is_none());
    }

    #[test]
    fn test_configured_name_per_mode() {
        let s = ResolverStrategy::configured("rag_answer", "ft_answer");
        assert_eq!(s.configured_name(AnswerMode::Rag), Some("rag_answer"));
        assert_eq!(s.configured_name(AnswerMode::FineTuned), Some("ft_answer"));
        assert_eq!(ResolverStrategy::Auto.configured_name(AnswerMode::Rag), None);
    }

    #[test]
    fn test_builders() {
        let params = RunParams::default()
            .with_strategy(ResolverStrategy::configured("a", "b"))
            .with_timeout(Duration::from_secs(5));
        assert!(!params.strategy.is_auto());
        assert_eq!(params.timeout, Some(Duration::from_secs(5)));
    }
}
