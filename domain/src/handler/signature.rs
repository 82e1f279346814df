//! Handler signatures and auto-selection scoring.
//!
//! Handlers declare the ordered names of the parameters they accept. When no
//! handler is configured for a mode, every declared signature is scored and
//! the best one is picked:
//!
//! | Rule | Points |
//! |------|--------|
//! | exactly 2 parameters | +2 |
//! | a parameter named `query`, `question`, `text` or `prompt` | +2 |
//! | a parameter named `mode` or `method` | +1 |
//! | exactly 1 parameter | +1 |
//!
//! Name matching is case-insensitive. Candidates scoring 0 are dropped. Ties
//! go to the lexically greatest name.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::error::DomainError;

const QUERY_NAMES: [&str; 4] = ["query", "question", "text", "prompt"];
const MODE_NAMES: [&str; 2] = ["mode", "method"];

/// Declared name and parameter list of a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSignature {
    name: String,
    parameters: Vec<String>,
}

impl HandlerSignature {
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Like [`new`](Self::new) but rejects empty handler or parameter names
    pub fn try_new<I, S>(name: impl Into<String>, parameters: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sig = Self::new(name, parameters);
        if sig.name.trim().is_empty() {
            return Err(DomainError::InvalidSignature("empty handler name".to_string()));
        }
        if let Some(pos) = sig.parameters.iter().position(|p| p.trim().is_empty()) {
            return Err(DomainError::InvalidSignature(format!(
                "{}: parameter {} has an empty name",
                sig.name,
                pos + 1
            )));
        }
        Ok(sig)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// True when the handler can be called with `(query, mode)`
    pub fn accepts_mode(&self) -> bool {
        self.arity() >= 2
    }

    /// Suitability score for answering `(query)` / `(query, mode)` calls
    pub fn score(&self) -> u32 {
        let mut score = 0;
        if self.arity() == 2 {
            score += 2;
        }
        if self.has_parameter_in(&QUERY_NAMES) {
            score += 2;
        }
        if self.has_parameter_in(&MODE_NAMES) {
            score += 1;
        }
        if self.arity() == 1 {
            score += 1;
        }
        score
    }

    fn has_parameter_in(&self, names: &[&str]) -> bool {
        self.parameters
            .iter()
            .any(|p| names.contains(&p.to_lowercase().as_str()))
    }
}

impl std::fmt::Display for HandlerSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(", "))
    }
}

/// A handler that survived scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: u32,
}

impl ScoredCandidate {
    fn rank(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Pick the best-scoring handler.
///
/// Entries pair the name a handler is registered under with its signature.
/// Handlers whose signature is unknown (`None`) are skipped. Returns `None`
/// when nothing scores above zero.
pub fn select_best<'a, I>(handlers: I) -> Option<ScoredCandidate>
where
    I: IntoIterator<Item = (&'a str, Option<&'a HandlerSignature>)>,
{
    handlers
        .into_iter()
        .filter_map(|(name, sig)| sig.map(|sig| (name, sig)))
        .map(|(name, sig)| ScoredCandidate {
            name: name.to_string(),
            score: sig.score(),
        })
        .filter(|c| c.score > 0)
        .max_by(ScoredCandidate::rank)
}
