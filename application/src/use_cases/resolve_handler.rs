//! Handler resolution.
//!
//! Decides which handler of a [`HandlerModule`] answers a given mode, either
//! by signature score ([`ResolverStrategy::Auto`]) or by configured name
//! ([`ResolverStrategy::Configured`]).

use crate::config::ResolverStrategy;
use crate::ports::module_loader::HandlerModule;
use desk_domain::{AnswerMode, select_best};
use tracing::debug;

/// Outcome of resolving a handler for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A handler was found. `score` is set for auto-selection only.
    Selected { name: String, score: Option<u32> },
    /// Auto-selection found nothing scoring above zero
    NoCandidate,
    /// The configured handler name is not in the module
    Missing { name: String },
}

impl Resolution {
    pub fn handler_name(&self) -> Option<&str> {
        match self {
            Resolution::Selected { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// One row of a candidate listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInfo {
    pub name: String,
    /// `name(p1, p2)`, or `None` when the signature is unknown
    pub signature: Option<String>,
    /// Auto-selection score, `None` when the signature is unknown
    pub score: Option<u32>,
}

/// Resolves handlers out of a loaded module
pub struct HandlerResolver<'a> {
    module: &'a HandlerModule,
    strategy: &'a ResolverStrategy,
}

impl<'a> HandlerResolver<'a> {
    pub fn new(module: &'a HandlerModule, strategy: &'a ResolverStrategy) -> Self {
        Self { module, strategy }
    }

    pub fn resolve(&self, mode: AnswerMode) -> Resolution {
        let resolution = match self.strategy.configured_name(mode) {
            Some(name) => {
                if self.module.contains(name) {
                    Resolution::Selected {
                        name: name.to_string(),
                        score: None,
                    }
                } else {
                    Resolution::Missing {
                        name: name.to_string(),
                    }
                }
            }
            None => match select_best(self.module.signatures()) {
                Some(best) => Resolution::Selected {
                    name: best.name,
                    score: Some(best.score),
                },
                None => Resolution::NoCandidate,
            },
        };

        debug!(mode = %mode, strategy = %self.strategy, ?resolution, "Resolved handler");
        resolution
    }

    /// Every handler in registration order, with its score
    pub fn candidates(&self) -> Vec<CandidateInfo> {
        self.module
            .handlers()
            .iter()
            .map(|h| CandidateInfo {
                name: h.name().to_string(),
                signature: h.signature().map(ToString::to_string),
                score: h.signature().map(|s| s.score()),
            })
            .collect()
    }
}
