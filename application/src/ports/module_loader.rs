//! Handler module port
//!
//! A module is a named collection of handlers loaded from one source. Loading
//! can fail; callers treat that as a warning and continue with an empty
//! module.

use super::handler::AnswerHandler;
use desk_domain::HandlerSignature;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading a handler module
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("No handler module configured")]
    NotConfigured,

    #[error("Module file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid module: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named, ordered collection of handlers
#[derive(Clone, Default)]
pub struct HandlerModule {
    name: String,
    handlers: Vec<Arc<dyn AnswerHandler>>,
}

impl HandlerModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    /// Register a handler (builder form)
    pub fn with_handler<H: AnswerHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Register a handler (Arc version)
    pub fn register(&mut self, handler: Arc<dyn AnswerHandler>) {
        self.handlers.push(handler);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handlers(&self) -> &[Arc<dyn AnswerHandler>] {
        &self.handlers
    }

    /// Look a handler up by exact name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn AnswerHandler>> {
        self.handlers.iter().find(|h| h.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Registered names with declared signatures, `None` for handlers without one
    pub fn signatures(&self) -> impl Iterator<Item = (&str, Option<&HandlerSignature>)> {
        self.handlers.iter().map(|h| (h.name(), h.signature()))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerModule")
            .field("name", &self.name)
            .field("handlers", &self.names())
            .finish()
    }
}

/// Source of a [`HandlerModule`]
pub trait ModuleLoader: Send + Sync {
    /// Load (or reload) the module
    fn load(&self) -> Result<HandlerModule, ModuleError>;

    /// Human-readable description of where the module comes from
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::handler::{HandlerArgs, HandlerError};
    use async_trait::async_trait;
    use desk_domain::RawResult;

    struct Named {
        name: String,
        signature: Option<HandlerSignature>,
    }

    #[async_trait]
    impl AnswerHandler for Named {
        fn name(&self) -> &str {
            &self.name
        }

        fn signature(&self) -> Option<&HandlerSignature> {
            self.signature.as_ref()
        }

        async fn answer(&self, _args: HandlerArgs<'_>) -> Result<RawResult, HandlerError> {
            Ok(RawResult::Absent)
        }
    }

    fn named(name: &str, params: Option<&[&str]>) -> Named {
        Named {
            name: name.to_string(),
            signature: params.map(|p| HandlerSignature::new(name, p.iter().copied())),
        }
    }

    #[test]
    fn test_lookup_and_names() {
        let module = HandlerModule::new("notebook")
            .with_handler(named("rag_answer", Some(&["query"])))
            .with_handler(named("opaque", None));

        assert_eq!(module.name(), "notebook");
        assert_eq!(module.len(), 2);
        assert!(module.contains("rag_answer"));
        assert!(!module.contains("ft_answer"));
        assert_eq!(module.names(), vec!["rag_answer", "opaque"]);
        assert_eq!(module.signatures().filter(|(_, sig)| sig.is_some()).count(), 1);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(HandlerModule::default().is_empty());
    }

    #[test]
    fn test_error_display() {
        let e = ModuleError::NotFound(PathBuf::from("handlers.toml"));
        assert_eq!(e.to_string(), "Module file not found: handlers.toml");
    }
}
