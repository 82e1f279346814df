//! Domain layer for answer-desk
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Modes
//!
//! Every run is tagged with an [`AnswerMode`]:
//!
//! - **RAG**: retrieval-augmented answering
//! - **Fine-Tuned**: answering with a fine-tuned model
//!
//! The mode is passed to handlers that declare a second parameter and is the
//! fallback method label when a handler does not report one.
//!
//! ## Handler scoring
//!
//! Handlers declare a [`HandlerSignature`]. When no handler is configured
//! explicitly, [`select_best`] picks the signature that looks most like
//! `(query)` or `(query, mode)`.
//!
//! ## Normalization
//!
//! Handlers return a [`RawResult`] in one of several shapes. [`normalize`]
//! reduces every shape to a [`NormalizedAnswer`] and never fails.

pub mod answer;
pub mod config;
pub mod core;
pub mod handler;
pub mod util;

// Re-export commonly used types
pub use answer::{
    mode::AnswerMode,
    normalize::{NO_ANSWER_FIELD, NO_ANSWER_RETURNED, normalize},
    normalized::NormalizedAnswer,
    raw::RawResult,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, query::QueryRequest};
pub use handler::signature::{HandlerSignature, ScoredCandidate, select_best};
