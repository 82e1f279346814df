//! Answer subdomain.
//!
//! - [`mode::AnswerMode`]: RAG vs Fine-Tuned
//! - [`raw::RawResult`]: what a handler hands back, shape by shape
//! - [`normalized::NormalizedAnswer`]: the display triple
//! - [`normalize::normalize`]: RawResult → NormalizedAnswer

pub mod mode;
pub mod normalize;
pub mod normalized;
pub mod raw;
