//! Core domain concepts shared across all subdomains.
//!
//! - [`query::QueryRequest`]: a single user-triggered run (query + mode)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
