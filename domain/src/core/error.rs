//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid mode: {0} (expected 'rag' or 'fine-tuned')")]
    InvalidMode(String),

    #[error("Invalid handler signature: {0}")]
    InvalidSignature(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_display() {
        let error = DomainError::InvalidMode("hybrid".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid mode: hybrid (expected 'rag' or 'fine-tuned')"
        );
    }

    #[test]
    fn test_invalid_signature_display() {
        let error = DomainError::InvalidSignature("empty name".to_string());
        assert_eq!(error.to_string(), "Invalid handler signature: empty name");
    }
}
