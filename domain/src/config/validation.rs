//! Configuration issues.
//!
//! Config loaders report problems as a list of [`ConfigIssue`]s rather than
//! failing on the first one, so that start-up can print every problem at once.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A field holds a value outside its allowed set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A field that must not be empty is empty.
    EmptyValue { field: String },
    /// The configured strategy needs a field that is not set.
    MissingField { field: String },
    /// A field is set but has no effect under the current settings.
    UnusedField { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let e = ConfigIssue::error(
            ConfigIssueCode::EmptyValue {
                field: "handlers.rag_handler".to_string(),
            },
            "handlers.rag_handler is empty",
        );
        assert!(e.is_error());

        let w = ConfigIssue::warning(
            ConfigIssueCode::UnusedField {
                field: "handlers.rag_handler".to_string(),
            },
            "ignored",
        );
        assert!(!w.is_error());
    }

    #[test]
    fn test_display() {
        let w = ConfigIssue::warning(
            ConfigIssueCode::MissingField {
                field: "handlers.manifest".to_string(),
            },
            "no manifest",
        );
        assert_eq!(w.to_string(), "warning: no manifest");
    }
}
