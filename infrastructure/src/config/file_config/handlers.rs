//! Handler configuration from TOML (`[handlers]` section)

use desk_application::{ResolverStrategy, RunParams};
use desk_domain::{AnswerMode, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw handler configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHandlersConfig {
    /// Path to the handler manifest (the module handlers are loaded from)
    pub manifest: Option<PathBuf>,
    /// "auto" (pick by signature) or "configured" (one name per mode)
    pub strategy: String,
    /// Handler for RAG mode (configured strategy)
    pub rag_handler: Option<String>,
    /// Handler for Fine-Tuned mode (configured strategy)
    pub fine_tuned_handler: Option<String>,
    /// Deadline for one handler call; unset or 0 waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// Mode selected when none is given on the command line
    pub default_mode: String,
}

impl Default for FileHandlersConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            strategy: "auto".to_string(),
            rag_handler: None,
            fine_tuned_handler: None,
            timeout_seconds: None,
            default_mode: "rag".to_string(),
        }
    }
}

impl FileHandlersConfig {
    /// Parse strategy + handler names into a [`ResolverStrategy`]
    ///
    /// Accepts: "auto", "configured". Falls back to auto on any problem.
    pub fn parse_strategy(&self) -> (ResolverStrategy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        match self.strategy.to_lowercase().as_str() {
            "auto" => {
                for (field, value) in self.named_handlers() {
                    if value.is_some() {
                        issues.push(ConfigIssue::warning(
                            ConfigIssueCode::UnusedField {
                                field: field.to_string(),
                            },
                            format!("{}: ignored because handlers.strategy is 'auto'", field),
                        ));
                    }
                }
                (ResolverStrategy::Auto, issues)
            }
            "configured" => {
                let mut names = Vec::new();
                for (field, value) in self.named_handlers() {
                    match value.map(str::trim) {
                        Some(name) if !name.is_empty() => names.push(name.to_string()),
                        Some(_) => issues.push(ConfigIssue::error(
                            ConfigIssueCode::EmptyValue {
                                field: field.to_string(),
                            },
                            format!("{}: handler name is empty", field),
                        )),
                        None => issues.push(ConfigIssue::error(
                            ConfigIssueCode::MissingField {
                                field: field.to_string(),
                            },
                            format!("{}: required when handlers.strategy is 'configured'", field),
                        )),
                    }
                }
                match <[String; 2]>::try_from(names) {
                    Ok([rag, fine_tuned]) => {
                        (ResolverStrategy::Configured { rag, fine_tuned }, issues)
                    }
                    Err(_) => (ResolverStrategy::Auto, issues),
                }
            }
            _ => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "handlers.strategy".to_string(),
                        value: self.strategy.clone(),
                        valid_values: vec!["auto".to_string(), "configured".to_string()],
                    },
                    format!(
                        "handlers.strategy: unknown value '{}', falling back to 'auto'",
                        self.strategy
                    ),
                ));
                (ResolverStrategy::Auto, issues)
            }
        }
    }

    /// Parse timeout_seconds; 0 means no deadline
    pub fn parse_timeout(&self) -> (Option<Duration>, Vec<ConfigIssue>) {
        match self.timeout_seconds {
            Some(0) => (
                None,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "handlers.timeout_seconds".to_string(),
                        value: "0".to_string(),
                        valid_values: vec!["a positive number of seconds".to_string()],
                    },
                    "handlers.timeout_seconds: 0 disables the deadline; omit the field instead",
                )],
            ),
            Some(secs) => (Some(Duration::from_secs(secs)), vec![]),
            None => (None, vec![]),
        }
    }

    /// Parse default_mode into an [`AnswerMode`]
    ///
    /// Accepts: "rag", "fine-tuned" (and the aliases `AnswerMode` parses)
    pub fn parse_default_mode(&self) -> (AnswerMode, Vec<ConfigIssue>) {
        match self.default_mode.parse::<AnswerMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "handlers.default_mode".to_string(),
                        value: self.default_mode.clone(),
                        valid_values: AnswerMode::ALL.iter().map(|m| m.as_key().to_string()).collect(),
                    },
                    format!(
                        "handlers.default_mode: unknown value '{}', falling back to 'rag'",
                        self.default_mode
                    ),
                );
                (AnswerMode::default(), vec![issue])
            }
        }
    }

    /// Build [`RunParams`] from this section
    pub fn to_run_params(&self) -> (RunParams, Vec<ConfigIssue>) {
        let (strategy, mut issues) = self.parse_strategy();
        let (timeout, timeout_issues) = self.parse_timeout();
        issues.extend(timeout_issues);
        (RunParams { strategy, timeout }, issues)
    }

    fn named_handlers(&self) -> [(&'static str, Option<&str>); 2] {
        [
            ("handlers.rag_handler", self.rag_handler.as_deref()),
            ("handlers.fine_tuned_handler", self.fine_tuned_handler.as_deref()),
        ]
    }
}
