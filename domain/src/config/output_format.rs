//! Output format value object

use serde::{Deserialize, Serialize};

/// How a run report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Answer plus the details block (confidence, method, response time)
    #[default]
    Full,
    /// Only the answer text
    Answer,
    /// JSON report
    Json,
}
