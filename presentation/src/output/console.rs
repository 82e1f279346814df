//! Console output formatter for run reports

use colored::Colorize;
use desk_application::{CandidateInfo, ModuleError, Resolution, RunReport};
use desk_domain::{AnswerMode, OutputFormat};

/// Formats run reports and notices for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a report in the requested format
    pub fn render(report: &RunReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(report),
            OutputFormat::Answer => Self::format_answer_only(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Answer section followed by the details block
    pub fn format(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("{} Answer", report.request.mode())));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Query:".cyan().bold(),
            report.request.query()
        ));
        if let Some(handler) = &report.handler {
            output.push_str(&format!("{} {}\n", "Handler:".cyan().bold(), handler));
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", report.answer.answer));

        output.push_str(&Self::section_header("Details"));
        output.push_str(&Self::detail_row(
            "Confidence",
            &report.answer.confidence_display(),
        ));
        output.push_str(&Self::detail_row("Method Used", report.answer.method_display()));
        output.push_str(&Self::detail_row(
            "Response Time (s)",
            &report.elapsed_display(),
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Answer text only (for piping)
    pub fn format_answer_only(report: &RunReport) -> String {
        report.answer.answer.clone()
    }

    /// Warning shown when the handler module could not be loaded
    pub fn format_module_warning(error: &ModuleError, source: &str) -> String {
        format!(
            "{} Could not load handlers from {}: {}",
            "Warning:".yellow().bold(),
            source,
            error
        )
    }

    /// One-line notice about how the handler for `mode` was picked
    pub fn format_resolution(mode: AnswerMode, resolution: &Resolution) -> String {
        match resolution {
            Resolution::Selected {
                name,
                score: Some(score),
            } => format!(
                "{} Auto-selected '{}' for {} (score {})",
                "->".cyan(),
                name.bold(),
                mode,
                score
            ),
            Resolution::Selected { name, score: None } => {
                format!("{} Using '{}' for {}", "->".cyan(), name.bold(), mode)
            }
            Resolution::NoCandidate => format!(
                "{} No suitable function found for {}; showing a demo answer",
                "->".yellow(),
                mode
            ),
            Resolution::Missing { name } => format!(
                "{} Configured function '{}' for {} is not in the module",
                "->".red(),
                name,
                mode
            ),
        }
    }

    /// Table of handlers with their signatures and scores
    pub fn format_candidates(module: &str, candidates: &[CandidateInfo]) -> String {
        let mut output = String::new();
        let title = if module.is_empty() { "(no module)" } else { module };
        output.push_str(&format!("{} {}\n", "Module:".cyan().bold(), title));

        if candidates.is_empty() {
            output.push_str(&format!("  {}\n", "no handlers".dimmed()));
            return output;
        }

        let width = candidates.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for candidate in candidates {
            let signature = candidate
                .signature
                .as_deref()
                .unwrap_or("(signature unknown)");
            let score = candidate
                .score
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            output.push_str(&format!(
                "  {:<width$}  {:>5}  {}\n",
                candidate.name,
                score,
                signature.dimmed(),
                width = width
            ));
        }
        output
    }

    fn detail_row(label: &str, value: &str) -> String {
        format!("  {:<18} {}\n", format!("{}:", label).bold(), value)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
