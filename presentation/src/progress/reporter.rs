//! Progress reporting for runs

use colored::Colorize;
use desk_application::{NoRunProgress, Resolution, RunProgressNotifier};
use desk_domain::AnswerMode;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use crate::output::console::ConsoleFormatter;

/// Shows the resolution notice and a spinner while the handler runs
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunProgressNotifier for ProgressReporter {
    fn on_resolved(&self, mode: AnswerMode, resolution: &Resolution) {
        eprintln!("{}", ConsoleFormatter::format_resolution(mode, resolution));
    }

    fn on_invoke_start(&self, handler: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(handler.to_string());
        pb.set_message("answering...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_invoke_end(&self, handler: &str, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.finish_with_message(format!("{} ({} failed)", "error".red(), handler));
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl RunProgressNotifier for SimpleProgress {
    fn on_resolved(&self, mode: AnswerMode, resolution: &Resolution) {
        eprintln!("{}", ConsoleFormatter::format_resolution(mode, resolution));
    }

    fn on_invoke_end(&self, handler: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), handler);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), handler);
        }
    }
}

/// Progress for a one-shot run: nothing when quiet, a spinner on a
/// terminal, plain lines otherwise
pub fn notifier_for(quiet: bool, terminal: bool) -> Box<dyn RunProgressNotifier> {
    match (quiet, terminal) {
        (true, _) => Box::new(NoRunProgress),
        (false, true) => Box::new(ProgressReporter::new()),
        (false, false) => Box::new(SimpleProgress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_invoke_start("rag_answer");
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_invoke_end("rag_answer", true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        ProgressReporter::new().on_invoke_end("rag_answer", false);
    }

    #[test]
    fn test_plain_notifier_handles_every_event() {
        let progress = notifier_for(false, false);
        progress.on_resolved(
            AnswerMode::Rag,
            &Resolution::Selected {
                name: "rag_answer".into(),
                score: Some(5),
            },
        );
        progress.on_invoke_start("rag_answer");
        progress.on_invoke_end("rag_answer", false);
    }
}
