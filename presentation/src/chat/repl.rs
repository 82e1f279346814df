//! REPL (Read-Eval-Print Loop) for interactive queries

use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use desk_application::{NoRunProgress, RunQueryUseCase};
use desk_domain::{AnswerMode, OutputFormat, QueryRequest};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tracing::warn;

/// What the loop should do after a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive query REPL
pub struct ChatRepl {
    use_case: RunQueryUseCase,
    mode: AnswerMode,
    format: OutputFormat,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(use_case: RunQueryUseCase, mode: AnswerMode) -> Self {
        Self {
            use_case,
            mode,
            format: OutputFormat::Full,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Cannot create history directory");
        }
        match FileBackedHistory::with_file(self.config.history_size, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "History file unavailable");
                editor
            }
        }
    }

    fn prompt(&self) -> DefaultPrompt {
        DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.mode.label().to_string()),
            DefaultPromptSegment::Empty,
        )
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();

        self.print_welcome();

        loop {
            match editor.read_line(&self.prompt())? {
                Signal::Success(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Exit {
                            break;
                        }
                        continue;
                    }

                    self.process_query(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            answer-desk - Chat Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_module_status();
        println!("Mode: {}", self.mode.label().bold());
        println!();
        Self::print_help();
    }

    fn print_module_status(&self) {
        match self.use_case.module_error() {
            Some(e) => println!("{}", ConsoleFormatter::format_module_warning(e, "handler module")),
            None => println!(
                "Module: {} ({} handlers)",
                self.use_case.module().name(),
                self.use_case.module().len()
            ),
        }
    }

    fn print_help() {
        println!("Commands:");
        println!("  /mode [rag|fine-tuned] - Switch mode (toggles without an argument)");
        println!("  /handlers              - List handlers and their scores");
        println!("  /reload                - Reload the handler module");
        println!("  /help, /h, /?          - Show this help");
        println!("  /quit, /exit, /q       - Exit chat");
        println!();
    }

    fn handle_command(&mut self, line: &str) -> CommandOutcome {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandOutcome::Exit;
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
            }
            "/mode" | "/m" => match self.switch_mode(arg) {
                Ok(mode) => println!("Mode: {}", mode.label().bold()),
                Err(e) => println!("{} {}", "Error:".red(), e),
            },
            "/handlers" => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_candidates(
                        self.use_case.module().name(),
                        &self.use_case.candidates()
                    )
                );
                println!();
            }
            "/reload" => {
                self.use_case.reload();
                self.print_module_status();
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }
        CommandOutcome::Continue
    }

    /// Set the mode from `arg`, or toggle it when no argument is given
    fn switch_mode(&mut self, arg: Option<&str>) -> Result<AnswerMode, desk_domain::DomainError> {
        self.mode = match arg {
            Some(arg) => arg.parse()?,
            None => self.mode.toggle(),
        };
        Ok(self.mode)
    }

    async fn process_query(&self, query: &str) {
        println!();

        let request = QueryRequest::new(query, self.mode);
        let report = if self.config.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute(request, &progress).await
        } else {
            self.use_case.execute(request, &NoRunProgress).await
        };

        println!("{}", ConsoleFormatter::render(&report, self.format));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_application::{HandlerModule, ModuleError, ModuleLoader, RunParams};
    use std::sync::Arc;

    struct EmptyLoader;

    impl ModuleLoader for EmptyLoader {
        fn load(&self) -> Result<HandlerModule, ModuleError> {
            Ok(HandlerModule::new("empty"))
        }

        fn describe(&self) -> String {
            "empty".to_string()
        }
    }

    fn repl() -> ChatRepl {
        let use_case = RunQueryUseCase::new(Arc::new(EmptyLoader), RunParams::default());
        ChatRepl::new(use_case, AnswerMode::Rag)
    }

    #[test]
    fn test_mode_command_toggles_and_sets() {
        let mut repl = repl();
        assert_eq!(repl.handle_command("/mode"), CommandOutcome::Continue);
        assert_eq!(repl.mode(), AnswerMode::FineTuned);
        repl.handle_command("/mode rag");
        assert_eq!(repl.mode(), AnswerMode::Rag);
        repl.handle_command("/mode nonsense");
        assert_eq!(repl.mode(), AnswerMode::Rag);
    }

    #[test]
    fn test_quit_commands_exit() {
        let mut repl = repl();
        for cmd in ["/quit", "/exit", "/q"] {
            assert_eq!(repl.handle_command(cmd), CommandOutcome::Exit);
        }
        assert_eq!(repl.handle_command("/unknown"), CommandOutcome::Continue);
    }

    #[test]
    fn test_reload_keeps_module() {
        let mut repl = repl();
        repl.handle_command("/reload");
        assert_eq!(repl.use_case.module().name(), "empty");
        assert!(repl.use_case.module_error().is_none());
    }

    #[test]
    fn test_unusable_history_dir_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let repl = repl().with_config(ReplConfig {
            history_file: Some(blocker.join("nested").join("history.txt")),
            ..ReplConfig::default()
        });
        let _editor = repl.editor();
        assert!(blocker.is_file());
    }
}
