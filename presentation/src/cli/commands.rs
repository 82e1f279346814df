//! CLI command definitions

use clap::{Parser, ValueEnum};
use desk_domain::{AnswerMode, OutputFormat};
use std::path::PathBuf;

/// Answer mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Retrieval-augmented answering
    Rag,
    /// Fine-tuned model answering
    #[value(alias = "ft", alias = "finetuned")]
    FineTuned,
}

impl From<ModeArg> for AnswerMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Rag => AnswerMode::Rag,
            ModeArg::FineTuned => AnswerMode::FineTuned,
        }
    }
}

/// Output format for run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Answer with confidence, method and response time
    Full,
    /// Only the answer text
    Answer,
    /// JSON report
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Full => OutputFormat::Full,
            FormatArg::Answer => OutputFormat::Answer,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for answer-desk
#[derive(Parser, Debug)]
#[command(name = "answer-desk")]
#[command(author, version, about = "Ask a question, get an answer from your own RAG or fine-tuned handler")]
#[command(long_about = r#"
answer-desk sends a query to a handler you provide and shows the answer with
its confidence, the method used and the response time.

Handlers are external commands listed in a TOML manifest. Without explicit
handler names, answer-desk picks the handler whose parameters look most like
(query, mode).

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./answer-desk.toml       Project-level config
3. ~/.config/answer-desk/config.toml   Global config

Example:
  answer-desk --manifest handlers.toml "What is the capital of France?"
  answer-desk --mode fine-tuned -o json "Summarize the refund policy"
  answer-desk --rag-handler rag_answer --fine-tuned-handler ft_answer --chat
"#)]
pub struct Cli {
    /// The query to answer (not required in chat mode)
    pub query: Option<String>,

    /// Answer mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Handler manifest (TOML)
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Handler to call in RAG mode (disables auto-selection)
    #[arg(long, value_name = "NAME", requires = "fine_tuned_handler")]
    pub rag_handler: Option<String>,

    /// Handler to call in Fine-Tuned mode (disables auto-selection)
    #[arg(long, value_name = "NAME", requires = "rag_handler")]
    pub fine_tuned_handler: Option<String>,

    /// Give up on a handler call after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<FormatArg>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List handlers in the manifest with their scores and exit
    #[arg(long)]
    pub list_handlers: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
