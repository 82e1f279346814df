//! CLI entrypoint for answer-desk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use desk_application::{ModuleLoader, RunQueryUseCase};
use desk_domain::{AnswerMode, ConfigIssue, OutputFormat, QueryRequest};
use desk_infrastructure::{ConfigLoader, FileConfig, ManifestModuleLoader, UnconfiguredModuleLoader};
use desk_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig, notifier_for};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    apply_cli_overrides(&cli, &mut config);

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "Config error:".red().bold(), issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting answer-desk");

    // === Dependency Injection ===
    let (params, _) = config.handlers.to_run_params();
    let (default_mode, _) = config.handlers.parse_default_mode();
    let mode = cli.mode.map(AnswerMode::from).unwrap_or(default_mode);
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let loader: Arc<dyn ModuleLoader> = match &config.handlers.manifest {
        Some(path) => Arc::new(ManifestModuleLoader::new(path)),
        None => Arc::new(UnconfiguredModuleLoader),
    };
    let source = loader.describe();
    let use_case = RunQueryUseCase::new(loader, params);

    if let Some(e) = use_case.module_error()
        && !cli.quiet
    {
        eprintln!("{}", ConsoleFormatter::format_module_warning(e, &source));
    }

    if cli.list_handlers {
        print!(
            "{}",
            ConsoleFormatter::format_candidates(use_case.module().name(), &use_case.candidates())
        );
        return Ok(());
    }

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.resolved_history_file(),
            history_size: config.repl.history_size,
        };
        let mut repl = ChatRepl::new(use_case, mode)
            .with_config(repl_config)
            .with_format(format);

        repl.run().await?;
        return Ok(());
    }

    // Single query mode - query is required
    let Some(query) = cli.query else {
        bail!("Query is required. Use --chat for interactive mode.");
    };

    let request = QueryRequest::new(query, mode);
    let progress = notifier_for(
        cli.quiet || format == OutputFormat::Json,
        std::io::stderr().is_terminal(),
    );
    let report = use_case.execute(request, progress.as_ref()).await;

    println!("{}", ConsoleFormatter::render(&report, format));

    Ok(())
}

/// Load the merged configuration, or defaults with `--no-config`
fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }
    ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow::anyhow!("{}", e))
}

/// Command-line flags take precedence over every config source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(manifest) = &cli.manifest {
        config.handlers.manifest = Some(manifest.clone());
    }
    if let (Some(rag), Some(fine_tuned)) = (&cli.rag_handler, &cli.fine_tuned_handler) {
        config.handlers.strategy = "configured".to_string();
        config.handlers.rag_handler = Some(rag.clone());
        config.handlers.fine_tuned_handler = Some(fine_tuned.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.handlers.timeout_seconds = Some(timeout);
    }
}
