//! External command handler.
//!
//! Runs a process per call. The request goes to the child's stdin as one JSON
//! object:
//!
//! ```text
//! {"query": "What is the capital of France?", "mode": "RAG"}
//! ```
//!
//! `mode` is only present for two-argument calls. Whatever the child prints on
//! stdout becomes the raw result:
//!
//! | stdout | RawResult |
//! |--------|-----------|
//! | empty | `Absent` |
//! | valid JSON | shape of the JSON value (see [`RawResult::from_json`]) |
//! | anything else | `TextOnly` with the trimmed text |
//!
//! A non-zero exit status is a failure carrying the child's stderr.

use super::check_arity;
use async_trait::async_trait;
use desk_application::{AnswerHandler, HandlerArgs, HandlerError};
use desk_domain::{DomainError, HandlerSignature, RawResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// Maximum stderr kept in a failure message (chars)
const MAX_STDERR: usize = 2048;

/// One `[[handler]]` entry of a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Name the handler is registered under
    pub name: String,
    /// Program to run
    pub command: String,
    /// Arguments passed before anything else
    #[serde(default)]
    pub args: Vec<String>,
    /// Declared parameter names; omit when the signature is unknown
    #[serde(default)]
    pub parameters: Option<Vec<String>>,
    /// Working directory for the child
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            parameters: None,
            working_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = Some(parameters.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Handler that answers by running an external command
#[derive(Debug, Clone)]
pub struct CommandHandler {
    spec: CommandSpec,
    signature: Option<HandlerSignature>,
    /// Directory relative `command` / `working_dir` paths are resolved against
    base_dir: Option<PathBuf>,
}

impl CommandHandler {
    pub fn new(spec: CommandSpec) -> Result<Self, DomainError> {
        let signature = match &spec.parameters {
            Some(params) => Some(HandlerSignature::try_new(&spec.name, params.iter().cloned())?),
            None => None,
        };
        Ok(Self {
            spec,
            signature,
            base_dir: None,
        })
    }

    /// Resolve relative `command` / `working_dir` paths against `dir`
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn program(&self) -> PathBuf {
        let program = Path::new(&self.spec.command);
        // Bare names are looked up on PATH; only paths are rebased
        match &self.base_dir {
            Some(base) if program.is_relative() && program.components().count() > 1 => {
                base.join(program)
            }
            _ => program.to_path_buf(),
        }
    }

    fn working_dir(&self) -> Option<PathBuf> {
        match (&self.spec.working_dir, &self.base_dir) {
            (Some(dir), Some(base)) if dir.is_relative() => Some(base.join(dir)),
            (Some(dir), _) => Some(dir.clone()),
            (None, base) => base.clone(),
        }
    }

    async fn run(&self, payload: String) -> Result<std::process::Output, HandlerError> {
        let program = self.program();
        let mut cmd = Command::new(&program);
        cmd.args(&self.spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = self.working_dir() {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            HandlerError::Failed(format!("failed to spawn '{}': {}", program.display(), e))
        })?;

        // Feed stdin while stdout/stderr are drained; a child that echoes its
        // input would otherwise fill the stdout pipe and stall the write
        let stdin = child.stdin.take();
        let write = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            // A child that never reads stdin closes the pipe early; that is fine
            match stdin.write_all(payload.as_bytes()).await {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            }
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;
        written?;
        Ok(output)
    }
}

#[async_trait]
impl AnswerHandler for CommandHandler {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn signature(&self) -> Option<&HandlerSignature> {
        self.signature.as_ref()
    }

    async fn answer(&self, args: HandlerArgs<'_>) -> Result<RawResult, HandlerError> {
        check_arity(self.signature.as_ref(), args.count())?;

        let payload = request_payload(args);
        debug!(handler = %self.spec.name, command = %self.spec.command, "Spawning handler command");
        trace!(payload = %payload, "Handler request");

        let output = self.run(payload).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = desk_domain::util::preview(stderr.trim(), MAX_STDERR);
            let status = output
                .status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| format!("status {}", c));
            return Err(HandlerError::Failed(if stderr.is_empty() {
                format!("exited with {}", status)
            } else {
                format!("exited with {}: {}", status, stderr)
            }));
        }

        Ok(parse_stdout(&output.stdout))
    }
}

/// JSON request written to the child's stdin
fn request_payload(args: HandlerArgs<'_>) -> String {
    let value = match args.mode() {
        Some(mode) => serde_json::json!({ "query": args.query(), "mode": mode.label() }),
        None => serde_json::json!({ "query": args.query() }),
    };
    value.to_string()
}

/// Classify the child's stdout
fn parse_stdout(stdout: &[u8]) -> RawResult {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() {
        return RawResult::Absent;
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => RawResult::from_json(value),
        Err(_) => RawResult::text(text),
    }
}
