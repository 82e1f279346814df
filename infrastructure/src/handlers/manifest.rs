//! TOML handler manifest
//!
//! ```toml
//! name = "notebook"
//!
//! [[handler]]
//! name = "rag_answer"
//! command = "python3"
//! args = ["answer.py", "--rag"]
//! parameters = ["query", "mode"]
//!
//! [[handler]]
//! name = "ft_answer"
//! command = "./bin/ft-answer"
//! parameters = ["question"]
//! working_dir = "models"
//! ```
//!
//! Relative commands containing a path separator and relative working
//! directories are resolved against the manifest's directory. Bare command
//! names are looked up on `PATH`.

use super::command::{CommandHandler, CommandSpec};
use desk_application::{HandlerModule, ModuleError, ModuleLoader};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "handler")]
    handlers: Vec<CommandSpec>,
}

/// Loads a [`HandlerModule`] of command handlers from a manifest file
#[derive(Debug, Clone)]
pub struct ManifestModuleLoader {
    path: PathBuf,
}

impl ManifestModuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Module name used when the manifest does not set one
    fn default_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "handlers".to_string())
    }

    fn build(&self, manifest: Manifest) -> Result<HandlerModule, ModuleError> {
        let name = manifest
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.default_name());
        let base_dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let mut seen = HashSet::new();
        let mut module = HandlerModule::new(name);
        for spec in manifest.handlers {
            if spec.command.trim().is_empty() {
                return Err(ModuleError::Invalid(format!(
                    "handler '{}' has an empty command",
                    spec.name
                )));
            }
            if !seen.insert(spec.name.clone()) {
                return Err(ModuleError::Invalid(format!(
                    "duplicate handler name '{}'",
                    spec.name
                )));
            }

            let mut handler =
                CommandHandler::new(spec).map_err(|e| ModuleError::Invalid(e.to_string()))?;
            if let Some(dir) = &base_dir {
                handler = handler.with_base_dir(dir);
            }
            debug!(
                handler = %handler.spec().name,
                command = %handler.spec().command,
                "Registered command handler"
            );
            module = module.with_handler(handler);
        }
        Ok(module)
    }
}

impl ModuleLoader for ManifestModuleLoader {
    fn load(&self) -> Result<HandlerModule, ModuleError> {
        if !self.path.exists() {
            return Err(ModuleError::NotFound(self.path.clone()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let manifest: Manifest = toml::from_str(&content).map_err(|e| ModuleError::Parse {
            path: self.path.clone(),
            message: e.message().to_string(),
        })?;

        let module = self.build(manifest)?;
        info!(
            module = %module.name(),
            handlers = module.len(),
            path = %self.path.display(),
            "Loaded handler manifest"
        );
        Ok(module)
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }
}

/// Loader used when no manifest is configured; every load reports
/// [`ModuleError::NotConfigured`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredModuleLoader;

impl ModuleLoader for UnconfiguredModuleLoader {
    fn load(&self) -> Result<HandlerModule, ModuleError> {
        Err(ModuleError::NotConfigured)
    }

    fn describe(&self) -> String {
        "no manifest configured".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, file: &str, content: &str) -> PathBuf {
        let path = dir.path().join(file);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "handlers.toml",
            r#"
name = "notebook"

[[handler]]
name = "rag_answer"
command = "python3"
args = ["answer.py"]
parameters = ["query", "mode"]

[[handler]]
name = "opaque"
command = "./bin/opaque"
"#,
        );

        let module = ManifestModuleLoader::new(&path).load().unwrap();
        assert_eq!(module.name(), "notebook");
        assert_eq!(module.names(), vec!["rag_answer", "opaque"]);

        let rag = module.get("rag_answer").unwrap();
        assert_eq!(rag.signature().unwrap().arity(), 2);
        assert!(module.get("opaque").unwrap().signature().is_none());
    }

    #[test]
    fn test_name_defaults_to_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "qa_tools.toml", "");
        let module = ManifestModuleLoader::new(&path).load().unwrap();
        assert_eq!(module.name(), "qa_tools");
        assert!(module.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ManifestModuleLoader::new(dir.path().join("nope.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ModuleError::NotFound(_)));
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "bad.toml", "[[handler]]\nname = ");
        let err = ManifestModuleLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, ModuleError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "dup.toml",
            r#"
[[handler]]
name = "a"
command = "x"

[[handler]]
name = "a"
command = "y"
"#,
        );
        let err = ManifestModuleLoader::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("duplicate handler name 'a'"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "empty.toml", "[[handler]]\nname = \"a\"\ncommand = \" \"\n");
        let err = ManifestModuleLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, ModuleError::Invalid(_)));
    }

    #[test]
    fn test_unconfigured_loader() {
        let loader = UnconfiguredModuleLoader;
        assert!(matches!(loader.load(), Err(ModuleError::NotConfigured)));
        assert_eq!(loader.describe(), "no manifest configured");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_manifest_handlers_answer_end_to_end() {
        use desk_application::{NoRunProgress, RunParams, RunQueryUseCase};
        use desk_domain::{AnswerMode, QueryRequest};
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "nb.toml",
            r#"
[[handler]]
name = "answer"
command = "sh"
args = ["-c", "cat > /dev/null; echo '{\"answer\": \"Paris\", \"score\": 0.8}'"]
parameters = ["query", "mode"]
"#,
        );

        let use_case = RunQueryUseCase::new(
            Arc::new(ManifestModuleLoader::new(&path)),
            RunParams::default(),
        );
        let report = use_case
            .execute(
                QueryRequest::new("Capital of France?", AnswerMode::Rag),
                &NoRunProgress,
            )
            .await;

        assert_eq!(report.handler.as_deref(), Some("answer"));
        assert_eq!(report.answer.answer, "Paris");
        assert_eq!(report.answer.confidence, Some(0.8));
        assert_eq!(report.answer.method, "RAG");
    }
}
