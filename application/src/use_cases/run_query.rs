//! Run Query use case.
//!
//! One user-triggered run: resolve a handler for the request's mode, invoke
//! it, normalize whatever comes back, and time the whole thing.
//!
//! A run never fails. Every problem on the way (module not loaded, no
//! handler, handler error) ends up as answer text in the [`RunReport`].

use crate::config::RunParams;
use crate::ports::module_loader::{HandlerModule, ModuleError, ModuleLoader};
use crate::ports::progress::RunProgressNotifier;
use crate::use_cases::invoke_handler::{CallPolicy, InvocationAdapter};
use crate::use_cases::resolve_handler::{CandidateInfo, HandlerResolver, Resolution};
use chrono::{DateTime, Utc};
use desk_domain::util::preview;
use desk_domain::{AnswerMode, NormalizedAnswer, QueryRequest, RawResult, normalize};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Answer shown for a blank query
pub const EMPTY_QUERY_PROMPT: &str = "Please enter a query.";

/// Placeholder answer when no handler is available
pub fn demo_answer(query: &str) -> String {
    format!("Demo answer for: '{}'", query)
}

/// Answer shown when a configured handler name is not in the module
pub fn not_found_message(name: &str, module: &str) -> String {
    format!("Function '{}' not found in {}", name, module)
}

/// Result of one run, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub request: QueryRequest,
    pub answer: NormalizedAnswer,
    /// Handler that produced the answer, `None` for placeholder answers
    pub handler: Option<String>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
}

impl RunReport {
    /// Elapsed wall-clock seconds with two decimals
    pub fn elapsed_display(&self) -> String {
        format!("{:.2}", self.elapsed.as_secs_f64())
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Use case for running a single query.
///
/// Holds the loaded handler module. Loading happens at construction and on
/// [`reload`](Self::reload); a load failure leaves the module empty and is
/// kept as [`module_error`](Self::module_error) for the front-end to show.
pub struct RunQueryUseCase {
    loader: Arc<dyn ModuleLoader>,
    module: HandlerModule,
    module_error: Option<ModuleError>,
    params: RunParams,
}

impl RunQueryUseCase {
    pub fn new(loader: Arc<dyn ModuleLoader>, params: RunParams) -> Self {
        let mut use_case = Self {
            loader,
            module: HandlerModule::default(),
            module_error: None,
            params,
        };
        use_case.reload();
        use_case
    }

    /// Re-read the handler module from its loader
    pub fn reload(&mut self) {
        match self.loader.load() {
            Ok(module) => {
                info!(
                    module = module.name(),
                    handlers = module.len(),
                    "Loaded handler module"
                );
                self.module = module;
                self.module_error = None;
            }
            Err(e) => {
                info!(source = %self.loader.describe(), error = %e, "Handler module unavailable");
                self.module = HandlerModule::default();
                self.module_error = Some(e);
            }
        }
    }

    pub fn module(&self) -> &HandlerModule {
        &self.module
    }

    /// Why the module could not be loaded, if it could not
    pub fn module_error(&self) -> Option<&ModuleError> {
        self.module_error.as_ref()
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn resolve(&self, mode: AnswerMode) -> Resolution {
        HandlerResolver::new(&self.module, &self.params.strategy).resolve(mode)
    }

    pub fn candidates(&self) -> Vec<CandidateInfo> {
        HandlerResolver::new(&self.module, &self.params.strategy).candidates()
    }

    /// Execute a run with progress callbacks.
    pub async fn execute(
        &self,
        request: QueryRequest,
        progress: &dyn RunProgressNotifier,
    ) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();

        info!(mode = %request.mode(), query = %preview(request.query(), 80), "Starting run");

        let (raw, handler) = self.produce(&request, progress).await;
        let shape = raw.shape();
        let answer = normalize(raw, request.mode());
        let elapsed = start.elapsed();

        info!(
            handler = handler.as_deref().unwrap_or("-"),
            shape,
            elapsed_ms = elapsed.as_millis() as u64,
            "Run finished"
        );

        RunReport {
            request,
            answer,
            handler,
            elapsed,
            started_at,
        }
    }

    async fn produce(
        &self,
        request: &QueryRequest,
        progress: &dyn RunProgressNotifier,
    ) -> (RawResult, Option<String>) {
        if request.is_blank() {
            return (RawResult::text(EMPTY_QUERY_PROMPT), None);
        }

        let resolution = self.resolve(request.mode());
        progress.on_resolved(request.mode(), &resolution);

        match resolution {
            Resolution::Selected { name, .. } => {
                let Some(handler) = self.module.get(&name) else {
                    return (
                        RawResult::text(not_found_message(&name, self.module_label())),
                        None,
                    );
                };
                let policy = if self.params.strategy.is_auto() {
                    CallPolicy::ByArity
                } else {
                    CallPolicy::RichestFirst
                };

                progress.on_invoke_start(&name);
                let raw = InvocationAdapter::new(self.params.timeout)
                    .invoke(handler.as_ref(), request, policy)
                    .await;
                progress.on_invoke_end(&name, !raw.is_failure());

                (raw, Some(name))
            }
            Resolution::NoCandidate => (RawResult::text(demo_answer(request.query())), None),
            Resolution::Missing { name } => (
                RawResult::text(not_found_message(&name, self.module_label())),
                None,
            ),
        }
    }

    fn module_label(&self) -> &str {
        if self.module.name().is_empty() {
            "handler module"
        } else {
            self.module.name()
        }
    }
}
