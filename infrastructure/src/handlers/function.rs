//! In-process function handler.

use super::check_arity;
use async_trait::async_trait;
use desk_application::{AnswerHandler, HandlerArgs, HandlerError};
use desk_domain::{HandlerSignature, RawResult};

/// Handler backed by a closure.
///
/// ```ignore
/// let module = HandlerModule::new("inline").with_handler(FnHandler::new(
///     HandlerSignature::new("echo", ["query", "mode"]),
///     |args| Ok(RawResult::with_method(args.query(), "echo")),
/// ));
/// ```
pub struct FnHandler<F> {
    name: String,
    signature: Option<HandlerSignature>,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(HandlerArgs<'_>) -> Result<RawResult, HandlerError> + Send + Sync,
{
    /// Handler with a declared signature; its name is the signature's name
    pub fn new(signature: HandlerSignature, func: F) -> Self {
        Self {
            name: signature.name().to_string(),
            signature: Some(signature),
            func,
        }
    }

    /// Handler without a signature (never auto-selected)
    pub fn unsigned(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            signature: None,
            func,
        }
    }
}

#[async_trait]
impl<F> AnswerHandler for FnHandler<F>
where
    F: Fn(HandlerArgs<'_>) -> Result<RawResult, HandlerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Option<&HandlerSignature> {
        self.signature.as_ref()
    }

    async fn answer(&self, args: HandlerArgs<'_>) -> Result<RawResult, HandlerError> {
        check_arity(self.signature.as_ref(), args.count())?;
        (self.func)(args)
    }
}
