//! Handler adapters
//!
//! Implementations of [`AnswerHandler`](desk_application::AnswerHandler) and
//! [`ModuleLoader`](desk_application::ModuleLoader):
//!
//! | Adapter | Runs | Signature |
//! |---------|------|-----------|
//! | [`CommandHandler`] | an external process, JSON over stdin/stdout | from the manifest, optional |
//! | [`FnHandler`] | an in-process closure | declared at registration, optional |
//!
//! [`ManifestModuleLoader`] builds a module of command handlers from a TOML
//! manifest; [`UnconfiguredModuleLoader`] stands in when no manifest is set.

mod command;
mod function;
mod manifest;

pub use command::{CommandHandler, CommandSpec};
pub use function::FnHandler;
pub use manifest::{ManifestModuleLoader, UnconfiguredModuleLoader};

use desk_application::HandlerError;
use desk_domain::HandlerSignature;

/// Reject calls whose argument count differs from the declared arity.
/// Handlers without a signature accept either form.
pub(crate) fn check_arity(
    signature: Option<&HandlerSignature>,
    given: usize,
) -> Result<(), HandlerError> {
    match signature {
        Some(sig) if sig.arity() != given => Err(HandlerError::ArityMismatch {
            expected: sig.arity(),
            given,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_arity() {
        let one = HandlerSignature::new("h", ["query"]);
        assert!(check_arity(Some(&one), 1).is_ok());
        assert!(check_arity(Some(&one), 2).unwrap_err().is_arity_mismatch());
        assert!(check_arity(None, 2).is_ok());
    }
}
