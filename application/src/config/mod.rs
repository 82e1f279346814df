//! Application-level configuration.
//!
//! - [`RunParams`]: how a run resolves and invokes its handler
//! - [`ResolverStrategy`]: auto-selection vs. one configured handler per mode

pub mod run_params;

pub use run_params::{ResolverStrategy, RunParams};
