//! Handler subdomain.
//!
//! - [`signature::HandlerSignature`]: declared name and parameter list
//! - [`signature::select_best`]: auto-selection by signature score

pub mod signature;
