//! Mock scopes and interceptors.
//!
//! - [`Scope`]: groups interceptors under one origin, answers requests and
//!   notifies listeners after every match-and-reply
//! - [`Interceptor`]: route builder that is armed once a reply is defined

pub mod interceptor;
pub mod scope;

pub use interceptor::Interceptor;
pub use scope::{origin_of, RepliedListener, Scope};
