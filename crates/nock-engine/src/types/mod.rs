//! Core domain types for routes, matchers, payloads and requests.

pub mod matcher;
pub mod payload;
pub mod request;
pub mod route;
