//! Request matching utilities.

mod headers;
mod path;
mod payload;
mod query;

pub use headers::{headers_intersects, headers_matches};
pub use path::{path_matches, split_path};
pub use payload::{object_intersects, payload_matches};
pub use query::{parse_query_string, query_matches};
