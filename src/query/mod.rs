//! Query intent module
//!
//! The engine-agnostic description of a search request: which search type
//! to run, its parameters, and the orthogonal request modifiers
//! (pagination, sort, source filtering, highlighting, aggregations,
//! suggestions, target index).

mod intent;
mod types;

pub use intent::QueryIntent;
pub use types::*;
