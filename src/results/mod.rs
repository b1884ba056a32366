//! Results module
//!
//! Native (wire) response types, the normalized [`SearchResult`] shape and
//! the mapper between them.

mod mapper;
mod native;
mod types;

pub use mapper::ResultMapper;
pub use native::*;
pub use types::*;
