//! Search orchestration module
//!
//! Resolves the strategy for an intent, validates it, assembles the
//! request, hands it to the engine boundary and maps the answer.

mod assembler;
mod backend;
mod executor;

pub use assembler::{suggester_name, RequestAssembler, SearchRequest};
pub use backend::SearchBackend;
pub use executor::Search;
