//! Query strategy module
//!
//! Defines the QueryStrategy trait, one strategy per search type, and a
//! registry that resolves a search type to its strategy.

mod registry;
mod traits;

// Strategy implementations
pub mod boolean;
pub mod exists;
pub mod fuzzy;
pub mod match_all;
pub mod nested;
pub mod range;
pub mod term;

pub use boolean::BoolStrategy;
pub use exists::ExistsStrategy;
pub use fuzzy::FuzzyStrategy;
pub use match_all::MatchAllStrategy;
pub use nested::NestedStrategy;
pub use range::RangeStrategy;
pub use registry::StrategyRegistry;
pub use term::{TermStrategy, TermsStrategy};
pub use traits::{QueryFragment, QueryStrategy};
