//! Strategy registry mapping search types to their strategies

use super::traits::QueryStrategy;
use super::{
    BoolStrategy, ExistsStrategy, FuzzyStrategy, MatchAllStrategy, NestedStrategy,
    RangeStrategy, TermStrategy, TermsStrategy,
};
use crate::error::{Error, Result};
use crate::query::SearchType;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

static DEFAULT_REGISTRY: Lazy<Arc<StrategyRegistry>> =
    Lazy::new(|| Arc::new(StrategyRegistry::with_defaults()));

/// Registry of query strategies, one per search type.
///
/// Built once, then only read; lookups need no locking.
pub struct StrategyRegistry {
    strategies: HashMap<SearchType, Arc<dyn QueryStrategy>>,
}

impl StrategyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry with the built-in strategy for every search type
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for search_type in SearchType::ALL {
            registry.register(Self::builtin(search_type));
        }
        registry
    }

    /// Process-wide registry of built-in strategies
    pub fn global() -> Arc<StrategyRegistry> {
        Arc::clone(&DEFAULT_REGISTRY)
    }

    fn builtin(search_type: SearchType) -> Arc<dyn QueryStrategy> {
        match search_type {
            SearchType::MatchAll => Arc::new(MatchAllStrategy),
            SearchType::Term => Arc::new(TermStrategy),
            SearchType::Terms => Arc::new(TermsStrategy),
            SearchType::Exists => Arc::new(ExistsStrategy),
            SearchType::Fuzzy => Arc::new(FuzzyStrategy),
            SearchType::Range => Arc::new(RangeStrategy),
            SearchType::Bool => Arc::new(BoolStrategy),
            SearchType::Nested => Arc::new(NestedStrategy),
        }
    }

    /// Register a strategy under the search type it reports, replacing any
    /// previous one
    pub fn register(&mut self, strategy: Arc<dyn QueryStrategy>) {
        self.strategies.insert(strategy.search_type(), strategy);
    }

    /// Strategy responsible for a search type.
    ///
    /// A missing entry is a configuration defect and never falls back to
    /// another strategy.
    pub fn resolve(&self, search_type: SearchType) -> Result<&dyn QueryStrategy> {
        self.strategies
            .get(&search_type)
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                Error::precondition(format!(
                    "no query strategy registered for search type '{}'",
                    search_type
                ))
            })
    }

    /// Check if a search type has a strategy
    pub fn contains(&self, search_type: SearchType) -> bool {
        self.strategies.contains_key(&search_type)
    }

    /// Declared search types without a strategy
    pub fn missing(&self) -> Vec<SearchType> {
        SearchType::ALL
            .into_iter()
            .filter(|t| !self.contains(*t))
            .collect()
    }

    /// Get number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
