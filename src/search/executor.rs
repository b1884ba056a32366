//! Search execution: strategy resolution, validation, assembly, mapping

use super::assembler::{RequestAssembler, SearchRequest};
use super::backend::SearchBackend;
use crate::config::SearchSettings;
use crate::error::Result;
use crate::query::QueryIntent;
use crate::results::{ResultMapper, SearchResult};
use crate::strategies::StrategyRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs query intents against one engine.
///
/// Holds no per-search state; concurrent `execute` calls are independent.
pub struct Search {
    /// Engine boundary
    backend: Arc<dyn SearchBackend>,
    /// Search type to strategy mapping
    registry: Arc<StrategyRegistry>,
    /// Index used when an intent names none
    default_index: String,
}

impl Search {
    /// Create a new search executor using the built-in strategies
    pub fn new(backend: Arc<dyn SearchBackend>, settings: &SearchSettings) -> Self {
        Self::with_default_index(backend, settings.default_index.clone())
    }

    pub fn with_default_index(
        backend: Arc<dyn SearchBackend>,
        default_index: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            registry: StrategyRegistry::global(),
            default_index: default_index.into(),
        }
    }

    /// Use a custom strategy registry
    pub fn with_registry(mut self, registry: Arc<StrategyRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn default_index(&self) -> &str {
        &self.default_index
    }

    /// Resolve, validate and assemble without touching the engine
    pub fn prepare(&self, intent: &QueryIntent) -> Result<SearchRequest> {
        let strategy = self.registry.resolve(intent.search_type())?;
        let fragment = strategy.build(intent)?;
        RequestAssembler::new(&self.default_index).assemble(fragment, intent)
    }

    /// Execute an intent and normalize the engine's answer.
    ///
    /// Either a fully mapped result or an error is returned; engine
    /// failures are passed through without retry.
    pub async fn execute(&self, intent: &QueryIntent) -> Result<SearchResult> {
        let request = self.prepare(intent)?;

        debug!(
            "Executing {} search on '{}': {}",
            intent.search_type(),
            request.index,
            request.body
        );

        let start = Instant::now();
        let response = match self.backend.execute_search(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Search on '{}' failed: {}", request.index, e);
                return Err(e);
            }
        };

        let result = ResultMapper::map(&response);
        debug!(
            "Search on '{}' returned {} of {} hits in {:?} (engine took {}ms)",
            request.index,
            result.hits.len(),
            result.total_hits,
            start.elapsed(),
            result.took_ms
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::query::SearchType;
    use crate::results::NativeSearchResponse;
    use crate::strategies::MatchAllStrategy;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and answers with an empty result
    #[derive(Default)]
    struct RecordingBackend {
        requests: Mutex<Vec<SearchRequest>>,
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        async fn execute_search(&self, request: &SearchRequest) -> Result<NativeSearchResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(NativeSearchResponse::from_json(200, r#"{"took": 2, "hits": {"hits": []}}"#)?)
        }
    }

    #[tokio::test]
    async fn test_execute_sends_assembled_request() {
        let backend = Arc::new(RecordingBackend::default());
        let search = Search::with_default_index(backend.clone(), "orders");

        let result = search
            .execute(&QueryIntent::term("currency", "EUR").with_size(1))
            .await
            .unwrap();

        assert_eq!(result.took_ms, 2);
        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, "orders");
        assert_eq!(requests[0].body["query"]["term"]["currency"], "EUR");
    }

    #[tokio::test]
    async fn test_invalid_intent_never_reaches_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let search = Search::with_default_index(backend.clone(), "orders");

        let err = search
            .execute(&QueryIntent::new(SearchType::Term))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation { field: "term_field", .. }));
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_strategy_is_precondition_error() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(MatchAllStrategy));

        let backend = Arc::new(RecordingBackend::default());
        let search = Search::with_default_index(backend.clone(), "orders")
            .with_registry(Arc::new(registry));

        let err = search
            .execute(&QueryIntent::exists("email"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Precondition(_)));
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_suggester_never_reaches_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let search = Search::with_default_index(backend.clone(), "orders");

        let intent = QueryIntent::match_all()
            .with_suggestion("currency", "EUR")
            .with_suggestion("currency", "USD");
        let err = search.execute(&intent).await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(backend.requests.lock().unwrap().is_empty());
    }
}
