//! Strategy trait and shared types

use crate::error::{Error, Result};
use crate::query::{QueryIntent, SearchType};
use serde::Serialize;
use serde_json::Value;

/// Engine-native query object produced by a strategy, before modifiers
/// are applied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryFragment(Value);

impl QueryFragment {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for QueryFragment {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Translation rule for one search type.
///
/// Strategies are stateless; one instance serves every concurrent search.
pub trait QueryStrategy: Send + Sync {
    /// Search type this strategy handles
    fn search_type(&self) -> SearchType;

    /// Check that the intent carries every field this search type needs
    fn validate(&self, _intent: &QueryIntent) -> Result<()> {
        Ok(())
    }

    /// Translate a validated intent into a query fragment.
    ///
    /// Must not fail on missing fields; call [`QueryStrategy::validate`] first.
    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment;

    /// Validate, then translate
    fn build(&self, intent: &QueryIntent) -> Result<QueryFragment> {
        self.validate(intent)?;
        Ok(self.to_query_fragment(intent))
    }
}

/// Require a non-empty string field
pub(crate) fn require_text<'a>(
    value: Option<&'a str>,
    search_type: SearchType,
    field: &'static str,
) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Validation { search_type, field }),
    }
}

/// Require a non-null value
pub(crate) fn require_value<'a>(
    value: Option<&'a Value>,
    search_type: SearchType,
    field: &'static str,
) -> Result<&'a Value> {
    match value {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(Error::Validation { search_type, field }),
    }
}

/// `{"term": {field: value}}`
pub(crate) fn term_clause(field: &str, value: &Value) -> Value {
    let mut inner = serde_json::Map::new();
    inner.insert(field.to_string(), value.clone());
    serde_json::json!({ "term": inner })
}
