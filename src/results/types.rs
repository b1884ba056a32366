//! Normalized search result types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Normalized response of one executed search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// HTTP status the engine answered with
    pub status: u16,
    /// Server-measured execution time in milliseconds
    pub took_ms: u64,
    /// Whether the engine stopped collecting early
    pub terminated_early: Option<bool>,
    /// Whether the server-side timeout fired
    pub timed_out: bool,
    /// Shard execution counts
    pub shards: ShardStats,
    /// Total matching documents (see `hits_relation`)
    pub total_hits: u64,
    /// Highest relevance score among the hits
    pub max_score: Option<f64>,
    /// Whether `total_hits` is exact or a lower bound
    pub hits_relation: HitsRelation,
    /// Returned page of hits, in engine order
    pub hits: Vec<Hit>,
    /// Aggregation results by name
    #[serde(default)]
    pub aggregations: BTreeMap<String, AggregationResult>,
    /// Suggestion entries by suggester name
    #[serde(default)]
    pub suggestions: BTreeMap<String, Vec<SuggestionEntry>>,
}

impl SearchResult {
    pub fn took(&self) -> Duration {
        Duration::from_millis(self.took_ms)
    }

    /// Check if the engine reported success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }

    pub fn suggestion(&self, name: &str) -> Option<&[SuggestionEntry]> {
        self.suggestions.get(name).map(|v| v.as_slice())
    }
}

/// Shard execution counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShardStats {
    pub total: u32,
    pub successful: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Relation of the reported hit count to the true count
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HitsRelation {
    /// The count is exact
    #[default]
    EqualTo,
    /// The count is a lower bound
    GreaterThanOrEqualTo,
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub index: String,
    pub id: Option<String>,
    pub score: Option<f64>,
    /// Stored document, after source filtering
    pub source: Option<Value>,
    /// Highlighted fragments by field
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
    /// Sort key values, when the request was sorted
    #[serde(default)]
    pub sort: Vec<Value>,
}

impl Hit {
    /// Top-level source field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.source.as_ref().and_then(|s| s.get(name))
    }
}

/// Result of one named aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationResult {
    /// Bucket aggregation (e.g. terms)
    Buckets(BucketAggregation),
    /// Single-value metric (e.g. avg)
    Metric { value: Option<f64> },
    /// Any other shape, kept as returned
    Raw { value: Value },
}

impl AggregationResult {
    pub fn as_buckets(&self) -> Option<&BucketAggregation> {
        match self {
            Self::Buckets(b) => Some(b),
            _ => None,
        }
    }
}

/// Buckets of a bucket aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BucketAggregation {
    pub buckets: Vec<Bucket>,
    pub doc_count_error_upper_bound: Option<u64>,
    pub sum_other_doc_count: Option<u64>,
}

impl BucketAggregation {
    /// Find a bucket by its key (string form)
    pub fn bucket(&self, key: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.key_string() == key)
    }
}

/// One bucket and the metrics computed inside it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub key: Value,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
    /// Single-value sub-aggregations by name
    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl Bucket {
    pub fn key_string(&self) -> String {
        match (&self.key_as_string, &self.key) {
            (Some(s), _) => s.clone(),
            (None, Value::String(s)) => s.clone(),
            (None, other) => other.to_string(),
        }
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }
}

/// One analyzed token of a suggestion's input text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionEntry {
    pub text: String,
    pub offset: u32,
    pub length: u32,
    pub options: Vec<SuggestionOption>,
}

/// A proposed replacement for a suggestion entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionOption {
    pub text: String,
    pub score: f64,
    pub freq: Option<u64>,
}
