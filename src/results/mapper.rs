//! Mapping from the engine-native response to [`SearchResult`]

use super::native::*;
use super::types::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Bucket keys that are not sub-aggregations
const BUCKET_RESERVED_KEYS: [&str; 3] = ["key", "key_as_string", "doc_count"];

/// Pure translation of native responses; keeps no state
pub struct ResultMapper;

impl ResultMapper {
    /// Normalize one native response.
    ///
    /// Absent aggregation and suggestion sections map to empty collections.
    pub fn map(response: &NativeSearchResponse) -> SearchResult {
        let body = &response.body;
        let (total_hits, hits_relation) = Self::total_hits(&body.hits);

        SearchResult {
            status: response.status,
            took_ms: body.took,
            terminated_early: body.terminated_early,
            timed_out: body.timed_out,
            shards: ShardStats {
                total: body.shards.total,
                successful: body.shards.successful,
                skipped: body.shards.skipped,
                failed: body.shards.failed,
            },
            total_hits,
            max_score: body.hits.max_score,
            hits_relation,
            hits: body.hits.hits.iter().map(Self::hit).collect(),
            aggregations: body
                .aggregations
                .as_ref()
                .map(|aggs| {
                    aggs.iter()
                        .map(|(name, value)| (name.clone(), Self::aggregation(value)))
                        .collect()
                })
                .unwrap_or_default(),
            suggestions: body
                .suggest
                .as_ref()
                .map(|suggest| {
                    suggest
                        .iter()
                        .map(|(name, entries)| {
                            (name.clone(), entries.iter().map(Self::suggestion).collect())
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    fn total_hits(hits: &HitsResponse) -> (u64, HitsRelation) {
        match &hits.total {
            Some(TotalHitsResponse::Object { value, relation }) => {
                let relation = match relation {
                    TotalHitsRelation::Eq => HitsRelation::EqualTo,
                    TotalHitsRelation::Gte => HitsRelation::GreaterThanOrEqualTo,
                };
                (*value, relation)
            }
            Some(TotalHitsResponse::Count(count)) => (*count, HitsRelation::EqualTo),
            None => (hits.hits.len() as u64, HitsRelation::GreaterThanOrEqualTo),
        }
    }

    fn hit(hit: &HitResponse) -> Hit {
        Hit {
            index: hit.index.clone(),
            id: hit.id.clone(),
            score: hit.score,
            source: hit.source.clone(),
            highlight: hit.highlight.clone().unwrap_or_default(),
            sort: hit.sort.clone().unwrap_or_default(),
        }
    }

    fn aggregation(value: &Value) -> AggregationResult {
        if let Some(buckets) = value.get("buckets").and_then(|b| b.as_array()) {
            return AggregationResult::Buckets(BucketAggregation {
                buckets: buckets.iter().map(Self::bucket).collect(),
                doc_count_error_upper_bound: value
                    .get("doc_count_error_upper_bound")
                    .and_then(|v| v.as_u64()),
                sum_other_doc_count: value.get("sum_other_doc_count").and_then(|v| v.as_u64()),
            });
        }

        match value.as_object() {
            Some(obj) if obj.contains_key("value") => AggregationResult::Metric {
                value: obj.get("value").and_then(|v| v.as_f64()),
            },
            _ => AggregationResult::Raw {
                value: value.clone(),
            },
        }
    }

    fn bucket(value: &Value) -> Bucket {
        let mut metrics = BTreeMap::new();
        if let Some(obj) = value.as_object() {
            for (name, sub) in obj {
                if BUCKET_RESERVED_KEYS.contains(&name.as_str()) {
                    continue;
                }
                // Single-value metrics only
                if let Some(metric) = sub.as_object().and_then(|s| s.get("value")) {
                    metrics.insert(name.clone(), metric.as_f64());
                }
            }
        }

        Bucket {
            key: value.get("key").cloned().unwrap_or(Value::Null),
            key_as_string: value
                .get("key_as_string")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            doc_count: value.get("doc_count").and_then(|v| v.as_u64()).unwrap_or(0),
            metrics,
        }
    }

    fn suggestion(entry: &SuggestEntryResponse) -> SuggestionEntry {
        SuggestionEntry {
            text: entry.text.clone(),
            offset: entry.offset,
            length: entry.length,
            options: entry
                .options
                .iter()
                .map(|o| SuggestionOption {
                    text: o.text.clone(),
                    score: o.score,
                    freq: o.freq,
                })
                .collect(),
        }
    }
}
