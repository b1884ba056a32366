//! Request assembly: query fragment plus request modifiers

use crate::error::{Error, Result};
use crate::query::QueryIntent;
use crate::strategies::QueryFragment;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Fully assembled search request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Index (or comma-separated indices / alias) to search
    pub index: String,
    /// Search body in the engine's query DSL
    pub body: Value,
}

/// Combines a query fragment with the intent's modifiers.
///
/// Modifiers are applied in a fixed order: pagination, timeout, sort,
/// source filtering, highlighting, aggregations, suggestions, then target
/// index resolution. A modifier absent from the intent leaves the engine
/// default in place. Aggregation and suggester names must be unique within
/// one request.
pub struct RequestAssembler<'a> {
    default_index: &'a str,
}

impl<'a> RequestAssembler<'a> {
    pub fn new(default_index: &'a str) -> Self {
        Self { default_index }
    }

    pub fn assemble(&self, fragment: QueryFragment, intent: &QueryIntent) -> Result<SearchRequest> {
        let mut body = Map::new();
        body.insert("query".to_string(), fragment.into_json());

        Self::apply_pagination(&mut body, intent);
        Self::apply_timeout(&mut body, intent);
        Self::apply_sort(&mut body, intent);
        Self::apply_source_filter(&mut body, intent);
        Self::apply_highlight(&mut body, intent);
        Self::apply_aggregations(&mut body, intent)?;
        Self::apply_suggestions(&mut body, intent)?;

        Ok(SearchRequest {
            index: self.resolve_index(intent),
            body: Value::Object(body),
        })
    }

    fn apply_pagination(body: &mut Map<String, Value>, intent: &QueryIntent) {
        if let Some(from) = intent.from() {
            body.insert("from".to_string(), json!(from));
        }
        if let Some(size) = intent.size() {
            body.insert("size".to_string(), json!(size));
        }
    }

    fn apply_timeout(body: &mut Map<String, Value>, intent: &QueryIntent) {
        if let Some(timeout) = intent.timeout() {
            body.insert(
                "timeout".to_string(),
                json!(time_value(timeout)),
            );
        }
    }

    fn apply_sort(body: &mut Map<String, Value>, intent: &QueryIntent) {
        if intent.sort().is_empty() {
            return;
        }

        let parts = intent
            .sort()
            .iter()
            .map(|criterion| {
                let mut entry = Map::new();
                entry.insert(
                    criterion.field.clone(),
                    json!({ "order": criterion.order.as_str() }),
                );
                Value::Object(entry)
            })
            .collect();
        body.insert("sort".to_string(), Value::Array(parts));
    }

    // Only applied when both sides are present; one side alone is a no-op
    fn apply_source_filter(body: &mut Map<String, Value>, intent: &QueryIntent) {
        if let (Some(include), Some(exclude)) = (intent.include_fields(), intent.exclude_fields()) {
            body.insert(
                "_source".to_string(),
                json!({
                    "includes": include,
                    "excludes": exclude,
                }),
            );
        }
    }

    fn apply_highlight(body: &mut Map<String, Value>, intent: &QueryIntent) {
        if intent.highlight_fields().is_empty() {
            return;
        }

        let mut fields = Map::new();
        for field in intent.highlight_fields() {
            let options = match &field.highlighter_type {
                Some(kind) => json!({ "type": kind }),
                None => json!({}),
            };
            fields.insert(field.name.clone(), options);
        }
        body.insert("highlight".to_string(), json!({ "fields": fields }));
    }

    fn apply_aggregations(body: &mut Map<String, Value>, intent: &QueryIntent) -> Result<()> {
        if intent.aggregations().is_empty() {
            return Ok(());
        }

        let mut aggs = Map::new();
        for spec in intent.aggregations() {
            let mut bucket = json!({ "terms": { "field": spec.field } });
            if let Some(sub) = &spec.sub_aggregation {
                let mut sub_aggs = Map::new();
                sub_aggs.insert(
                    sub.name.clone(),
                    json!({ sub.kind.as_str(): { "field": sub.field } }),
                );
                bucket["aggs"] = Value::Object(sub_aggs);
            }
            if aggs.insert(spec.name.clone(), bucket).is_some() {
                return Err(duplicate_name("aggregation", &spec.name));
            }
        }
        body.insert("aggs".to_string(), Value::Object(aggs));
        Ok(())
    }

    fn apply_suggestions(body: &mut Map<String, Value>, intent: &QueryIntent) -> Result<()> {
        if intent.suggestions().is_empty() {
            return Ok(());
        }

        let mut suggest = Map::new();
        for suggestion in intent.suggestions() {
            let name = suggester_name(&suggestion.field);
            let entry = json!({
                "text": suggestion.text,
                "term": { "field": suggestion.field },
            });
            if suggest.insert(name.clone(), entry).is_some() {
                return Err(duplicate_name("suggester", &name));
            }
        }
        body.insert("suggest".to_string(), Value::Object(suggest));
        Ok(())
    }

    fn resolve_index(&self, intent: &QueryIntent) -> String {
        intent
            .target_index()
            .unwrap_or(self.default_index)
            .to_string()
    }
}

fn duplicate_name(kind: &str, name: &str) -> Error {
    Error::invalid_argument(format!("duplicate {} name `{}`", kind, name))
}

/// Engine time value for `duration`.
///
/// Whole milliseconds are sent as `<n>ms`. Anything finer is sent as
/// microseconds, rounded up, so a non-zero timeout never becomes `0ms`.
fn time_value(duration: Duration) -> String {
    if duration.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}micros", (duration.as_nanos() + 999) / 1_000)
    }
}

/// Name under which the term suggester for `field` is registered
pub fn suggester_name(field: &str) -> String {
    format!("{}{}", crate::SUGGEST_PREFIX, field)
}
