//! Engine-agnostic description of one search request

use super::types::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// One search request.
///
/// Only the search type is mandatory; it is fixed at construction. All
/// other parts are optional and set through the consuming `with_*` methods,
/// so an intent handed to [`crate::Search`] is never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryIntent {
    search_type: SearchType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
    #[serde(
        default,
        rename = "timeout_ms",
        with = "timeout_millis",
        skip_serializing_if = "Option::is_none"
    )]
    timeout: Option<Duration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sort: Vec<SortCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_fields: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exclude_fields: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    highlight_fields: Vec<HighlightField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aggregations: Vec<AggregationSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<Suggestion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    term_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    term_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    term_values: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "unique_bounds::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    range_bounds: BTreeMap<RangeOperator, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    nested_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nested_sub_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nested_sub_value: Option<Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    bool_rules: BTreeMap<BoolRole, BTreeMap<String, Value>>,
}

impl QueryIntent {
    /// Create an intent with nothing but a search type
    pub fn new(search_type: SearchType) -> Self {
        Self {
            search_type,
            target_index: None,
            from: None,
            size: None,
            timeout: None,
            sort: vec![],
            include_fields: None,
            exclude_fields: None,
            highlight_fields: vec![],
            aggregations: vec![],
            suggestions: vec![],
            term_field: None,
            term_value: None,
            term_values: vec![],
            range_bounds: BTreeMap::new(),
            nested_path: None,
            nested_sub_field: None,
            nested_sub_value: None,
            bool_rules: BTreeMap::new(),
        }
    }

    pub fn match_all() -> Self {
        Self::new(SearchType::MatchAll)
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(SearchType::Term)
            .with_term_field(field)
            .with_term_value(value)
    }

    pub fn terms<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(SearchType::Terms)
            .with_term_field(field)
            .with_term_values(values)
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::new(SearchType::Exists).with_term_field(field)
    }

    pub fn fuzzy(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(SearchType::Fuzzy)
            .with_term_field(field)
            .with_term_value(value)
    }

    pub fn range(field: impl Into<String>) -> Self {
        Self::new(SearchType::Range).with_term_field(field)
    }

    pub fn nested(
        path: impl Into<String>,
        sub_field: impl Into<String>,
        sub_value: impl Into<Value>,
    ) -> Self {
        Self::new(SearchType::Nested).with_nested(path, sub_field, sub_value)
    }

    pub fn boolean() -> Self {
        Self::new(SearchType::Bool)
    }

    // Request modifiers

    /// Search this index instead of the configured default
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.target_index = Some(index.into());
        self
    }

    pub fn with_from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Server-side execution bound
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append a sort key; earlier keys take precedence
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(SortCriterion::new(field, order));
        self
    }

    pub fn with_include_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.include_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclude_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.exclude_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_highlight(mut self, field: HighlightField) -> Self {
        self.highlight_fields.push(field);
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationSpec) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    pub fn with_suggestion(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.suggestions.push(Suggestion::new(field, text));
        self
    }

    // Search type parameters

    pub fn with_term_field(mut self, field: impl Into<String>) -> Self {
        self.term_field = Some(field.into());
        self
    }

    pub fn with_term_value(mut self, value: impl Into<Value>) -> Self {
        self.term_value = Some(value.into());
        self
    }

    /// Add values to the terms set; duplicates are dropped
    pub fn with_term_values<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        for value in values {
            let value = value.into();
            if !self.term_values.contains(&value) {
                self.term_values.push(value);
            }
        }
        self
    }

    /// Set the bound for `op`; a later bound for the same operator wins
    pub fn with_range_bound(mut self, op: RangeOperator, value: impl Into<Value>) -> Self {
        self.range_bounds.insert(op, value.into());
        self
    }

    pub fn with_nested(
        mut self,
        path: impl Into<String>,
        sub_field: impl Into<String>,
        sub_value: impl Into<Value>,
    ) -> Self {
        self.nested_path = Some(path.into());
        self.nested_sub_field = Some(sub_field.into());
        self.nested_sub_value = Some(sub_value.into());
        self
    }

    /// Add a `field = value` term clause under a boolean role
    pub fn with_bool_rule(
        mut self,
        role: BoolRole,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.bool_rules
            .entry(role)
            .or_default()
            .insert(field.into(), value.into());
        self
    }

    // Accessors

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn target_index(&self) -> Option<&str> {
        self.target_index.as_deref()
    }

    pub fn from(&self) -> Option<u32> {
        self.from
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn sort(&self) -> &[SortCriterion] {
        &self.sort
    }

    pub fn include_fields(&self) -> Option<&BTreeSet<String>> {
        self.include_fields.as_ref()
    }

    pub fn exclude_fields(&self) -> Option<&BTreeSet<String>> {
        self.exclude_fields.as_ref()
    }

    pub fn highlight_fields(&self) -> &[HighlightField] {
        &self.highlight_fields
    }

    pub fn aggregations(&self) -> &[AggregationSpec] {
        &self.aggregations
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn term_field(&self) -> Option<&str> {
        self.term_field.as_deref()
    }

    pub fn term_value(&self) -> Option<&Value> {
        self.term_value.as_ref()
    }

    pub fn term_values(&self) -> &[Value] {
        &self.term_values
    }

    pub fn range_bounds(&self) -> &BTreeMap<RangeOperator, Value> {
        &self.range_bounds
    }

    pub fn nested_path(&self) -> Option<&str> {
        self.nested_path.as_deref()
    }

    pub fn nested_sub_field(&self) -> Option<&str> {
        self.nested_sub_field.as_deref()
    }

    pub fn nested_sub_value(&self) -> Option<&Value> {
        self.nested_sub_value.as_ref()
    }

    pub fn bool_rules(&self) -> &BTreeMap<BoolRole, BTreeMap<String, Value>> {
        &self.bool_rules
    }

    /// Term clauses registered under one boolean role
    pub fn bool_clauses(&self, role: BoolRole) -> Option<&BTreeMap<String, Value>> {
        self.bool_rules.get(&role)
    }
}

/// Timeouts travel as whole milliseconds in serialized intents.
/// Sub-millisecond remainders round up.
mod timeout_millis {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => {
                let millis = d.as_millis() + u128::from(d.subsec_nanos() % 1_000_000 != 0);
                let millis = u64::try_from(millis)
                    .map_err(|_| S::Error::custom(format!("timeout {:?} out of range", d)))?;
                s.serialize_u64(millis)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

/// Range bound keys are case-insensitive; `gt` and `GT` in one object is
/// an error rather than a silent overwrite
mod unique_bounds {
    use crate::query::RangeOperator;
    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::Deserializer;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::fmt;

    struct BoundsVisitor;

    impl<'de> Visitor<'de> for BoundsVisitor {
        type Value = BTreeMap<RangeOperator, Value>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of range operators to bounds")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut bounds = BTreeMap::new();
            while let Some((key, bound)) = map.next_entry::<String, Value>()? {
                let op = RangeOperator::from(key.clone());
                if bounds.insert(op, bound).is_some() {
                    return Err(A::Error::custom(format!(
                        "duplicate range operator `{}`",
                        key
                    )));
                }
            }
            Ok(bounds)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<RangeOperator, Value>, D::Error> {
        d.deserialize_map(BoundsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intent_defaults() {
        let intent = QueryIntent::match_all();
        assert_eq!(intent.search_type(), SearchType::MatchAll);
        assert!(intent.from().is_none());
        assert!(intent.size().is_none());
        assert!(intent.sort().is_empty());
        assert!(intent.include_fields().is_none());
    }

    #[test]
    fn test_intent_builder() {
        let intent = QueryIntent::term("customer_first_name.keyword", "Diane")
            .with_index("orders")
            .with_from(10)
            .with_size(5)
            .with_sort("order_date", SortOrder::Desc)
            .with_sort("customer_id", SortOrder::Asc);

        assert_eq!(intent.term_field(), Some("customer_first_name.keyword"));
        assert_eq!(intent.term_value(), Some(&json!("Diane")));
        assert_eq!(intent.target_index(), Some("orders"));
        assert_eq!(intent.sort()[0].field, "order_date");
        assert_eq!(intent.sort()[1].order, SortOrder::Asc);
    }

    #[test]
    fn test_terms_values_are_a_set() {
        let intent = QueryIntent::terms("name", ["Diane", "Gwen", "Diane"]);
        assert_eq!(intent.term_values(), &[json!("Diane"), json!("Gwen")]);
    }

    #[test]
    fn test_bool_rules_group_by_role() {
        let intent = QueryIntent::boolean()
            .with_bool_rule(BoolRole::Must, "currency", "EUR")
            .with_bool_rule(BoolRole::Must, "day_of_week", "Monday")
            .with_bool_rule(BoolRole::MustNot, "customer_gender", "MALE");

        assert_eq!(intent.bool_clauses(BoolRole::Must).unwrap().len(), 2);
        assert_eq!(intent.bool_clauses(BoolRole::MustNot).unwrap().len(), 1);
        assert!(intent.bool_clauses(BoolRole::Filter).is_none());
    }

    #[test]
    fn test_deserialize_from_json() {
        let intent: QueryIntent = serde_json::from_value(json!({
            "search_type": "range",
            "term_field": "total_quantity",
            "range_bounds": { "gt": 3, "LT": 5, "near": 4 },
            "timeout_ms": 1500,
            "size": 20
        }))
        .unwrap();

        assert_eq!(intent.search_type(), SearchType::Range);
        assert_eq!(intent.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(intent.range_bounds().get(&RangeOperator::Gt), Some(&json!(3)));
        assert_eq!(intent.range_bounds().get(&RangeOperator::Lt), Some(&json!(5)));
        assert!(intent
            .range_bounds()
            .contains_key(&RangeOperator::Other("near".to_string())));
    }

    #[test]
    fn test_search_type_is_required() {
        let parsed = serde_json::from_value::<QueryIntent>(json!({ "size": 1 }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serialize_round_trip_keeps_timeout() {
        let intent = QueryIntent::match_all().with_timeout(Duration::from_secs(2));
        let encoded = serde_json::to_value(&intent).unwrap();
        assert_eq!(encoded["timeout_ms"], json!(2000));

        let decoded: QueryIntent = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, intent);
    }

    #[test]
    fn test_serialized_timeout_rounds_up() {
        let intent = QueryIntent::match_all().with_timeout(Duration::from_micros(500));
        let encoded = serde_json::to_value(&intent).unwrap();
        assert_eq!(encoded["timeout_ms"], json!(1));

        let intent = QueryIntent::match_all().with_timeout(Duration::from_micros(2_001));
        assert_eq!(serde_json::to_value(&intent).unwrap()["timeout_ms"], json!(3));
    }

    #[test]
    fn test_oversized_timeout_fails_to_serialize() {
        let intent = QueryIntent::match_all().with_timeout(Duration::MAX);
        assert!(serde_json::to_value(&intent).is_err());
    }

    #[test]
    fn test_range_operator_case_collision_rejected() {
        let parsed = serde_json::from_value::<QueryIntent>(json!({
            "search_type": "range",
            "term_field": "total_quantity",
            "range_bounds": { "gt": 3, "GT": 4 }
        }));

        let err = parsed.unwrap_err();
        assert!(err.to_string().contains("duplicate range operator"));
    }

    #[test]
    fn test_range_bound_builder_last_wins() {
        let intent = QueryIntent::range("total_quantity")
            .with_range_bound(RangeOperator::Gt, 3)
            .with_range_bound(RangeOperator::Gt, 4);
        assert_eq!(intent.range_bounds().len(), 1);
        assert_eq!(intent.range_bounds().get(&RangeOperator::Gt), Some(&json!(4)));
    }
}
