//! Nested strategy

use super::traits::*;
use crate::error::Result;
use crate::query::{QueryIntent, SearchType};
use serde_json::{json, Value};

/// Term match on objects under a nested path; the nested match does not
/// contribute to the parent document's score
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedStrategy;

impl QueryStrategy for NestedStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Nested
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.nested_path(), SearchType::Nested, "nested_path")?;
        require_text(intent.nested_sub_field(), SearchType::Nested, "nested_sub_field")?;
        require_value(intent.nested_sub_value(), SearchType::Nested, "nested_sub_value")?;
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let inner = term_clause(
            intent.nested_sub_field().unwrap_or_default(),
            intent.nested_sub_value().unwrap_or(&Value::Null),
        );
        json!({
            "nested": {
                "path": intent.nested_path().unwrap_or_default(),
                "query": inner,
                "score_mode": "none",
            }
        })
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_nested_fragment() {
        let intent = QueryIntent::nested("user", "user.first.keyword", "Alice");
        let fragment = NestedStrategy.build(&intent).unwrap();
        assert_eq!(
            fragment.into_json(),
            json!({
                "nested": {
                    "path": "user",
                    "query": { "term": { "user.first.keyword": "Alice" } },
                    "score_mode": "none"
                }
            })
        );
    }

    #[test]
    fn test_nested_reports_first_missing_field() {
        let intent = QueryIntent::new(SearchType::Nested);
        let err = NestedStrategy.validate(&intent).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "nested_path", .. }));
    }
}
