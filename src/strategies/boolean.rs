//! Boolean combination strategy

use super::traits::*;
use crate::error::{Error, Result};
use crate::query::{BoolRole, QueryIntent, SearchType};
use serde_json::Value;

/// Boolean combination of term clauses.
///
/// `must` clauses all match, `must_not` clauses all fail, `filter` clauses
/// match without affecting score.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolStrategy;

impl QueryStrategy for BoolStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Bool
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        let mut has_clause = false;
        for clauses in BoolRole::ALL
            .iter()
            .filter_map(|role| intent.bool_clauses(*role))
        {
            for (field, value) in clauses {
                require_text(Some(field.as_str()), SearchType::Bool, "bool_rules")?;
                require_value(Some(value), SearchType::Bool, "bool_rules")?;
                has_clause = true;
            }
        }

        if has_clause {
            Ok(())
        } else {
            Err(Error::Validation {
                search_type: SearchType::Bool,
                field: "bool_rules",
            })
        }
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let mut roles = serde_json::Map::new();

        for role in BoolRole::ALL {
            let Some(clauses) = intent.bool_clauses(role) else {
                continue;
            };
            if clauses.is_empty() {
                continue;
            }

            let terms = clauses
                .iter()
                .map(|(field, value)| term_clause(field, value))
                .collect();
            roles.insert(role.as_str().to_string(), Value::Array(terms));
        }

        serde_json::json!({ "bool": roles }).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_fragment() {
        let intent = QueryIntent::boolean()
            .with_bool_rule(BoolRole::Must, "currency", "EUR")
            .with_bool_rule(BoolRole::MustNot, "customer_gender", "MALE")
            .with_bool_rule(BoolRole::Filter, "day_of_week_i", 3);

        let fragment = BoolStrategy.build(&intent).unwrap();
        assert_eq!(
            fragment.into_json(),
            json!({
                "bool": {
                    "must": [ { "term": { "currency": "EUR" } } ],
                    "must_not": [ { "term": { "customer_gender": "MALE" } } ],
                    "filter": [ { "term": { "day_of_week_i": 3 } } ]
                }
            })
        );
    }

    #[test]
    fn test_bool_omits_absent_roles() {
        let intent = QueryIntent::boolean().with_bool_rule(BoolRole::Filter, "currency", "EUR");
        let fragment = BoolStrategy.build(&intent).unwrap().into_json();
        assert!(fragment["bool"].get("must").is_none());
        assert_eq!(fragment["bool"]["filter"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_bool_requires_a_clause() {
        let err = BoolStrategy.validate(&QueryIntent::boolean()).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "bool_rules", .. }));
    }

    #[test]
    fn test_bool_rejects_blank_field() {
        let intent = QueryIntent::boolean()
            .with_bool_rule(BoolRole::Must, "currency", "EUR")
            .with_bool_rule(BoolRole::Must, " ", "MALE");
        let err = BoolStrategy.build(&intent).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "bool_rules", .. }));
    }

    #[test]
    fn test_bool_rejects_null_value() {
        let intent = QueryIntent::boolean().with_bool_rule(BoolRole::Filter, "currency", Value::Null);
        let err = BoolStrategy.build(&intent).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "bool_rules", .. }));
    }
}
