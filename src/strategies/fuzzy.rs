//! Fuzzy strategy

use super::traits::*;
use crate::error::Result;
use crate::query::{QueryIntent, SearchType};
use serde_json::{json, Value};

/// Edit distance used when the intent does not say otherwise
const DEFAULT_FUZZINESS: &str = "AUTO";

/// Approximate match allowing an edit distance on one field
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzyStrategy;

impl QueryStrategy for FuzzyStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Fuzzy
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.term_field(), SearchType::Fuzzy, "term_field")?;
        require_value(intent.term_value(), SearchType::Fuzzy, "term_value")?;
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let mut inner = serde_json::Map::new();
        inner.insert(
            intent.term_field().unwrap_or_default().to_string(),
            json!({
                "value": intent.term_value().cloned().unwrap_or(Value::Null),
                "fuzziness": DEFAULT_FUZZINESS,
            }),
        );
        json!({ "fuzzy": inner }).into()
    }
}
