//! Range strategy

use super::traits::*;
use crate::error::{Error, Result};
use crate::query::{QueryIntent, SearchType};
use serde_json::json;
use tracing::debug;

/// Conjunction of bound comparisons on one field
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeStrategy;

impl QueryStrategy for RangeStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Range
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.term_field(), SearchType::Range, "term_field")?;
        if intent.range_bounds().is_empty() {
            return Err(Error::Validation {
                search_type: SearchType::Range,
                field: "range_bounds",
            });
        }
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let mut bounds = serde_json::Map::new();
        for (op, value) in intent.range_bounds() {
            match op.keyword() {
                Some(keyword) => {
                    bounds.insert(keyword.to_string(), value.clone());
                }
                None => debug!("Ignoring unrecognized range bound {:?}", op),
            }
        }

        let mut inner = serde_json::Map::new();
        inner.insert(
            intent.term_field().unwrap_or_default().to_string(),
            serde_json::Value::Object(bounds),
        );
        json!({ "range": inner }).into()
    }
}
