//! Exists strategy

use super::traits::*;
use crate::error::Result;
use crate::query::{QueryIntent, SearchType};
use serde_json::json;

/// Documents with a non-null value for a field
#[derive(Debug, Default, Clone, Copy)]
pub struct ExistsStrategy;

impl QueryStrategy for ExistsStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Exists
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.term_field(), SearchType::Exists, "term_field")?;
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        json!({ "exists": { "field": intent.term_field().unwrap_or_default() } }).into()
    }
}
