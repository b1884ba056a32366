//! Exact-value strategies: term and terms

use super::traits::*;
use crate::error::{Error, Result};
use crate::query::{QueryIntent, SearchType};
use serde_json::{json, Value};

/// Exact match of one field against one value
#[derive(Debug, Default, Clone, Copy)]
pub struct TermStrategy;

impl QueryStrategy for TermStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Term
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.term_field(), SearchType::Term, "term_field")?;
        require_value(intent.term_value(), SearchType::Term, "term_value")?;
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let field = intent.term_field().unwrap_or_default();
        let value = intent.term_value().cloned().unwrap_or(Value::Null);
        term_clause(field, &value).into()
    }
}

/// Match if the field equals any value of a set
#[derive(Debug, Default, Clone, Copy)]
pub struct TermsStrategy;

impl QueryStrategy for TermsStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Terms
    }

    fn validate(&self, intent: &QueryIntent) -> Result<()> {
        require_text(intent.term_field(), SearchType::Terms, "term_field")?;
        if intent.term_values().is_empty() {
            return Err(Error::Validation {
                search_type: SearchType::Terms,
                field: "term_values",
            });
        }
        for value in intent.term_values() {
            require_value(Some(value), SearchType::Terms, "term_values")?;
        }
        Ok(())
    }

    fn to_query_fragment(&self, intent: &QueryIntent) -> QueryFragment {
        let mut inner = serde_json::Map::new();
        inner.insert(
            intent.term_field().unwrap_or_default().to_string(),
            Value::Array(intent.term_values().to_vec()),
        );
        json!({ "terms": inner }).into()
    }
}
