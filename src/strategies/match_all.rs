//! Match-all strategy

use super::traits::*;
use crate::query::{QueryIntent, SearchType};
use serde_json::json;

/// Matches every document; needs no parameters
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchAllStrategy;

impl QueryStrategy for MatchAllStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::MatchAll
    }

    fn to_query_fragment(&self, _intent: &QueryIntent) -> QueryFragment {
        json!({ "match_all": {} }).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_fragment() {
        let fragment = MatchAllStrategy.build(&QueryIntent::match_all()).unwrap();
        assert_eq!(fragment.into_json(), json!({ "match_all": {} }));
    }
}
