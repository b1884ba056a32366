//! Value types carried by a query intent

use serde::{Deserialize, Serialize};

/// Search type, one per query strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    MatchAll,
    Term,
    Terms,
    Exists,
    Fuzzy,
    Range,
    Bool,
    Nested,
}

impl SearchType {
    /// Every declared search type
    pub const ALL: [SearchType; 8] = [
        Self::MatchAll,
        Self::Term,
        Self::Terms,
        Self::Exists,
        Self::Fuzzy,
        Self::Range,
        Self::Bool,
        Self::Nested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchAll => "match_all",
            Self::Term => "term",
            Self::Terms => "terms",
            Self::Exists => "exists",
            Self::Fuzzy => "fuzzy",
            Self::Range => "range",
            Self::Bool => "bool",
            Self::Nested => "nested",
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One sort key; position in the intent's list is its priority
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortCriterion {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortCriterion {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// A field to highlight, optionally with an explicit highlighter
/// (`unified`, `plain`, `fvh`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighter_type: Option<String>,
}

impl HighlightField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            highlighter_type: None,
        }
    }

    pub fn with_type(mut self, highlighter_type: impl Into<String>) -> Self {
        self.highlighter_type = Some(highlighter_type.into());
        self
    }
}

/// Metric computed inside a bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AggregationKind {
    Avg,
}

impl AggregationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "avg",
        }
    }
}

/// Metric aggregation nested under a bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubAggregation {
    pub kind: AggregationKind,
    pub name: String,
    pub field: String,
}

/// Terms bucket aggregation with an optional nested metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationSpec {
    pub name: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_aggregation: Option<SubAggregation>,
}

impl AggregationSpec {
    /// Bucket documents by the values of `field`
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            sub_aggregation: None,
        }
    }

    /// Average `field` within each bucket, reported as `name`
    pub fn with_avg(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.sub_aggregation = Some(SubAggregation {
            kind: AggregationKind::Avg,
            name: name.into(),
            field: field.into(),
        });
        self
    }
}

/// Term suggestion request for one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub field: String,
    pub text: String,
}

impl Suggestion {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
        }
    }
}

/// Range bound operator.
///
/// Keys that are not one of the four comparisons are kept as `Other` and
/// ignored when the range query is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub enum RangeOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Other(String),
}

impl RangeOperator {
    /// Engine keyword for a recognized operator
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Gt => Some("gt"),
            Self::Gte => Some("gte"),
            Self::Lt => Some("lt"),
            Self::Lte => Some("lte"),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for RangeOperator {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            _ => Self::Other(value),
        }
    }
}

impl From<RangeOperator> for String {
    fn from(op: RangeOperator) -> Self {
        match op {
            RangeOperator::Other(raw) => raw,
            known => known.keyword().unwrap_or_default().to_string(),
        }
    }
}

/// Role of a clause inside a boolean query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BoolRole {
    /// Must match, contributes to score
    Must,
    /// Must not match
    MustNot,
    /// Must match, does not contribute to score
    Filter,
}

impl BoolRole {
    pub const ALL: [BoolRole; 3] = [Self::Must, Self::MustNot, Self::Filter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::MustNot => "must_not",
            Self::Filter => "filter",
        }
    }
}
