//! Engine-native search response, as received on the wire

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Raw search response together with the HTTP status it arrived with
#[derive(Debug, Clone)]
pub struct NativeSearchResponse {
    pub status: u16,
    pub body: SearchResponseBody,
}

impl NativeSearchResponse {
    pub fn new(status: u16, body: SearchResponseBody) -> Self {
        Self { status, body }
    }

    /// Decode a JSON body
    pub fn from_json(status: u16, body: &str) -> serde_json::Result<Self> {
        Ok(Self::new(status, serde_json::from_str(body)?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponseBody {
    pub took: u64,
    pub timed_out: bool,
    pub terminated_early: Option<bool>,
    #[serde(rename = "_shards")]
    pub shards: ShardsResponse,
    pub hits: HitsResponse,
    pub aggregations: Option<serde_json::Map<String, Value>>,
    pub suggest: Option<HashMap<String, Vec<SuggestEntryResponse>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShardsResponse {
    pub total: u32,
    pub successful: u32,
    pub skipped: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HitsResponse {
    pub total: Option<TotalHitsResponse>,
    pub max_score: Option<f64>,
    pub hits: Vec<HitResponse>,
}

/// Total hit count: an object on current engines, a bare number on old ones
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalHitsResponse {
    Object {
        value: u64,
        relation: TotalHitsRelation,
    },
    Count(u64),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum TotalHitsRelation {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitResponse {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: Option<String>,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<Value>,

    pub highlight: Option<HashMap<String, Vec<String>>>,

    pub sort: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestEntryResponse {
    pub text: String,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub options: Vec<SuggestOptionResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestOptionResponse {
    pub text: String,
    #[serde(default)]
    pub score: f64,
    pub freq: Option<u64>,
}
