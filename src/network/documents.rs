//! Document lifecycle models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A stored document as returned by a get
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub index: String,
    pub id: String,
    pub version: Option<u64>,
    /// The document body
    pub source: Option<Value>,
    /// Stored fields, when requested
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// Outcome of a create, update or delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentWriteResponse {
    /// HTTP status the engine answered with
    pub status: u16,
    pub index: String,
    pub id: String,
    pub version: Option<u64>,
    /// `created`, `updated`, `deleted` or `noop`
    pub result: Option<String>,
}

/// Wire shape of index/update/delete responses
#[derive(Debug, Deserialize)]
pub(crate) struct WriteResponseBody {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_version")]
    pub version: Option<u64>,

    pub result: Option<String>,
}

impl WriteResponseBody {
    pub fn into_response(self, status: u16) -> DocumentWriteResponse {
        DocumentWriteResponse {
            status,
            index: self.index,
            id: self.id,
            version: self.version,
            result: self.result,
        }
    }
}

/// Wire shape of a get-by-id response
#[derive(Debug, Deserialize)]
pub(crate) struct GetResponseBody {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_version")]
    pub version: Option<u64>,

    pub found: bool,

    #[serde(rename = "_source")]
    pub source: Option<Value>,

    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl GetResponseBody {
    pub fn into_document(self) -> Option<Document> {
        if !self.found {
            return None;
        }
        Some(Document {
            index: self.index,
            id: self.id,
            version: self.version,
            source: self.source,
            fields: self.fields,
        })
    }
}

/// Wire shape of acknowledged admin responses
#[derive(Debug, Deserialize)]
pub(crate) struct AcknowledgedBody {
    #[serde(default)]
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_get_is_absent() {
        let body: GetResponseBody = serde_json::from_value(json!({
            "_index": "javatest",
            "_id": "missing",
            "found": false
        }))
        .unwrap();
        assert!(body.into_document().is_none());
    }

    #[test]
    fn test_found_get_keeps_source() {
        let body: GetResponseBody = serde_json::from_value(json!({
            "_index": "javatest",
            "_id": "a4135c2b",
            "_version": 2,
            "found": true,
            "_source": { "nome": "Anna" }
        }))
        .unwrap();
        let doc = body.into_document().unwrap();
        assert_eq!(doc.version, Some(2));
        assert_eq!(doc.source, Some(json!({ "nome": "Anna" })));
        assert!(doc.fields.is_empty());
    }
}
