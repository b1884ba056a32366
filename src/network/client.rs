//! HTTP client for the search engine's REST API

use super::documents::*;
use crate::config::OutgoingSettings;
use crate::error::{Error, Result};
use crate::results::NativeSearchResponse;
use crate::search::{SearchBackend, SearchRequest};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use url::Url;

/// Ingest pipeline that extracts text from base64 attachments
pub const ATTACHMENT_PIPELINE: &str = "attachment";

/// Source field receiving base64 attachment content
pub const ATTACHMENT_FIELD: &str = "data";

/// Engine client: search plus single-document lifecycle operations.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct EngineClient {
    client: Client,
    base_url: Url,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

/// Raw HTTP answer
struct RawResponse {
    status: u16,
    text: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_not_found(&self) -> bool {
        self.status == 404
    }

    fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Engine error carrying the engine's own reason when it sent one
    fn into_error(self) -> Error {
        let reason = serde_json::from_str::<Value>(&self.text)
            .ok()
            .and_then(|body| match body.get("error") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(err) => err
                    .get("reason")
                    .or_else(|| err.get("type"))
                    .and_then(|r| r.as_str())
                    .map(|s| s.to_string()),
                None => None,
            })
            .unwrap_or_else(|| {
                if self.text.is_empty() {
                    reqwest::StatusCode::from_u16(self.status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    self.text
                }
            });

        Error::Engine {
            status: self.status,
            reason,
        }
    }
}

impl EngineClient {
    /// Create a client with default outgoing settings
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_settings(base_url, &OutgoingSettings::default())
    }

    /// Create a client with custom outgoing settings
    pub fn with_settings(base_url: Url, settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(settings.timeout()?)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        let proxy_err = |e: reqwest::Error| Error::Config(format!("invalid proxy: {}", e));
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url).map_err(proxy_err)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http).map_err(proxy_err)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https).map_err(proxy_err)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            user_agent: format!("esquery-rs/{}", crate::VERSION),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Engine base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a path below the base, each segment percent-encoded
    fn url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        let mut request = request
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(RawResponse { status, text })
    }

    /// Execute an assembled search request
    pub async fn search(&self, request: &SearchRequest) -> Result<NativeSearchResponse> {
        let url = self.url(&[&request.index, "_search"]);
        let raw = self.send(self.client.post(&url).json(&request.body)).await?;

        if !raw.is_success() {
            return Err(raw.into_error());
        }
        Ok(NativeSearchResponse::from_json(raw.status, &raw.text)?)
    }

    /// Index a document, under `id` when given, otherwise under an
    /// engine-generated id
    pub async fn create_document(
        &self,
        index: &str,
        metadata: &Value,
        id: Option<&str>,
    ) -> Result<DocumentWriteResponse> {
        require_name(index, "index name")?;
        if !metadata.is_object() {
            return Err(Error::invalid_argument(
                "document metadata must be a JSON object",
            ));
        }

        let request = match id {
            Some(id) => {
                require_name(id, "document id")?;
                self.client.put(self.url(&[index, "_doc", id]))
            }
            None => self.client.post(self.url(&[index, "_doc"])),
        };

        let raw = self.send(request.json(metadata)).await?;
        Self::write_response(raw)
    }

    /// Index binary content through the attachment ingest pipeline.
    ///
    /// The content is base64-encoded into the `data` field next to the
    /// given metadata.
    pub async fn index_attachment(
        &self,
        index: &str,
        content: &[u8],
        metadata: Option<Map<String, Value>>,
    ) -> Result<DocumentWriteResponse> {
        require_name(index, "index name")?;
        if content.is_empty() {
            return Err(Error::invalid_argument("attachment content must not be empty"));
        }

        let mut source = metadata.unwrap_or_default();
        source.insert(ATTACHMENT_FIELD.to_string(), json!(BASE64.encode(content)));

        let request = self
            .client
            .post(self.url(&[index, "_doc"]))
            .query(&[("pipeline", ATTACHMENT_PIPELINE)])
            .json(&source);

        let raw = self.send(request).await?;
        Self::write_response(raw)
    }

    /// Fetch a document; `None` when the document or its index is absent
    pub async fn get_document(&self, index: &str, id: &str) -> Result<Option<Document>> {
        require_name(index, "index name")?;
        require_name(id, "document id")?;

        let raw = self
            .send(self.client.get(self.url(&[index, "_doc", id])))
            .await?;

        if raw.is_not_found() {
            return Ok(None);
        }
        if !raw.is_success() {
            return Err(raw.into_error());
        }
        Ok(raw.json::<GetResponseBody>()?.into_document())
    }

    /// Check whether a document exists without fetching its source
    pub async fn exists_document(&self, index: &str, id: &str) -> Result<bool> {
        require_name(index, "index name")?;
        require_name(id, "document id")?;

        let request = self
            .client
            .head(self.url(&[index, "_doc", id]))
            .query(&[("_source", "false")]);
        let raw = self.send(request).await?;

        match raw.status {
            404 => Ok(false),
            s if (200..300).contains(&s) => Ok(true),
            _ => Err(raw.into_error()),
        }
    }

    /// Merge `patch` into an existing document; `None` if it does not exist.
    ///
    /// The existence check and the update are two separate requests, so a
    /// delete landing between them makes the update fail with a 404 engine
    /// error.
    pub async fn update_document(
        &self,
        index: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Option<DocumentWriteResponse>> {
        require_name(index, "index name")?;
        require_name(id, "document id")?;
        if !patch.is_object() {
            return Err(Error::invalid_argument("document patch must be a JSON object"));
        }

        if !self.exists_document(index, id).await? {
            debug!("Update skipped, document {}/{} not found", index, id);
            return Ok(None);
        }

        let request = self
            .client
            .post(self.url(&[index, "_update", id]))
            .json(&json!({ "doc": patch }));
        let raw = self.send(request).await?;
        Self::write_response(raw).map(Some)
    }

    /// Delete a document; `None` if it does not exist.
    ///
    /// Same two-step check-then-act as [`EngineClient::update_document`].
    pub async fn delete_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<DocumentWriteResponse>> {
        require_name(index, "index name")?;
        require_name(id, "document id")?;

        if !self.exists_document(index, id).await? {
            debug!("Delete skipped, document {}/{} not found", index, id);
            return Ok(None);
        }

        let raw = self
            .send(self.client.delete(self.url(&[index, "_doc", id])))
            .await?;
        Self::write_response(raw).map(Some)
    }

    /// Delete an index; `false` if it did not exist
    pub async fn delete_index(&self, name: &str) -> Result<bool> {
        require_name(name, "index name")?;

        let raw = self.send(self.client.delete(self.url(&[name]))).await?;

        if raw.is_not_found() {
            info!("Index '{}' did not exist", name);
            return Ok(false);
        }
        if !raw.is_success() {
            return Err(raw.into_error());
        }

        let acknowledged = raw.json::<AcknowledgedBody>()?.acknowledged;
        info!("Deleted index '{}' (acknowledged: {})", name, acknowledged);
        Ok(acknowledged)
    }

    fn write_response(raw: RawResponse) -> Result<DocumentWriteResponse> {
        if !raw.is_success() {
            let err = raw.into_error();
            warn!("Document write failed: {}", err);
            return Err(err);
        }
        Ok(raw.json::<WriteResponseBody>()?.into_response(raw.status))
    }
}

#[async_trait]
impl SearchBackend for EngineClient {
    async fn execute_search(&self, request: &SearchRequest) -> Result<NativeSearchResponse> {
        self.search(request).await
    }
}

fn require_name(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{} must not be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EngineClient {
        EngineClient::new(Url::parse("http://localhost:9200").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = EngineClient::new(Url::parse("http://localhost:9200").unwrap());
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = client();
        assert_eq!(
            client.url(&["javatest", "_doc", "a b/c"]),
            "http://localhost:9200/javatest/_doc/a%20b%2Fc"
        );
    }

    #[test]
    fn test_engine_error_reason() {
        let raw = RawResponse {
            status: 400,
            text: r#"{"error":{"type":"parsing_exception","reason":"unknown query [foo]"},"status":400}"#
                .to_string(),
        };
        match raw.into_error() {
            Error::Engine { status, reason } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "unknown query [foo]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_engine_error_without_body() {
        let raw = RawResponse {
            status: 503,
            text: String::new(),
        };
        assert!(matches!(
            raw.into_error(),
            Error::Engine { status: 503, ref reason } if reason == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_empty_index_rejected_before_request() {
        let err = client()
            .create_document("", &json!({ "nome": "Anna" }), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_non_object_metadata_rejected() {
        let err = client()
            .create_document("javatest", &Value::Null, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_empty_attachment_rejected() {
        let err = client()
            .index_attachment("attachment_demo", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_bad_request_timeout_is_config_error() {
        let settings = OutgoingSettings {
            request_timeout: -1.0,
            ..Default::default()
        };
        let err = EngineClient::with_settings(Url::parse("http://localhost:9200").unwrap(), &settings)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let mut settings = OutgoingSettings::default();
        settings.proxies.http = Some("http://not a proxy".to_string());
        let err = EngineClient::with_settings(Url::parse("http://localhost:9200").unwrap(), &settings)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_relaxed_tls_and_proxy_settings_build() {
        let mut settings = OutgoingSettings {
            verify_ssl: false,
            ..Default::default()
        };
        settings.proxies.all = Some("http://proxy.internal:3128".to_string());
        assert!(
            EngineClient::with_settings(Url::parse("https://localhost:9200").unwrap(), &settings)
                .is_ok()
        );
    }
}
