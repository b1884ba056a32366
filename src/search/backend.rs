//! Boundary between request assembly and the engine

use super::assembler::SearchRequest;
use crate::error::Result;
use crate::results::NativeSearchResponse;
use async_trait::async_trait;

/// Sends an assembled request to the engine and returns its raw response.
///
/// The whole response is received before the call returns; nothing is
/// streamed. Implementations do not retry.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn execute_search(&self, request: &SearchRequest) -> Result<NativeSearchResponse>;
}
