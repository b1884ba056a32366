//! Opening and closing engine connections

use super::client::EngineClient;
use crate::config::{ServerSettings, Settings};
use crate::error::Result;
use tracing::info;

/// Entry point for obtaining an [`EngineClient`]
pub struct Connection;

impl Connection {
    /// Connect to `host:port` over plain HTTP with default outgoing settings.
    ///
    /// Fails with `InvalidArgument` when the host is empty.
    pub fn open(host: &str, port: u16) -> Result<EngineClient> {
        let settings = Settings {
            server: ServerSettings {
                host: host.to_string(),
                port,
                ..Default::default()
            },
            ..Default::default()
        };
        Self::open_with_settings(&settings)
    }

    /// Connect using explicit settings
    pub fn open_with_settings(settings: &Settings) -> Result<EngineClient> {
        let base_url = settings.base_url()?;
        let client = EngineClient::with_settings(base_url, &settings.outgoing)?;
        info!("Opened engine connection to {}", client.base_url());
        Ok(client)
    }

    /// Release a client; pooled connections close once every clone is gone
    pub fn close(client: EngineClient) {
        info!("Closing engine connection to {}", client.base_url());
        drop(client);
    }
}
