//! esquery-rs: typed query construction and result normalization for
//! Elasticsearch
//!
//! A [`QueryIntent`] describes a search independently of the engine's
//! query DSL. [`Search`] resolves the strategy for its search type,
//! validates it, assembles the native request with all modifiers, executes
//! it through a [`SearchBackend`] and maps the answer to a [`SearchResult`].
//! [`EngineClient`] also covers single-document lifecycle operations.

pub mod config;
pub mod error;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod strategies;

pub use config::Settings;
pub use error::{Error, Result};
pub use network::{Connection, EngineClient};
pub use query::{QueryIntent, SearchType};
pub use results::SearchResult;
pub use search::{Search, SearchBackend, SearchRequest};
pub use strategies::{QueryStrategy, StrategyRegistry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default engine host
pub const DEFAULT_HOST: &str = "localhost";

/// Default engine HTTP port
pub const DEFAULT_PORT: u16 = 9200;

/// Index searched when neither the intent nor the settings name one
pub const DEFAULT_INDEX: &str = "kibana_sample_data_ecommerce";

/// Prefix of every term suggester name (`suggest_<field>`)
pub const SUGGEST_PREFIX: &str = "suggest_";
