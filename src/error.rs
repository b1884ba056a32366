//! Error types
//!
//! Every fallible operation in the crate returns [`Result`]. Errors fall into
//! two groups: client-side errors raised before any network activity
//! (precondition, validation, invalid argument) and engine-side errors
//! surfaced unchanged from the search engine (engine, transport, decode).

use crate::query::SearchType;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, executing or mapping engine requests
#[derive(Error, Debug)]
pub enum Error {
    /// The call cannot proceed at all (e.g. no strategy for the search type)
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The intent is missing a field its search type requires
    #[error("{search_type} query requires `{field}`")]
    Validation {
        search_type: SearchType,
        field: &'static str,
    },

    /// A document or connection operation was called with a bad argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine rejected or failed to execute the request
    #[error("engine returned HTTP {status}: {reason}")]
    Engine { status: u16, reason: String },

    /// The request never produced an engine response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered with a body we could not decode
    #[error("failed to decode engine response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Settings could not be loaded or are inconsistent
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// True for failures that happened on or on the way to the engine
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            Self::Engine { .. } | Self::Transport(_) | Self::Decode(_)
        )
    }

    /// True for failures raised locally before any request was sent
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Precondition(_) | Self::Validation { .. } | Self::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field_and_type() {
        let err = Error::Validation {
            search_type: SearchType::Terms,
            field: "term_values",
        };
        assert_eq!(err.to_string(), "terms query requires `term_values`");
        assert!(err.is_client_error());
        assert!(!err.is_engine_error());
    }

    #[test]
    fn test_engine_error_classification() {
        let err = Error::Engine {
            status: 400,
            reason: "parsing_exception".to_string(),
        };
        assert!(err.is_engine_error());
        assert!(!err.is_client_error());
    }
}
