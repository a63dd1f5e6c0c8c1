use crate::types::GraphError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Graph API error during {operation}: {error}")]
    Graph {
        operation: &'static str,
        status: Option<u16>,
        error: GraphError,
    },

    #[error("Backend error during {operation} (status {status}): {detail}")]
    Backend {
        operation: &'static str,
        status: u16,
        detail: String,
    },

    #[error("Credential must not be empty")]
    InvalidCredential,

    #[error("Invalid app id: {0:?}")]
    InvalidAppId(String),

    #[error("Invalid API version: {0:?} (expected v<major>.<minor>)")]
    InvalidApiVersion(String),

    #[error("Invalid flow transition: {from} -> {to}")]
    InvalidTransition {
        from: crate::state::FlowState,
        to: crate::state::FlowState,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
