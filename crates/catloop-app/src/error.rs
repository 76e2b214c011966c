//! Session runtime errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("frame loop is no longer running")]
    Closed,
    #[error("frame loop thread panicked")]
    Panicked,
    #[error("failed to spawn frame loop thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to read script {path}: {source}")]
    ScriptIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed script: {0}")]
    ScriptParse(#[from] serde_json::Error),
    #[error("invalid script: {0}")]
    InvalidScript(String),
}
