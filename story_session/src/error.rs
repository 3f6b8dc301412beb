//! Errors for the session front end.

use std::path::PathBuf;

use story_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("story error: {0}")]
    Graph(#[from] GraphError),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
