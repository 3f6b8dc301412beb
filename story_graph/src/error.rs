//! Errors raised while building or loading a story graph.

use std::path::PathBuf;

use thiserror::Error;

use crate::{ChoiceId, NodeId};

/// Reasons a story graph is rejected.
///
/// All of these are authoring defects. They are caught once, when the graph is
/// built, so traversal never has to handle a missing node.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("story graph has no nodes")]
    Empty,

    #[error("root node '{0}' is not defined")]
    MissingRoot(NodeId),

    #[error("node '{0}' is defined more than once")]
    DuplicateNode(NodeId),

    #[error("node '{node}' has more than one choice with id '{choice}'")]
    DuplicateChoice { node: NodeId, choice: ChoiceId },

    #[error("choice '{choice}' of node '{node}' points to undefined node '{target}'")]
    DanglingChoice {
        node: NodeId,
        choice: ChoiceId,
        target: NodeId,
    },

    #[error("failed to parse TOML story: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON story: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read story file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported story file format: {0}")]
    UnsupportedFormat(PathBuf),
}
