//! Story documents - the authored, on-disk form of a story graph.
//!
//! A document is optional heading text, a root ID and a list of nodes. In TOML:
//!
//! ```toml
//! title = "..."
//! root = "start"
//!
//! [[nodes]]
//! id = "start"
//! title = "..."
//! scene = "..."
//! ambiance = "..."
//!
//! [[nodes.choices]]
//! id = "go"
//! text = "..."
//! mood = "hope"
//! next = "end"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{GraphError, NodeId, StoryGraph, StoryMeta, StoryNode};

/// Serialized form of a [`StoryGraph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDocument {
    #[serde(flatten)]
    pub meta: StoryMeta,
    pub root: NodeId,
    pub nodes: Vec<StoryNode>,
}

impl StoryDocument {
    /// Validate the document and turn it into a graph.
    pub fn into_graph(self) -> Result<StoryGraph, GraphError> {
        Ok(StoryGraph::new(self.root, self.nodes)?.with_meta(self.meta))
    }
}

impl StoryGraph {
    /// Parse and validate a TOML story.
    pub fn from_toml_str(source: &str) -> Result<Self, GraphError> {
        let document: StoryDocument = toml::from_str(source)?;
        document.into_graph()
    }

    /// Parse and validate a JSON story.
    pub fn from_json_str(source: &str) -> Result<Self, GraphError> {
        let document: StoryDocument = serde_json::from_str(source)?;
        document.into_graph()
    }

    /// Load a story file. The format follows the extension: `.toml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self, GraphError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(GraphError::UnsupportedFormat(path.to_path_buf())),
        };

        let source = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = parse(&source)?;
        info!(path = %path.display(), nodes = graph.len(), "story loaded");
        Ok(graph)
    }

    /// Snapshot the graph back into its document form, nodes in authoring order.
    pub fn to_document(&self) -> StoryDocument {
        StoryDocument {
            meta: self.meta().clone(),
            root: self.root().clone(),
            nodes: self.nodes().cloned().collect(),
        }
    }
}
