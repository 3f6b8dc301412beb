//! # Story Graph
//!
//! The static half of the story: node and choice definitions, the graph that
//! ties them together, and the loaders that read authored story files.
//! Nothing in this crate changes once a graph has been built; traversal state
//! lives in `story_session`.
//!
//! ## Core Components
//!
//! - **ids**: Typed string identifiers for nodes and choices
//! - **node**: Story nodes, choices and their mood tags
//! - **graph**: The validated graph and its reachability report
//! - **document**: TOML/JSON story documents
//! - **builtin**: The bundled story, "तरुण और नीली रोशनी"

pub mod builtin;
pub mod document;
pub mod error;
pub mod graph;
pub mod ids;
pub mod node;

pub use document::*;
pub use error::*;
pub use graph::*;
pub use ids::*;
pub use node::*;
