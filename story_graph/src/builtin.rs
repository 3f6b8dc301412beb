//! The bundled story, compiled into the binary.

use crate::{GraphError, StoryGraph};

/// TOML source of "तरुण और नीली रोशनी".
pub const CHAND_KI_KAHANI_TOML: &str = include_str!("../stories/chand_ki_kahani.toml");

/// Parse the bundled story.
pub fn chand_ki_kahani() -> Result<StoryGraph, GraphError> {
    StoryGraph::from_toml_str(CHAND_KI_KAHANI_TOML)
}
