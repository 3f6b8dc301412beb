//! User actions and the transitions they produce.

use serde::{Deserialize, Serialize};
use story_graph::{ChoiceId, NodeId};

/// Something the reader asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "choice", rename_all = "snake_case")]
pub enum Action {
    /// Follow a choice of the current node.
    Choose(ChoiceId),
    /// Undo the latest choice.
    Back,
    /// Start over from the root.
    Restart,
}

/// What a session did in response to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    Advanced { from: NodeId, to: NodeId },
    SteppedBack { from: NodeId, to: NodeId },
    Restarted { from: NodeId },
    /// The action did not apply; state is as before.
    Unchanged,
}

impl Transition {
    pub fn changed(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}
