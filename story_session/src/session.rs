//! The traversal controller: where the reader is and how they got there.

use serde::{Deserialize, Serialize};
use story_graph::{ChoiceId, NodeId, StoryGraph, StoryNode};
use tracing::debug;
use uuid::Uuid;

use crate::action::{Action, Transition};

/// Unique identifier for a reading session, used to correlate log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the visited path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStep {
    pub id: NodeId,

    /// Text of the choice that led here. `None` only for the root step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<String>,
}

impl HistoryStep {
    pub fn root(id: NodeId) -> Self {
        Self {
            id,
            choice_label: None,
        }
    }
}

/// A reader's walk through a story graph.
///
/// Invariants, kept by every transition:
/// - `history` is never empty and starts with the unlabelled root step.
/// - The last history step is always `current`.
#[derive(Debug, Clone)]
pub struct Session<'g> {
    id: SessionId,
    graph: &'g StoryGraph,
    current: NodeId,
    history: Vec<HistoryStep>,
}

impl<'g> Session<'g> {
    /// Start a session at the graph's root.
    pub fn new(graph: &'g StoryGraph) -> Self {
        let root = graph.root().clone();
        let session = Self {
            id: SessionId::new(),
            graph,
            current: root.clone(),
            history: vec![HistoryStep::root(root)],
        };
        debug!(session = %session.id, root = %session.current, "session started");
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn graph(&self) -> &'g StoryGraph {
        self.graph
    }

    pub fn current_id(&self) -> &NodeId {
        &self.current
    }

    /// The node on display. Never fails: every ID the session can hold came
    /// from the validated graph.
    pub fn current_node(&self) -> &'g StoryNode {
        let graph: &'g StoryGraph = self.graph;
        &graph[&self.current]
    }

    pub fn history(&self) -> &[HistoryStep] {
        &self.history
    }

    /// Chapter number shown to the reader; the root is chapter 1.
    pub fn chapter(&self) -> usize {
        self.history.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// The current node has no choices; only restart (or back) is left.
    pub fn is_terminal(&self) -> bool {
        self.current_node().is_terminal()
    }

    /// Follow one of the current node's choices.
    ///
    /// An ID that is not among the current choices is ignored.
    pub fn select_choice(&mut self, choice_id: &ChoiceId) -> Transition {
        let Some(choice) = self.current_node().choice(choice_id) else {
            debug!(session = %self.id, node = %self.current, choice = %choice_id, "choice ignored");
            return Transition::Unchanged;
        };

        let from = std::mem::replace(&mut self.current, choice.next.clone());
        self.history.push(HistoryStep {
            id: choice.next.clone(),
            choice_label: Some(choice.text.clone()),
        });

        debug!(
            session = %self.id,
            from = %from,
            to = %self.current,
            choice = %choice_id,
            chapter = self.chapter(),
            "choice selected"
        );
        Transition::Advanced {
            from,
            to: self.current.clone(),
        }
    }

    /// Undo the most recent choice. No-op at the root step.
    pub fn go_back(&mut self) -> Transition {
        if !self.can_go_back() {
            return Transition::Unchanged;
        }

        self.history.pop();
        let to = self.history[self.history.len() - 1].id.clone();
        let from = std::mem::replace(&mut self.current, to);

        debug!(session = %self.id, from = %from, to = %self.current, "stepped back");
        Transition::SteppedBack {
            from,
            to: self.current.clone(),
        }
    }

    /// Return to the root with a fresh history.
    pub fn restart(&mut self) -> Transition {
        let root = self.graph.root().clone();
        let from = std::mem::replace(&mut self.current, root.clone());
        self.history.clear();
        self.history.push(HistoryStep::root(root));

        debug!(session = %self.id, from = %from, "session restarted");
        Transition::Restarted { from }
    }

    /// Dispatch a user action to the matching transition.
    pub fn apply(&mut self, action: &Action) -> Transition {
        match action {
            Action::Choose(choice_id) => self.select_choice(choice_id),
            Action::Back => self.go_back(),
            Action::Restart => self.restart(),
        }
    }
}
