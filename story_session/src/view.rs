//! View model - a serializable snapshot of what the reader should see.
//!
//! The session owns state; a rendering surface only ever sees a
//! [`SessionView`]. The terminal renderer consumes it directly, and the
//! `--json` mode hands it to other front ends as-is.

use serde::Serialize;
use story_graph::{ChoiceId, Mood, NodeId};

use crate::session::{Session, SessionId};

/// Everything needed to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session: SessionId,
    pub chapter: usize,
    pub node: NodeView,
    pub choices: Vec<ChoiceView>,
    pub can_go_back: bool,
    pub is_terminal: bool,
    pub trail: Vec<TrailEntry>,
}

/// Text content of the node on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub title: String,
    pub scene: String,
    pub ambiance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// 1-based position, for front ends that pick by number.
    pub number: usize,
    pub id: ChoiceId,
    pub text: String,
    pub mood: Mood,
}

/// One visited step, joined with its node's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailEntry {
    /// 1-based moment number.
    pub moment: usize,
    pub id: NodeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<String>,
}

impl SessionView {
    /// Snapshot a session.
    pub fn of(session: &Session<'_>) -> Self {
        let node = session.current_node();

        let choices = node
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| ChoiceView {
                number: i + 1,
                id: c.id.clone(),
                text: c.text.clone(),
                mood: c.mood,
            })
            .collect();

        Self {
            session: session.id(),
            chapter: session.chapter(),
            node: NodeView {
                id: node.id.clone(),
                title: node.title.clone(),
                scene: node.scene.clone(),
                ambiance: node.ambiance.clone(),
                reflection: node.reflection.clone(),
            },
            choices,
            can_go_back: session.can_go_back(),
            is_terminal: session.is_terminal(),
            trail: trail(session),
        }
    }

    /// Choice by its 1-based number.
    pub fn choice_by_number(&self, number: usize) -> Option<&ChoiceView> {
        number.checked_sub(1).and_then(|i| self.choices.get(i))
    }
}

/// The visited path with node titles, oldest first.
pub fn trail(session: &Session<'_>) -> Vec<TrailEntry> {
    let graph = session.graph();
    session
        .history()
        .iter()
        .enumerate()
        .map(|(i, step)| TrailEntry {
            moment: i + 1,
            id: step.id.clone(),
            title: graph[&step.id].title.clone(),
            choice_label: step.choice_label.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::{Choice, StoryGraph, StoryNode};

    fn graph() -> StoryGraph {
        StoryGraph::new(
            "well",
            vec![
                StoryNode::new("well", "The Well", "A dry well.", "Dust.")
                    .with_choice(Choice::new("down", "Climb down", Mood::Danger, "bottom"))
                    .with_choice(Choice::new("peer", "Peer in", Mood::Mystery, "bottom")),
                StoryNode::new("bottom", "The Bottom", "Cool stone.", "Echoes.")
                    .with_reflection("Depth is a kind of quiet."),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_view_at_root() {
        let graph = graph();
        let session = Session::new(&graph);
        let view = SessionView::of(&session);

        assert_eq!(view.chapter, 1);
        assert_eq!(view.node.title, "The Well");
        assert!(view.node.reflection.is_none());
        assert_eq!(view.choices.len(), 2);
        assert_eq!(view.choices[1].number, 2);
        assert_eq!(view.choices[1].mood, Mood::Mystery);
        assert!(!view.can_go_back);
        assert!(!view.is_terminal);
        assert_eq!(view.trail.len(), 1);
        assert!(view.trail[0].choice_label.is_none());
    }

    #[test]
    fn test_view_after_choice() {
        let graph = graph();
        let mut session = Session::new(&graph);
        session.select_choice(&ChoiceId::new("peer"));
        let view = SessionView::of(&session);

        assert_eq!(view.chapter, 2);
        assert!(view.is_terminal);
        assert!(view.can_go_back);
        assert!(view.choices.is_empty());
        assert_eq!(view.node.reflection.as_deref(), Some("Depth is a kind of quiet."));

        let last = &view.trail[1];
        assert_eq!(last.moment, 2);
        assert_eq!(last.title, "The Bottom");
        assert_eq!(last.choice_label.as_deref(), Some("Peer in"));
    }

    #[test]
    fn test_choice_by_number() {
        let graph = graph();
        let session = Session::new(&graph);
        let view = SessionView::of(&session);

        assert_eq!(view.choice_by_number(1).unwrap().id.as_str(), "down");
        assert!(view.choice_by_number(0).is_none());
        assert!(view.choice_by_number(3).is_none());
    }

    #[test]
    fn test_view_json_omits_absent_fields() {
        let graph = graph();
        let session = Session::new(&graph);
        let json = serde_json::to_value(SessionView::of(&session)).unwrap();

        assert!(json["node"].get("reflection").is_none());
        assert!(json["trail"][0].get("choice_label").is_none());
        assert_eq!(json["choices"][0]["mood"], "danger");
    }
}
