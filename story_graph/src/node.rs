//! Story nodes and the choices that leave them.

use serde::{Deserialize, Serialize};

use crate::{ChoiceId, NodeId};

/// Emotional colouring of a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hope,
    Wonder,
    Mystery,
    Danger,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Hope, Mood::Wonder, Mood::Mystery, Mood::Danger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Hope => "hope",
            Mood::Wonder => "wonder",
            Mood::Mystery => "mystery",
            Mood::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled edge from one node to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,

    /// Text shown to the reader, and recorded in the history trail once picked.
    pub text: String,

    pub mood: Mood,

    /// Node this choice leads to.
    pub next: NodeId,
}

impl Choice {
    pub fn new(
        id: impl Into<ChoiceId>,
        text: impl Into<String>,
        mood: Mood,
        next: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            mood,
            next: next.into(),
        }
    }
}

/// A single narrative beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: NodeId,
    pub title: String,
    pub scene: String,
    pub ambiance: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,

    /// Outgoing choices, in display order. Empty means the story ends here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl StoryNode {
    /// Create a node with no reflection and no choices.
    pub fn new(
        id: impl Into<NodeId>,
        title: impl Into<String>,
        scene: impl Into<String>,
        ambiance: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            scene: scene.into(),
            ambiance: ambiance.into(),
            reflection: None,
            choices: Vec::new(),
        }
    }

    /// Set the reflection text.
    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    /// Append a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Find one of this node's choices by ID.
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| &c.id == id)
    }

    /// A node without choices ends the story.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}
