//! Story Graph - the fixed, validated mapping from node ID to node content.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

use crate::{GraphError, NodeId, StoryNode};

/// Heading text a story file may carry. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Short introduction shown before the first scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
}

/// A closed, read-only story graph.
///
/// Construction checks that the graph is non-empty, that the root exists and
/// that every choice points at a defined node. After that, looking up any
/// node reachable through choices cannot fail.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    root: NodeId,

    nodes: HashMap<NodeId, StoryNode>,

    /// Node IDs in authoring order, for stable listings and export.
    order: Vec<NodeId>,

    meta: StoryMeta,
}

impl StoryGraph {
    /// Build a graph and validate it.
    pub fn new(
        root: impl Into<NodeId>,
        nodes: impl IntoIterator<Item = StoryNode>,
    ) -> Result<Self, GraphError> {
        let root = root.into();
        let mut map = HashMap::new();
        let mut order = Vec::new();

        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
            order.push(id);
        }

        let graph = Self {
            root,
            nodes: map,
            order,
            meta: StoryMeta::default(),
        };
        graph.validate()?;

        debug!(
            root = %graph.root,
            nodes = graph.len(),
            "story graph built"
        );
        Ok(graph)
    }

    /// Attach heading text.
    pub fn with_meta(mut self, meta: StoryMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn meta(&self) -> &StoryMeta {
        &self.meta
    }

    fn validate(&self) -> Result<(), GraphError> {
        if self.is_empty() {
            return Err(GraphError::Empty);
        }
        if !self.nodes.contains_key(&self.root) {
            return Err(GraphError::MissingRoot(self.root.clone()));
        }

        for id in &self.order {
            let node = &self.nodes[id];
            let mut seen = HashSet::new();
            for choice in &node.choices {
                if !seen.insert(&choice.id) {
                    return Err(GraphError::DuplicateChoice {
                        node: id.clone(),
                        choice: choice.id.clone(),
                    });
                }
                if !self.nodes.contains_key(&choice.next) {
                    return Err(GraphError::DanglingChoice {
                        node: id.clone(),
                        choice: choice.id.clone(),
                        target: choice.next.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// ID of the node every session starts at.
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    pub fn root_node(&self) -> &StoryNode {
        &self.nodes[&self.root]
    }

    /// Get node by ID.
    pub fn get(&self, id: &NodeId) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in authoring order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.order.iter().map(|id| &self.nodes[id])
    }

    /// Nodes without outgoing choices, in authoring order.
    pub fn terminal_nodes(&self) -> Vec<&StoryNode> {
        self.nodes().filter(|n| n.is_terminal()).collect()
    }

    /// Breadth-first set of nodes reachable from the root.
    pub fn reachable_from_root(&self) -> HashSet<&NodeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(&self.root);
        queue.push_back(&self.root);

        while let Some(id) = queue.pop_front() {
            for choice in &self.nodes[id].choices {
                if visited.insert(&choice.next) {
                    queue.push_back(&choice.next);
                }
            }
        }

        visited
    }

    /// Collect non-fatal findings about the graph's shape.
    pub fn report(&self) -> ValidationReport {
        let reachable = self.reachable_from_root();

        let unreachable: Vec<NodeId> = self
            .order
            .iter()
            .filter(|id| !reachable.contains(id))
            .cloned()
            .collect();

        for id in &unreachable {
            warn!(node = %id, "story node is unreachable from root");
        }

        ValidationReport {
            root: self.root.clone(),
            node_count: self.len(),
            choice_count: self.nodes().map(|n| n.choices.len()).sum(),
            terminal: self.terminal_nodes().iter().map(|n| n.id.clone()).collect(),
            unreachable,
        }
    }
}

impl std::ops::Index<&NodeId> for StoryGraph {
    type Output = StoryNode;

    /// Panics on an unknown ID. Every ID handed out by the graph itself
    /// (root and choice targets) is known.
    fn index(&self, id: &NodeId) -> &StoryNode {
        &self.nodes[id]
    }
}

/// Summary of a loaded graph, for authoring tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub root: NodeId,
    pub node_count: usize,
    pub choice_count: usize,

    /// Nodes where the story ends.
    pub terminal: Vec<NodeId>,

    /// Nodes no sequence of choices can reach.
    pub unreachable: Vec<NodeId>,
}

impl ValidationReport {
    /// True when every node can be reached and at least one ending exists.
    pub fn is_clean(&self) -> bool {
        self.unreachable.is_empty() && !self.terminal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Choice, ChoiceId, Mood};

    fn three_node_graph() -> StoryGraph {
        StoryGraph::new(
            "a",
            vec![
                StoryNode::new("a", "A", "scene a", "ambiance a")
                    .with_choice(Choice::new("to-b", "Go to B", Mood::Hope, "b"))
                    .with_choice(Choice::new("to-c", "Go to C", Mood::Danger, "c")),
                StoryNode::new("b", "B", "scene b", "ambiance b")
                    .with_choice(Choice::new("to-c", "Go to C", Mood::Wonder, "c")),
                StoryNode::new("c", "C", "scene c", "ambiance c"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_and_lookup() {
        let graph = three_node_graph();

        assert_eq!(graph.root(), &NodeId::new("a"));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.root_node().title, "A");
        assert_eq!(graph[&NodeId::new("b")].title, "B");
        assert!(graph.get(&NodeId::new("z")).is_none());
    }

    #[test]
    fn test_meta_defaults_to_empty() {
        let graph = three_node_graph();
        assert_eq!(graph.meta(), &StoryMeta::default());

        let graph = graph.with_meta(StoryMeta {
            title: Some("Three Rooms".to_string()),
            ..Default::default()
        });
        assert_eq!(graph.meta().title.as_deref(), Some("Three Rooms"));
        assert!(graph.meta().subtitle.is_none());
    }

    #[test]
    fn test_nodes_keep_authoring_order() {
        let graph = three_node_graph();
        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_graph_rejected() {
        let result = StoryGraph::new("a", Vec::new());
        assert!(matches!(result, Err(GraphError::Empty)));
    }

    #[test]
    fn test_missing_root_rejected() {
        let result = StoryGraph::new("start", vec![StoryNode::new("a", "A", "", "")]);
        assert!(matches!(result, Err(GraphError::MissingRoot(id)) if id.as_str() == "start"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = StoryGraph::new(
            "a",
            vec![StoryNode::new("a", "A", "", ""), StoryNode::new("a", "A again", "", "")],
        );
        assert!(matches!(result, Err(GraphError::DuplicateNode(_))));
    }

    #[test]
    fn test_duplicate_choice_rejected() {
        let result = StoryGraph::new(
            "a",
            vec![
                StoryNode::new("a", "A", "", "")
                    .with_choice(Choice::new("x", "One", Mood::Hope, "b"))
                    .with_choice(Choice::new("x", "Two", Mood::Hope, "b")),
                StoryNode::new("b", "B", "", ""),
            ],
        );
        assert!(matches!(
            result,
            Err(GraphError::DuplicateChoice { choice, .. }) if choice == ChoiceId::new("x")
        ));
    }

    #[test]
    fn test_dangling_choice_rejected() {
        let result = StoryGraph::new(
            "a",
            vec![StoryNode::new("a", "A", "", "")
                .with_choice(Choice::new("go", "Go", Mood::Mystery, "nowhere"))],
        );

        match result {
            Err(GraphError::DanglingChoice { node, choice, target }) => {
                assert_eq!(node.as_str(), "a");
                assert_eq!(choice.as_str(), "go");
                assert_eq!(target.as_str(), "nowhere");
            }
            other => panic!("expected dangling choice error, got {:?}", other),
        }
    }

    #[test]
    fn test_same_choice_id_allowed_in_different_nodes() {
        let graph = three_node_graph();
        let a_choice = graph.root_node().choice(&ChoiceId::new("to-c")).unwrap();
        let b_choice = graph[&NodeId::new("b")].choice(&ChoiceId::new("to-c")).unwrap();
        assert_eq!(a_choice.next, b_choice.next);
    }

    #[test]
    fn test_report_finds_unreachable_and_terminal() {
        let graph = StoryGraph::new(
            "a",
            vec![
                StoryNode::new("a", "A", "", "")
                    .with_choice(Choice::new("go", "Go", Mood::Hope, "b")),
                StoryNode::new("b", "B", "", ""),
                StoryNode::new("orphan", "Orphan", "", "")
                    .with_choice(Choice::new("back", "Back", Mood::Hope, "a")),
            ],
        )
        .unwrap();

        let report = graph.report();
        assert_eq!(report.node_count, 3);
        assert_eq!(report.choice_count, 2);
        assert_eq!(report.terminal, vec![NodeId::new("b")]);
        assert_eq!(report.unreachable, vec![NodeId::new("orphan")]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_report_clean_graph() {
        let report = three_node_graph().report();
        assert!(report.unreachable.is_empty());
        assert!(report.is_clean());
    }
}
