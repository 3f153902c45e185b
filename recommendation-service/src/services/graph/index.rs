use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{ExerciseAncestry, NodeKind, NodeMetadata, TopicNode};

/// One topic with its ordered subtopic ids. Drives adjacency construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLane {
    pub id: String,
    pub subtopics: Vec<String>,
}

/// Read-only projection of a topic tree snapshot.
///
/// Flattens the hierarchy into the lookups the rest of the engine needs:
/// ordered topic lanes, leaf ancestry, per-node metadata, and per-subtopic
/// exercise lists. Built once per tree version; immutable afterwards.
#[derive(Debug, Clone)]
pub struct TopicTreeIndex {
    topics: Vec<TopicLane>,
    ancestry: HashMap<String, ExerciseAncestry>,
    nodes: HashMap<String, NodeMetadata>,
    subtopic_exercises: HashMap<String, Vec<String>>,
}

impl TopicTreeIndex {
    pub fn build(root: &TopicNode) -> Result<Self> {
        let mut index = TopicTreeIndex {
            topics: Vec::new(),
            ancestry: HashMap::new(),
            nodes: HashMap::new(),
            subtopic_exercises: HashMap::new(),
        };

        index.register_node(root);

        let topic_nodes = children_of(root, "root")?;
        for topic in topic_nodes {
            index.register_node(topic);
            let subtopic_nodes = children_of(topic, "topic")?;

            let mut lane = TopicLane {
                id: topic.id.clone(),
                subtopics: Vec::with_capacity(subtopic_nodes.len()),
            };

            for subtopic in subtopic_nodes {
                index.register_node(subtopic);
                let leaves = children_of(subtopic, "subtopic")?;

                lane.subtopics.push(subtopic.id.clone());
                index
                    .subtopic_exercises
                    .entry(subtopic.id.clone())
                    .or_default();

                for leaf in leaves {
                    index.collect_leaf(leaf, leaf, topic, subtopic);
                }
            }

            index.topics.push(lane);
        }

        Ok(index)
    }

    /// Registers a leaf and any tolerated nested levels underneath it.
    ///
    /// All descendants attribute to the same enclosing subtopic/topic and
    /// inherit title/description from the level-3 `origin` leaf.
    fn collect_leaf(
        &mut self,
        leaf: &TopicNode,
        origin: &TopicNode,
        topic: &TopicNode,
        subtopic: &TopicNode,
    ) {
        self.register_node(leaf);

        self.ancestry.insert(
            leaf.id.clone(),
            ExerciseAncestry {
                subtopic_id: subtopic.id.clone(),
                topic_id: topic.id.clone(),
                subtopic_title: subtopic.title.clone(),
                topic_title: topic.title.clone(),
                kind: leaf.kind,
                title: origin.title.clone(),
                description: origin.description.clone(),
            },
        );

        if leaf.kind == NodeKind::Exercise {
            self.subtopic_exercises
                .entry(subtopic.id.clone())
                .or_default()
                .push(leaf.id.clone());
        }

        if let Some(nested) = &leaf.children {
            for child in nested {
                self.collect_leaf(child, origin, topic, subtopic);
            }
        }
    }

    fn register_node(&mut self, node: &TopicNode) {
        self.nodes.insert(
            node.id.clone(),
            NodeMetadata {
                id: node.id.clone(),
                title: node.title.clone(),
                kind: node.kind,
                path: node.path.clone(),
                description: node.description.clone(),
                parent: node.parent.clone(),
                child_ids: node
                    .children
                    .as_ref()
                    .map(|children| children.iter().map(|c| c.id.clone()).collect()),
            },
        );
    }

    pub fn topics(&self) -> &[TopicLane] {
        &self.topics
    }

    pub fn subtopic_count(&self) -> usize {
        self.topics.iter().map(|lane| lane.subtopics.len()).sum()
    }

    pub fn ancestry(&self, content_id: &str) -> Option<&ExerciseAncestry> {
        self.ancestry.get(content_id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeMetadata> {
        self.nodes.get(id)
    }

    /// Exercise ids beneath a subtopic, in tree order. Empty for unknown ids.
    pub fn exercises_under(&self, subtopic_id: &str) -> &[String] {
        self.subtopic_exercises
            .get(subtopic_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn children_of<'a>(node: &'a TopicNode, level: &str) -> Result<&'a [TopicNode]> {
    node.children.as_deref().ok_or_else(|| {
        AppError::MalformedTree(format!("{} node '{}' has no children", level, node.id))
    })
}
