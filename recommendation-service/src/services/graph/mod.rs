pub mod adjacency;
pub mod cache;
pub mod candidates;
pub mod expander;
pub mod index;

pub use cache::TopicGraphCache;
pub use index::TopicTreeIndex;

use std::collections::HashMap;

use tracing::info;

use crate::error::Result;
use crate::models::{AdjacencyEntry, RankedSubtopic, TopicNode};

/// All tree-derived structures for one topic tree snapshot: the flattened
/// index, the adjacency model, the per-subtopic proximity rankings, and the
/// candidate exercise lists. Read-only after construction; share via `Arc`.
#[derive(Debug, Clone)]
pub struct TopicGraph {
    index: TopicTreeIndex,
    adjacency: HashMap<String, AdjacencyEntry>,
    rankings: HashMap<String, Vec<RankedSubtopic>>,
    candidates: HashMap<String, Vec<String>>,
}

impl TopicGraph {
    pub fn build(root: &TopicNode) -> Result<Self> {
        let index = TopicTreeIndex::build(root)?;
        let adjacency = adjacency::build_adjacency(&index);
        let rankings = expander::expand_rankings(&index, &adjacency);
        let candidates = candidates::build_candidate_tree(&index, &rankings);

        info!(
            "Topic graph built: {} topics, {} subtopics, {} candidate lists",
            index.topics().len(),
            index.subtopic_count(),
            candidates.len()
        );

        Ok(Self {
            index,
            adjacency,
            rankings,
            candidates,
        })
    }

    pub fn index(&self) -> &TopicTreeIndex {
        &self.index
    }

    pub fn adjacency(&self, subtopic_id: &str) -> Option<&AdjacencyEntry> {
        self.adjacency.get(subtopic_id)
    }

    pub fn ranking(&self, subtopic_id: &str) -> Option<&[RankedSubtopic]> {
        self.rankings.get(subtopic_id).map(Vec::as_slice)
    }

    /// Candidate exercises for a subtopic. Empty for unknown ids.
    pub fn recommended_exercises(&self, subtopic_id: &str) -> &[String] {
        self.candidates
            .get(subtopic_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ordered exercises of an explicit related-subtopic selection.
    pub fn exercises_for<'a>(&self, subtopics: impl Iterator<Item = &'a str>) -> Vec<String> {
        candidates::exercises_for(&self.index, subtopics)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{NodeKind, TopicNode};

    pub fn tree(topics: Vec<TopicNode>) -> TopicNode {
        node("root", NodeKind::Topic, Some(topics))
    }

    pub fn topic(id: &str, subtopics: Vec<TopicNode>) -> TopicNode {
        node(id, NodeKind::Topic, Some(subtopics))
    }

    pub fn subtopic(id: &str, leaves: Vec<TopicNode>) -> TopicNode {
        node(id, NodeKind::Subtopic, Some(leaves))
    }

    pub fn exercise(id: &str) -> TopicNode {
        node(id, NodeKind::Exercise, None)
    }

    pub fn video(id: &str) -> TopicNode {
        node(id, NodeKind::Video, None)
    }

    fn node(id: &str, kind: NodeKind, children: Option<Vec<TopicNode>>) -> TopicNode {
        TopicNode {
            id: id.to_string(),
            title: id.to_string(),
            kind,
            path: format!("/{}/", id),
            description: format!("about {}", id),
            parent: None,
            children,
        }
    }
}
