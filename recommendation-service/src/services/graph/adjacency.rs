use std::collections::HashMap;

use super::index::TopicTreeIndex;
use crate::models::{AdjacencyEntry, Hop, SubtopicRef};

/// Computes each subtopic's left/right structural neighbors.
///
/// A sibling within the same topic is a `Local` hop. Where no sibling exists,
/// the neighbor is the last/first subtopic of the adjacent topic (`Boundary`
/// hop). Nothing lies beyond either end of the global topic sequence, and an
/// adjacent topic with no subtopics contributes no neighbor.
pub fn build_adjacency(index: &TopicTreeIndex) -> HashMap<String, AdjacencyEntry> {
    let topics = index.topics();
    let mut entries = HashMap::with_capacity(index.subtopic_count());

    for (t, lane) in topics.iter().enumerate() {
        for (s, subtopic_id) in lane.subtopics.iter().enumerate() {
            let left = if s > 0 {
                Some(SubtopicRef {
                    id: lane.subtopics[s - 1].clone(),
                    hop: Hop::Local,
                })
            } else if t > 0 {
                topics[t - 1].subtopics.last().map(|id| SubtopicRef {
                    id: id.clone(),
                    hop: Hop::Boundary,
                })
            } else {
                None
            };

            let right = if s + 1 < lane.subtopics.len() {
                Some(SubtopicRef {
                    id: lane.subtopics[s + 1].clone(),
                    hop: Hop::Local,
                })
            } else if t + 1 < topics.len() {
                topics[t + 1].subtopics.first().map(|id| SubtopicRef {
                    id: id.clone(),
                    hop: Hop::Boundary,
                })
            } else {
                None
            };

            entries.insert(subtopic_id.clone(), AdjacencyEntry { left, right });
        }
    }

    entries
}
