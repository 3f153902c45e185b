use std::collections::HashMap;

use super::index::TopicTreeIndex;
use crate::models::RankedSubtopic;

/// Maps every subtopic to its content-similarity candidate list: the
/// concatenation, in proximity-ranking order, of each related subtopic's
/// exercises. Related subtopics with no exercises contribute nothing. No
/// global de-duplication — filtering against a learner's history is the
/// strategies' responsibility.
pub fn build_candidate_tree(
    index: &TopicTreeIndex,
    rankings: &HashMap<String, Vec<RankedSubtopic>>,
) -> HashMap<String, Vec<String>> {
    rankings
        .iter()
        .map(|(subtopic_id, ranking)| {
            (
                subtopic_id.clone(),
                exercises_for(index, ranking.iter().map(|r| r.id.as_str())),
            )
        })
        .collect()
}

/// Ordered concatenation of the exercises under each given subtopic.
pub fn exercises_for<'a>(
    index: &TopicTreeIndex,
    subtopics: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let mut exercises = Vec::new();
    for subtopic_id in subtopics {
        exercises.extend_from_slice(index.exercises_under(subtopic_id));
    }
    exercises
}
