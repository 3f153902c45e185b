mod explore;
mod next;
mod resume;

use std::sync::Arc;

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::models::RecommendationItem;
use crate::services::graph::{TopicGraph, TopicGraphCache};
use crate::services::signals::ActivitySignals;
use crate::store::ActivityStore;

/// The three public recommendation strategies — Resume, Next, Explore — plus
/// direct access to a subtopic's candidate exercises.
///
/// Tree-derived structures come from the shared graph cache; activity
/// aggregates are computed fresh per call. Nothing is persisted here.
pub struct RecommendationService {
    graph: Arc<TopicGraphCache>,
    signals: ActivitySignals,
    config: RecommendationConfig,
}

impl RecommendationService {
    pub fn new(
        graph: Arc<TopicGraphCache>,
        store: Arc<dyn ActivityStore>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            graph,
            signals: ActivitySignals::new(store),
            config,
        }
    }

    /// Candidate exercise ids for a subtopic, in proximity-ranking order.
    /// A missing or unknown id yields an empty list, never an error.
    pub async fn recommended_exercises(&self, subtopic_id: Option<&str>) -> Result<Vec<String>> {
        let subtopic_id = match subtopic_id {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(Vec::new()),
        };
        let graph = self.graph.get_or_build().await?;
        Ok(graph.recommended_exercises(subtopic_id).to_vec())
    }

    /// Resolves a content id to a displayable item via the ancestry index.
    /// Unknown ids resolve to `None` and are skipped by the strategies.
    fn resolve_item(graph: &TopicGraph, content_id: &str) -> Option<RecommendationItem> {
        let ancestry = graph.index().ancestry(content_id)?;
        let topic = graph.index().node(&ancestry.subtopic_id)?.clone();
        Some(RecommendationItem {
            id: content_id.to_string(),
            title: ancestry.title.clone(),
            kind: ancestry.kind,
            topic,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::service;
    use crate::services::graph::test_support::{exercise, subtopic, topic, tree};
    use crate::store::InMemoryActivityStore;

    #[tokio::test]
    async fn recommended_exercises_for_missing_or_unknown_ids_are_empty() {
        let root = tree(vec![topic("t1", vec![subtopic("a", vec![exercise("a1")])])]);
        let service = service(root, InMemoryActivityStore::new());

        assert!(service.recommended_exercises(None).await.unwrap().is_empty());
        assert!(service
            .recommended_exercises(Some(""))
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .recommended_exercises(Some("unknown-id"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn recommended_exercises_follow_the_candidate_tree() {
        let root = tree(vec![
            topic("t1", vec![subtopic("a", vec![exercise("a1")])]),
            topic("t2", vec![subtopic("b", vec![exercise("b1")])]),
        ]);
        let service = service(root, InMemoryActivityStore::new());

        assert_eq!(
            service.recommended_exercises(Some("a")).await.unwrap(),
            vec!["a1", "b1"]
        );
    }
}
