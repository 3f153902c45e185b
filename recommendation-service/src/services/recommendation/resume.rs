use tracing::debug;
use uuid::Uuid;

use super::RecommendationService;
use crate::error::Result;
use crate::models::RecommendationItem;

impl RecommendationService {
    /// Picks up where the learner left off: the single most-recently-active
    /// started-but-incomplete item across exercise, video and content logs.
    /// Returns zero or one item; no ranking beyond "most recent wins".
    pub async fn resume(&self, user: Uuid) -> Result<Vec<RecommendationItem>> {
        let graph = self.graph.get_or_build().await?;

        let items: Vec<RecommendationItem> = self
            .signals
            .most_recent_incomplete(user)
            .await?
            .and_then(|record| Self::resolve_item(&graph, &record.content_id))
            .into_iter()
            .collect();

        debug!("Resume recommendations for user {}: {}", user, items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service;
    use crate::models::{ActivityRecord, NodeKind};
    use crate::services::graph::test_support::{exercise, subtopic, topic, tree, video};
    use crate::store::InMemoryActivityStore;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn at(minutes: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn fixture() -> crate::models::TopicNode {
        tree(vec![topic(
            "math",
            vec![subtopic(
                "early-math",
                vec![exercise("counting"), video("counting-intro")],
            )],
        )])
    }

    #[tokio::test]
    async fn returns_the_most_recent_incomplete_item_with_metadata() {
        let user = Uuid::new_v4();
        let mut store = InMemoryActivityStore::new();
        store.push_exercise(ActivityRecord::exercise(user, "counting").touched_at(at(1)));
        store.push_video(ActivityRecord::video(user, "counting-intro").touched_at(at(5)));

        let items = service(fixture(), store).resume(user).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "counting-intro");
        assert_eq!(items[0].kind, NodeKind::Video);
        assert_eq!(items[0].topic.id, "early-math");
    }

    #[tokio::test]
    async fn no_activity_yields_empty() {
        let items = service(fixture(), InMemoryActivityStore::new())
            .resume(Uuid::new_v4())
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_record_is_skipped() {
        let user = Uuid::new_v4();
        let mut store = InMemoryActivityStore::new();
        store.push_exercise(ActivityRecord::exercise(user, "stale-id").touched_at(at(1)));

        let items = service(fixture(), store).resume(user).await.unwrap();
        assert!(items.is_empty());
    }
}
