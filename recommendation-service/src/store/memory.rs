use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::{ActivityStore, TopicTreeSource};
use crate::models::{ActivityRecord, TopicNode};

/// Tree source backed by an already-materialized node tree. Reference
/// implementation for tests and embedders that load the document themselves.
pub struct StaticTreeSource {
    root: TopicNode,
}

impl StaticTreeSource {
    pub fn new(root: TopicNode) -> Self {
        Self { root }
    }
}

#[async_trait]
impl TopicTreeSource for StaticTreeSource {
    async fn load_tree(&self) -> Result<TopicNode> {
        Ok(self.root.clone())
    }
}

/// In-memory activity store. Records are returned in insertion order;
/// group membership is a flat user → group-name map, and users without a
/// group see only their own records in group queries.
#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    exercise: Vec<ActivityRecord>,
    video: Vec<ActivityRecord>,
    content: Vec<ActivityRecord>,
    groups: HashMap<Uuid, String>,
    prerequisites: HashMap<String, Vec<String>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_exercise(&mut self, record: ActivityRecord) {
        self.exercise.push(record);
    }

    pub fn push_video(&mut self, record: ActivityRecord) {
        self.video.push(record);
    }

    pub fn push_content(&mut self, record: ActivityRecord) {
        self.content.push(record);
    }

    pub fn set_group(&mut self, user: Uuid, group: impl Into<String>) {
        self.groups.insert(user, group.into());
    }

    pub fn set_prerequisites(&mut self, exercise_id: impl Into<String>, prereqs: Vec<String>) {
        self.prerequisites.insert(exercise_id.into(), prereqs);
    }

    fn by_user(records: &[ActivityRecord], user: Uuid) -> Vec<ActivityRecord> {
        records.iter().filter(|r| r.user == user).cloned().collect()
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn exercise_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>> {
        Ok(Self::by_user(&self.exercise, user))
    }

    async fn video_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>> {
        Ok(Self::by_user(&self.video, user))
    }

    async fn content_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>> {
        Ok(Self::by_user(&self.content, user))
    }

    async fn group_exercise_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>> {
        let records = match self.groups.get(&user) {
            Some(group) => self
                .exercise
                .iter()
                .filter(|r| self.groups.get(&r.user) == Some(group))
                .cloned()
                .collect(),
            None => Self::by_user(&self.exercise, user),
        };
        Ok(records)
    }

    async fn prerequisites(&self, exercise_id: &str) -> Result<Vec<String>> {
        Ok(self
            .prerequisites
            .get(exercise_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    #[test]
    fn group_query_spans_members_and_includes_the_learner() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let outsider = Uuid::new_v4();

        let mut store = InMemoryActivityStore::new();
        store.set_group(a, "g1");
        store.set_group(b, "g1");
        store.set_group(outsider, "g2");
        store.push_exercise(ActivityRecord::exercise(a, "ex-a"));
        store.push_exercise(ActivityRecord::exercise(b, "ex-b"));
        store.push_exercise(ActivityRecord::exercise(outsider, "ex-c"));

        let records = tokio_test::block_on(store.group_exercise_logs(a)).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.content_id.as_str()).collect();
        assert_eq!(ids, vec!["ex-a", "ex-b"]);
    }

    #[test]
    fn ungrouped_user_sees_only_own_records() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let mut store = InMemoryActivityStore::new();
        store.push_exercise(ActivityRecord::exercise(a, "ex-a"));
        store.push_exercise(ActivityRecord::new(b, "ex-b", NodeKind::Exercise));

        let records = tokio_test::block_on(store.group_exercise_logs(a)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content_id, "ex-a");
    }

    #[test]
    fn unknown_prerequisites_resolve_empty() {
        let store = InMemoryActivityStore::new();
        let prereqs = tokio_test::block_on(store.prerequisites("nope")).unwrap();
        assert!(prereqs.is_empty());
    }
}
