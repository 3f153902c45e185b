mod memory;

pub use memory::{InMemoryActivityStore, StaticTreeSource};

use crate::models::{ActivityRecord, TopicNode};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Activity log collaborator contract.
///
/// Persistence and querying of learner activity live outside this crate; the
/// core only reads. Query results carry no ordering guarantee — recency and
/// completion ordering is applied by the signals layer.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn exercise_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>>;

    async fn video_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>>;

    async fn content_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>>;

    /// Exercise records of every learner sharing `user`'s group, the learner
    /// included.
    async fn group_exercise_logs(&self, user: Uuid) -> Result<Vec<ActivityRecord>>;

    /// Static prerequisite list of an exercise. Unknown ids resolve to an
    /// empty list, not an error.
    async fn prerequisites(&self, exercise_id: &str) -> Result<Vec<String>>;
}

/// Topic tree collaborator contract. Loading and parsing the source document
/// is the collaborator's concern; the core receives a ready node tree.
#[async_trait]
pub trait TopicTreeSource: Send + Sync {
    async fn load_tree(&self) -> Result<TopicNode>;
}
