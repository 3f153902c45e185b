use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Node kind in the subject hierarchy.
///
/// `Topic` and `Subtopic` are container kinds and carry `children`;
/// `Exercise`, `Video` and `Content` are leaf content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Topic,
    Subtopic,
    Exercise,
    Video,
    Content,
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Topic | NodeKind::Subtopic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Topic => "Topic",
            NodeKind::Subtopic => "Subtopic",
            NodeKind::Exercise => "Exercise",
            NodeKind::Video => "Video",
            NodeKind::Content => "Content",
        }
    }
}

/// A node of the collaborator-provided topic tree document.
///
/// `children` is present iff the node is a container (topic/subtopic); an
/// exercise may still carry a tolerated nested exercise level underneath it.
/// Kind/shape correspondence is checked during index construction, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNode {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TopicNode>>,
}

/// Ancestry of a leaf content node: the subtopic and topic it lives under.
///
/// Nested leaves (4th/5th level) are attributed to the nearest enclosing
/// subtopic/topic and inherit title/description from their level-3 ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseAncestry {
    pub subtopic_id: String,
    pub topic_id: String,
    pub subtopic_title: String,
    pub topic_title: String,
    pub kind: NodeKind,
    pub title: String,
    pub description: String,
}

/// Flat metadata projection of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub path: String,
    pub description: String,
    pub parent: Option<String>,
    /// Child ids, present only for container nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_ids: Option<Vec<String>>,
}

/// How an adjacency hop relates two subtopics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hop {
    /// Sibling subtopic within the same topic.
    Local,
    /// First/last subtopic of the adjacent topic, crossing a topic boundary.
    Boundary,
}

/// A directed neighbor pointer in the adjacency model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicRef {
    pub id: String,
    pub hop: Hop,
}

/// Left/right structural neighbors of a subtopic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    pub left: Option<SubtopicRef>,
    pub right: Option<SubtopicRef>,
}

/// Proximity tier of a ranked subtopic relative to the ranking's subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Reached without crossing a topic boundary (includes self).
    Near,
    /// Reached only after crossing into another topic.
    Far,
}

/// One entry of a subtopic's proximity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSubtopic {
    pub id: String,
    pub tier: Tier,
}

/// A learner's activity record, owned by the external log collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub user: Uuid,
    pub content_id: String,
    pub kind: NodeKind,
    pub complete: bool,
    /// Exercises only; always false for videos and other content.
    #[serde(default)]
    pub struggling: bool,
    pub latest_activity_timestamp: Option<DateTime<Utc>>,
    pub completion_timestamp: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    pub fn new(user: Uuid, content_id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            user,
            content_id: content_id.into(),
            kind,
            complete: false,
            struggling: false,
            latest_activity_timestamp: None,
            completion_timestamp: None,
        }
    }

    pub fn exercise(user: Uuid, content_id: impl Into<String>) -> Self {
        Self::new(user, content_id, NodeKind::Exercise)
    }

    pub fn video(user: Uuid, content_id: impl Into<String>) -> Self {
        Self::new(user, content_id, NodeKind::Video)
    }

    pub fn content(user: Uuid, content_id: impl Into<String>) -> Self {
        Self::new(user, content_id, NodeKind::Content)
    }

    pub fn touched_at(mut self, at: DateTime<Utc>) -> Self {
        self.latest_activity_timestamp = Some(at);
        self
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.complete = true;
        self.completion_timestamp = Some(at);
        self
    }

    pub fn struggling(mut self) -> Self {
        self.struggling = true;
        self
    }
}

/// One Resume/Next recommendation, enriched with display metadata.
///
/// `topic` carries the enclosing subtopic's node metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationItem {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub topic: NodeMetadata,
}

/// The subtopic surfaced by an Explore suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSuggestion {
    pub title: String,
    pub path: String,
    pub description: String,
}

/// The already-visited subtopic an Explore suggestion was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestTopic {
    pub title: String,
}

/// One Explore entry. Both fields absent is the "no candidate found for this
/// source subtopic" case and serializes to an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExploreRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_topic: Option<TopicSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_topic: Option<InterestTopic>,
}

impl ExploreRecommendation {
    pub fn is_empty(&self) -> bool {
        self.suggested_topic.is_none() && self.interest_topic.is_none()
    }
}
