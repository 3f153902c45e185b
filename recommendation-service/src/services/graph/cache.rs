use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::TopicGraph;
use crate::error::{AppError, Result};
use crate::store::TopicTreeSource;

/// Process-wide cache for the tree-derived structures.
///
/// Holds at most one published `TopicGraph` snapshot. `build` loads the tree
/// from the source collaborator, derives everything, and publishes; racing
/// builders are tolerated (the snapshot is idempotent, last write wins).
/// `invalidate` drops the snapshot so the next request rebuilds from a fresh
/// tree.
pub struct TopicGraphCache {
    source: Arc<dyn TopicTreeSource>,
    graph: RwLock<Option<Arc<TopicGraph>>>,
}

impl TopicGraphCache {
    pub fn new(source: Arc<dyn TopicTreeSource>) -> Self {
        Self {
            source,
            graph: RwLock::new(None),
        }
    }

    pub async fn build(&self) -> Result<Arc<TopicGraph>> {
        let root = self
            .source
            .load_tree()
            .await
            .map_err(|err| AppError::unavailable("topic tree source", err))?;

        let graph = Arc::new(TopicGraph::build(&root)?);
        *self.graph.write().await = Some(graph.clone());
        Ok(graph)
    }

    pub async fn get_or_build(&self) -> Result<Arc<TopicGraph>> {
        if let Some(graph) = self.graph.read().await.as_ref() {
            return Ok(graph.clone());
        }
        self.build().await
    }

    pub async fn invalidate(&self) {
        *self.graph.write().await = None;
        debug!("Topic graph cache invalidated");
    }
}
