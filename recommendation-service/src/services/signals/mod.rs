use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::ActivityRecord;
use crate::store::ActivityStore;

/// Per-learner aggregates over the external activity log collaborator.
///
/// Everything here is computed fresh per call from whatever the store returns;
/// nothing is cached. Store failures surface as `DataUnavailable`.
pub struct ActivitySignals {
    store: Arc<dyn ActivityStore>,
}

impl ActivitySignals {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// The most-recently-active record, across all three log kinds, that was
    /// started but not completed. A record with no activity timestamp counts
    /// as minimally recent.
    pub async fn most_recent_incomplete(&self, user: Uuid) -> Result<Option<ActivityRecord>> {
        let mut records = self
            .store
            .exercise_logs(user)
            .await
            .map_err(|e| AppError::unavailable("exercise logs", e))?;
        records.extend(
            self.store
                .video_logs(user)
                .await
                .map_err(|e| AppError::unavailable("video logs", e))?,
        );
        records.extend(
            self.store
                .content_logs(user)
                .await
                .map_err(|e| AppError::unavailable("content logs", e))?,
        );

        Ok(records
            .into_iter()
            .filter(|r| !r.complete)
            .max_by_key(|r| r.latest_activity_timestamp))
    }

    /// All exercise ids the learner has touched, most-recent-first.
    pub async fn recent_exercises(&self, user: Uuid) -> Result<Vec<String>> {
        let mut logs = self
            .store
            .exercise_logs(user)
            .await
            .map_err(|e| AppError::unavailable("exercise logs", e))?;
        logs.sort_by_key(|r| Reverse(r.latest_activity_timestamp));
        Ok(logs.into_iter().map(|r| r.content_id).collect())
    }

    /// Exercises flagged struggling, most recently completed first.
    pub async fn struggling_exercises(&self, user: Uuid) -> Result<Vec<String>> {
        let mut logs = self
            .store
            .exercise_logs(user)
            .await
            .map_err(|e| AppError::unavailable("exercise logs", e))?;
        logs.sort_by_key(|r| Reverse(r.completion_timestamp));
        Ok(logs
            .into_iter()
            .filter(|r| r.struggling)
            .map(|r| r.content_id)
            .collect())
    }

    /// The struggling list mapped through each exercise's prerequisites,
    /// flattened in order. Duplicates are kept; unknown exercises contribute
    /// nothing.
    pub async fn struggling_prerequisites(&self, user: Uuid) -> Result<Vec<String>> {
        let struggling = self.struggling_exercises(user).await?;
        let mut prerequisites = Vec::new();
        for exercise_id in &struggling {
            let mut prereqs = self
                .store
                .prerequisites(exercise_id)
                .await
                .map_err(|e| AppError::unavailable("exercise prerequisites", e))?;
            prerequisites.append(&mut prereqs);
        }
        Ok(prerequisites)
    }

    /// Peer next-exercise frequency table for the learner's group, sorted by
    /// ascending count.
    ///
    /// With a non-empty `recent` history: for every peer, logs are ordered
    /// incomplete-first then by completion recency, and each log whose
    /// exercise appears in `recent` credits the exercise immediately preceding
    /// it in that peer's sequence. With no history, the raw per-exercise
    /// record frequency across the whole group is used instead.
    pub async fn group_frequencies(
        &self,
        user: Uuid,
        recent: &[String],
    ) -> Result<Vec<(String, u32)>> {
        let group_logs = self
            .store
            .group_exercise_logs(user)
            .await
            .map_err(|e| AppError::unavailable("group exercise logs", e))?;

        let mut counts = FrequencyTable::default();

        if recent.is_empty() {
            for record in &group_logs {
                counts.bump(&record.content_id);
            }
        } else {
            let recent_set: HashSet<&str> = recent.iter().map(String::as_str).collect();

            let mut peer_order: Vec<Uuid> = Vec::new();
            let mut per_peer: HashMap<Uuid, Vec<ActivityRecord>> = HashMap::new();
            for record in group_logs {
                if !per_peer.contains_key(&record.user) {
                    peer_order.push(record.user);
                }
                per_peer.entry(record.user).or_default().push(record);
            }

            for peer in peer_order {
                let Some(mut logs) = per_peer.remove(&peer) else {
                    continue;
                };
                logs.sort_by_key(|r| {
                    (r.completion_timestamp.is_some(), Reverse(r.completion_timestamp))
                });

                for i in 1..logs.len() {
                    if recent_set.contains(logs[i].content_id.as_str()) {
                        counts.bump(&logs[i - 1].content_id);
                    }
                }
            }
        }

        let mut pairs = counts.into_pairs();
        // ascending; the lowest-count exercise leads the truncated slice
        pairs.sort_by_key(|(_, count)| *count);
        Ok(pairs)
    }
}

/// Insertion-ordered frequency counter, so equal counts keep a deterministic
/// first-seen order through the stable sort above.
#[derive(Default)]
struct FrequencyTable {
    order: Vec<(String, u32)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    fn bump(&mut self, id: &str) {
        match self.positions.get(id) {
            Some(&at) => self.order[at].1 += 1,
            None => {
                self.positions.insert(id.to_string(), self.order.len());
                self.order.push((id.to_string(), 1));
            }
        }
    }

    fn into_pairs(self) -> Vec<(String, u32)> {
        self.order
    }
}
