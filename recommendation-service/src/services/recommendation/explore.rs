use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use super::RecommendationService;
use crate::error::Result;
use crate::models::{ExploreRecommendation, InterestTopic, TopicSuggestion};
use crate::services::graph::TopicGraph;

impl RecommendationService {
    /// Surfaces topically-adjacent but unvisited material.
    ///
    /// Draws up to three distinct exercises from the learner's recent history,
    /// and for each one's subtopic scans the proximity-ranking window past the
    /// immediate neighborhood for the first subtopic the learner has not
    /// visited. Each source subtopic yields at most one entry; an entry with
    /// no viable candidate is emitted empty.
    pub async fn explore(&self, user: Uuid) -> Result<Vec<ExploreRecommendation>> {
        let graph = self.graph.get_or_build().await?;
        let recent = self.signals.recent_exercises(user).await?;

        let entries = self.explore_from(&graph, &recent, &mut rand::thread_rng());
        debug!("Explore recommendations for user {}: {}", user, entries.len());
        Ok(entries)
    }

    /// `explore` with an injected RNG, for deterministic sampling.
    pub async fn explore_with_rng<R: Rng + ?Sized>(
        &self,
        user: Uuid,
        rng: &mut R,
    ) -> Result<Vec<ExploreRecommendation>> {
        let graph = self.graph.get_or_build().await?;
        let recent = self.signals.recent_exercises(user).await?;

        let entries = self.explore_from(&graph, &recent, rng);
        debug!("Explore recommendations for user {}: {}", user, entries.len());
        Ok(entries)
    }

    /// The sampling and window scan, pure over the supplied graph snapshot
    /// and history.
    fn explore_from<R: Rng + ?Sized>(
        &self,
        graph: &TopicGraph,
        recent: &[String],
        rng: &mut R,
    ) -> Vec<ExploreRecommendation> {
        let visited: HashSet<&str> = recent
            .iter()
            .filter_map(|exercise_id| graph.index().ancestry(exercise_id))
            .map(|ancestry| ancestry.subtopic_id.as_str())
            .collect();

        // sample sizes 0, 1 and 3 only; two recent exercises still draw one
        let sample_size = match recent.len() {
            0 => 0,
            1 | 2 => 1,
            _ => 3,
        };
        let sampled: Vec<&String> = recent.choose_multiple(rng, sample_size).collect();

        let mut produced: HashSet<&str> = HashSet::new();
        let mut entries = Vec::new();

        for exercise_id in sampled {
            let Some(ancestry) = graph.index().ancestry(exercise_id) else {
                continue;
            };
            if !produced.insert(ancestry.subtopic_id.as_str()) {
                continue;
            }

            let window = graph
                .ranking(&ancestry.subtopic_id)
                .map(|ranking| {
                    let lo = self.config.explore_window_start.min(ranking.len());
                    let hi = self.config.explore_window_end.min(ranking.len());
                    &ranking[lo..hi]
                })
                .unwrap_or_default();

            let suggestion = window
                .iter()
                .filter_map(|ranked| graph.index().node(&ranked.id))
                .find(|candidate| !visited.contains(candidate.id.as_str()))
                .map(|candidate| TopicSuggestion {
                    title: candidate.title.clone(),
                    path: candidate.path.clone(),
                    description: candidate.description.clone(),
                });

            let entry = match suggestion {
                Some(suggested_topic) => ExploreRecommendation {
                    suggested_topic: Some(suggested_topic),
                    interest_topic: Some(InterestTopic {
                        title: ancestry.subtopic_title.clone(),
                    }),
                },
                None => ExploreRecommendation::default(),
            };
            entries.push(entry);
        }

        entries
    }
}
