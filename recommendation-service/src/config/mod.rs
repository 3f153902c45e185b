use serde::Deserialize;
use std::env;

/// Tunables for the recommendation strategies.
///
/// Defaults match the documented merge caps: two group-based slots, two
/// struggling-based slots, one topic-based slot, top-3 related subtopics for
/// Next, and the `[2, 7)` ranking window for Explore.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    pub group_slots: usize,
    pub struggling_slots: usize,
    pub topic_slots: usize,
    pub related_subtopic_count: usize,
    pub explore_window_start: usize,
    pub explore_window_end: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            group_slots: 2,
            struggling_slots: 2,
            topic_slots: 1,
            related_subtopic_count: 3,
            explore_window_start: 2,
            explore_window_end: 7,
        }
    }
}

impl RecommendationConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            group_slots: env_usize("GROUP_SLOTS", defaults.group_slots),
            struggling_slots: env_usize("STRUGGLING_SLOTS", defaults.struggling_slots),
            topic_slots: env_usize("TOPIC_SLOTS", defaults.topic_slots),
            related_subtopic_count: env_usize(
                "RELATED_SUBTOPIC_COUNT",
                defaults.related_subtopic_count,
            ),
            explore_window_start: env_usize("EXPLORE_WINDOW_START", defaults.explore_window_start),
            explore_window_end: env_usize("EXPLORE_WINDOW_END", defaults.explore_window_end),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a valid usize", key)),
        Err(_) => default,
    }
}
