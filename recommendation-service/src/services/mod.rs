pub mod graph;
pub mod recommendation;
pub mod signals;

pub use graph::{TopicGraph, TopicGraphCache};
pub use recommendation::RecommendationService;
pub use signals::ActivitySignals;
