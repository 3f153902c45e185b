pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::RecommendationConfig;
pub use error::{AppError, Result};
pub use services::{ActivitySignals, RecommendationService, TopicGraph, TopicGraphCache};
