use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The topic tree snapshot is structurally broken (e.g. a container node
    /// without children). Fatal for that snapshot; nothing derived from it is
    /// published.
    #[error("malformed topic tree: {0}")]
    MalformedTree(String),

    /// An external collaborator (activity log store or tree source) could not
    /// be reached. Surfaced as-is; retry policy belongs to the caller.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl AppError {
    /// Wraps a collaborator failure.
    pub fn unavailable(context: &str, err: impl std::fmt::Display) -> Self {
        AppError::DataUnavailable(format!("{}: {}", context, err))
    }
}
