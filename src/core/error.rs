use thiserror::Error;

/// Failure taxonomy for one search pass.
///
/// A run either fully succeeds (one record persisted) or fully fails — there
/// is no partial-success state, and nothing is retried internally. Retry
/// policy, if wanted, belongs to whatever wraps the service.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request shape violations, caught before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Network/DNS/timeout failure reaching the search engine.
    #[error("search engine request failed")]
    Transport(#[from] reqwest::Error),

    /// The fetched page contained no anchor elements at all — either a
    /// bot-challenge page or a markup change, never a normal empty result
    /// set (those still carry navigation anchors).
    #[error("results page contained no anchor elements")]
    EmptyResultSet,

    /// History store failure.
    #[error("storage operation failed")]
    Storage(#[from] sqlx::Error),
}
