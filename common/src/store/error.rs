use thiserror::Error;

/// Failures of the persisted slot. The store absorbs all of them: they are
/// logged and never reach the UI.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Storage cannot be reached at all (no window, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused a write, e.g. quota exceeded.
    #[error("storage write failed: {0}")]
    Write(String),

    /// The slot content is not a valid encoded card list.
    #[error("stored cards could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}
