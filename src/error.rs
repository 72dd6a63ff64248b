use thiserror::Error;

/// Everything that can end a selection run early.
///
/// The display string of each variant is the message reported to the caller in the
/// `{"success": false, "error": ...}` object.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("missing Twitch credentials (TWITCH_CLIENT_ID / TWITCH_CLIENT_SECRET)")]
    MissingCredentials,

    #[error("streamer '{0}' not found")]
    NotFound(String),

    #[error("no clips found for {0}")]
    EmptyCatalog(String),

    #[error("no usable clips available for {0} after reset")]
    Exhausted(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for SelectError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::io::Error> for SelectError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type SelectResult<T> = Result<T, SelectError>;
