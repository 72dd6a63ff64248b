use serde::Serialize;

use crate::error::SelectError;

pub(crate) const UNKNOWN_GAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickedClip {
    pub title: String,
    pub streamer: String,
    pub game: String,
    pub duration: f64,
    pub url: String,
}

/// The single outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    Success(PickedClip),
    Failure { message: String },
}

impl SelectionResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Renders the one-line JSON object printed on stdout.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let envelope = match self {
            Self::Success(clip) => Envelope::Success {
                success: true,
                clip,
            },
            Self::Failure { message } => Envelope::Failure {
                success: false,
                error: message,
            },
        };
        serde_json::to_string(&envelope)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Envelope<'a> {
    Success {
        success: bool,
        #[serde(flatten)]
        clip: &'a PickedClip,
    },
    Failure {
        success: bool,
        error: &'a str,
    },
}

impl From<SelectError> for SelectionResult {
    fn from(err: SelectError) -> Self {
        Self::failure(err.to_string())
    }
}
