use crate::error::SelectResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub id: String,
    pub title: String,
    /// Seconds.
    pub duration: f64,
    pub game_id: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub id: String,
    pub login: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub name: String,
}

/// Read access to the platform's creator, clip and game records.
///
/// Every method fails with [`crate::error::SelectError::Platform`] on transport or API
/// errors; "not found" is `Ok(None)`.
pub trait ClipSource {
    fn resolve_creator(&self, login: &str) -> SelectResult<Option<Creator>>;

    /// Returns clips in platform order, at most `limit` of them.
    fn fetch_clips(&self, creator_id: &str, limit: u32) -> SelectResult<Vec<Clip>>;

    fn resolve_game(&self, game_id: &str) -> SelectResult<Option<Game>>;
}
