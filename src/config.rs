use std::path::PathBuf;

use crate::error::{SelectError, SelectResult};

pub const CLIENT_ID_VAR: &str = "TWITCH_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "TWITCH_CLIENT_SECRET";
pub const DB_PATH_VAR: &str = "CLIPS_DB_PATH";

/// Process-wide settings, read once at startup and handed to the client and the store.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub db_path: PathBuf,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env(
        db_path_override: Option<PathBuf>,
        default_db_path: PathBuf,
    ) -> SelectResult<Self> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            log::warn!("ignoring unreadable .env file: {err}");
        }
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            db_path_override,
            default_db_path,
        )
    }

    pub fn from_lookup<F>(
        lookup: F,
        db_path_override: Option<PathBuf>,
        default_db_path: PathBuf,
    ) -> SelectResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let (Some(client_id), Some(client_secret)) =
            (non_blank(CLIENT_ID_VAR), non_blank(CLIENT_SECRET_VAR))
        else {
            return Err(SelectError::MissingCredentials);
        };

        let db_path = db_path_override
            .or_else(|| non_blank(DB_PATH_VAR).map(PathBuf::from))
            .unwrap_or(default_db_path);

        Ok(Self {
            client_id,
            client_secret,
            db_path,
        })
    }
}
