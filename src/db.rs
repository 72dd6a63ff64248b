use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::SelectResult;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Creator-scoped record of clip ids that were already shown.
pub trait SeenStore {
    fn has_seen(&self, creator: &str, clip_id: &str) -> SelectResult<bool>;

    /// Returns `true` when a new record was written, `false` when it already existed.
    fn mark_seen(&self, creator: &str, clip_id: &str) -> SelectResult<bool>;

    /// Returns the number of removed records.
    fn clear_for_creator(&self, creator: &str) -> SelectResult<usize>;

    fn count_for_creator(&self, creator: &str) -> SelectResult<usize>;
}

/// SQLite-backed store. Every operation opens its own connection, so nothing is held
/// between calls and concurrent runs only contend for the duration of one statement.
#[derive(Debug, Clone)]
pub struct SqliteSeenStore {
    path: PathBuf,
}

impl SqliteSeenStore {
    /// Does not touch the filesystem; call [`SqliteSeenStore::migrate`] before use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn migrate(&self) -> SelectResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS seen_clips (
                streamer TEXT NOT NULL,
                clip_id TEXT NOT NULL,
                PRIMARY KEY (streamer, clip_id)
            );
            CREATE INDEX IF NOT EXISTS idx_seen_clips_streamer ON seen_clips(streamer);
            "#,
        )?;
        Ok(())
    }

    fn connect(&self) -> SelectResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

impl SeenStore for SqliteSeenStore {
    fn has_seen(&self, creator: &str, clip_id: &str) -> SelectResult<bool> {
        let conn = self.connect()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM seen_clips WHERE streamer = ?1 AND clip_id = ?2",
                params![creator, clip_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn mark_seen(&self, creator: &str, clip_id: &str) -> SelectResult<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO seen_clips (streamer, clip_id) VALUES (?1, ?2)",
            params![creator, clip_id],
        )?;
        tx.commit()?;
        Ok(inserted > 0)
    }

    fn clear_for_creator(&self, creator: &str) -> SelectResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM seen_clips WHERE streamer = ?1",
            params![creator],
        )?;
        tx.commit()?;
        Ok(removed)
    }

    fn count_for_creator(&self, creator: &str) -> SelectResult<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM seen_clips WHERE streamer = ?1",
            params![creator],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
