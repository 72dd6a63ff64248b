mod report;
mod selector;
pub(crate) mod source;


use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use crate::cli::Cli;
use crate::config::Config;
use crate::db::{SeenStore, SqliteSeenStore};
use crate::error::{SelectError, SelectResult};
use crate::helix::HelixClient;
use crate::paths::database_file_path;

use self::report::{PickedClip, SelectionResult, UNKNOWN_GAME};
use self::selector::select_clip;
use self::source::{Clip, ClipSource};

const FALLBACK_DB_FILE: &str = "seen_clips.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunRequest {
    /// Normalized login; also the key of the creator's seen history.
    pub(crate) login: String,
    pub(crate) ignore_history: bool,
    pub(crate) limit: u32,
}

impl RunRequest {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self {
            login: normalize_login(&cli.streamer),
            ignore_history: cli.ignore_db,
            limit: cli.limit,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let result = execute(&cli);
    let line = result
        .to_json_line()
        .context("failed to serialize selection result")?;
    println!("{line}");
    if result.is_success() {
        log::info!("random clip retrieval complete");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn execute(cli: &Cli) -> SelectionResult {
    let request = RunRequest::from_cli(cli);

    let default_db_path = database_file_path().unwrap_or_else(|err| {
        log::warn!("{err:#}; falling back to ./{FALLBACK_DB_FILE}");
        PathBuf::from(FALLBACK_DB_FILE)
    });
    let config = match Config::from_env(cli.db_path.clone(), default_db_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return err.into();
        }
    };

    let store = SqliteSeenStore::new(&config.db_path);
    if !request.ignore_history {
        log::info!("initializing seen clip database at {}", store.path().display());
        if let Err(err) = store.migrate() {
            log::error!("{err}");
            return err.into();
        }
    }

    let client = match HelixClient::connect(&config) {
        Ok(client) => client,
        Err(err) => {
            log::error!("{err}");
            return err.into();
        }
    };

    select_random_clip(&client, &store, &request, &mut rand::thread_rng())
}

/// Resolves the creator, fetches candidates and picks one, turning every failure into
/// a [`SelectionResult::Failure`].
pub(crate) fn select_random_clip<C, S, R>(
    source: &C,
    store: &S,
    request: &RunRequest,
    rng: &mut R,
) -> SelectionResult
where
    C: ClipSource + ?Sized,
    S: SeenStore + ?Sized,
    R: Rng + ?Sized,
{
    match pick_clip(source, store, request, rng) {
        Ok(picked) => SelectionResult::Success(picked),
        Err(err) => {
            log::error!("selection for '{}' failed: {err}", request.login);
            err.into()
        }
    }
}

fn pick_clip<C, S, R>(
    source: &C,
    store: &S,
    request: &RunRequest,
    rng: &mut R,
) -> SelectResult<PickedClip>
where
    C: ClipSource + ?Sized,
    S: SeenStore + ?Sized,
    R: Rng + ?Sized,
{
    let creator = source
        .resolve_creator(&request.login)?
        .ok_or_else(|| SelectError::NotFound(request.login.clone()))?;

    log::info!(
        "retrieving up to {} clips for '{}' ({}, user_id: {})",
        request.limit,
        creator.display_name,
        creator.login,
        creator.id
    );
    let clips = source.fetch_clips(&creator.id, request.limit)?;

    let selection = select_clip(
        store,
        &request.login,
        &creator.display_name,
        &clips,
        request.ignore_history,
        rng,
    )?;
    let clip = selection.clip;
    log::info!(
        "picked from {} eligible clip(s) (history reset: {}, recorded: {})",
        selection.eligible,
        selection.reset,
        selection.recorded
    );

    Ok(PickedClip {
        title: clip.title.clone(),
        streamer: creator.display_name,
        game: resolve_game_name(source, clip),
        duration: clip.duration,
        url: clip.url.clone(),
    })
}

fn resolve_game_name<C: ClipSource + ?Sized>(source: &C, clip: &Clip) -> String {
    let Some(game_id) = clip.game_id.as_deref() else {
        return UNKNOWN_GAME.to_string();
    };
    match source.resolve_game(game_id) {
        Ok(Some(game)) => {
            log::info!("clip is from game '{}'", game.name);
            game.name
        }
        Ok(None) => {
            log::info!("game {game_id} not found");
            UNKNOWN_GAME.to_string()
        }
        Err(err) => {
            log::warn!("game lookup for {game_id} failed: {err}");
            UNKNOWN_GAME.to_string()
        }
    }
}

pub(crate) fn normalize_login(raw: &str) -> String {
    raw.trim().trim_start_matches('@').to_lowercase()
}
