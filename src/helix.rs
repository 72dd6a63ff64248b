use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::app::source::{Clip, ClipSource, Creator, Game};
use crate::config::Config;
use crate::error::{SelectError, SelectResult};
use crate::http::{RetryPolicy, get_text_with_retries, post_form_with_retries};

const DEFAULT_AUTH_BASE: &str = "https://id.twitch.tv";
const DEFAULT_API_BASE: &str = "https://api.twitch.tv";
const MAX_PAGE_SIZE: u32 = 100;

/// Blocking Twitch Helix client authenticated with an app access token.
#[derive(Debug, Clone)]
pub struct HelixClient {
    api_base: String,
    client_id: String,
    access_token: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
    login: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct HelixClip {
    id: String,
    title: String,
    duration: f64,
    #[serde(default)]
    game_id: Option<String>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct HelixGame {
    name: String,
}

impl From<HelixClip> for Clip {
    fn from(clip: HelixClip) -> Self {
        Self {
            id: clip.id,
            title: clip.title,
            duration: clip.duration,
            game_id: clip.game_id.filter(|id| !id.trim().is_empty()),
            url: clip.url,
        }
    }
}

impl HelixClient {
    pub fn connect(config: &Config) -> SelectResult<Self> {
        Self::connect_with(
            config,
            DEFAULT_AUTH_BASE,
            DEFAULT_API_BASE,
            RetryPolicy::default(),
        )
    }

    pub(crate) fn connect_with(
        config: &Config,
        auth_base: &str,
        api_base: &str,
        policy: RetryPolicy,
    ) -> SelectResult<Self> {
        let body = post_form_with_retries(
            &format!("{}/oauth2/token", auth_base.trim_end_matches('/')),
            &[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ],
            policy,
        )
        .map_err(|err| SelectError::Platform(format!("authentication failed: {err}")))?;
        let token: TokenResponse = decode(&body)?;
        log::info!("obtained Twitch app access token");

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            access_token: token.access_token,
            policy,
        })
    }

    fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> SelectResult<Page<T>> {
        let bearer = format!("Bearer {}", self.access_token);
        let body = get_text_with_retries(
            &format!("{}/helix/{endpoint}", self.api_base),
            &[
                ("Client-Id", self.client_id.as_str()),
                ("Authorization", bearer.as_str()),
            ],
            query,
            self.policy,
        )
        .map_err(SelectError::Platform)?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> SelectResult<T> {
    serde_json::from_str(body)
        .map_err(|err| SelectError::Platform(format!("unexpected response body: {err}")))
}

impl ClipSource for HelixClient {
    fn resolve_creator(&self, login: &str) -> SelectResult<Option<Creator>> {
        let page: Page<HelixUser> = self.get_page("users", &[("login", login)])?;
        Ok(page.data.into_iter().next().map(|user| Creator {
            id: user.id,
            login: user.login,
            display_name: user.display_name,
        }))
    }

    fn fetch_clips(&self, creator_id: &str, limit: u32) -> SelectResult<Vec<Clip>> {
        let limit = limit as usize;
        let mut clips = Vec::with_capacity(limit.min(MAX_PAGE_SIZE as usize));
        let mut cursor: Option<String> = None;

        while clips.len() < limit {
            let page_size = (limit - clips.len()).min(MAX_PAGE_SIZE as usize).to_string();
            let mut query = vec![("broadcaster_id", creator_id), ("first", page_size.as_str())];
            if let Some(after) = cursor.as_deref() {
                query.push(("after", after));
            }

            let page: Page<HelixClip> = self.get_page("clips", &query)?;
            let received = page.data.len();
            clips.extend(page.data.into_iter().map(Clip::from));
            log::debug!("received {received} clip(s), {} total", clips.len());

            cursor = page.pagination.cursor.filter(|next| !next.is_empty());
            if received == 0 || cursor.is_none() {
                break;
            }
        }

        clips.truncate(limit);
        Ok(clips)
    }

    fn resolve_game(&self, game_id: &str) -> SelectResult<Option<Game>> {
        let page: Page<HelixGame> = self.get_page("games", &[("id", game_id)])?;
        Ok(page
            .data
            .into_iter()
            .next()
            .map(|game| Game { name: game.name }))
    }
}
