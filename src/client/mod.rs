use async_trait::async_trait;
use reqwest::Client;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::{Config, REQUEST_TIMEOUT_SECS};
use crate::error::LookupError;
use crate::models::{CommentEntry, PlayerData, WatchNextData};

pub mod parse;

const INNERTUBE_BASE: &str = "https://www.youtube.com/youtubei/v1";
const PROBE_URL: &str = "https://www.youtube.com/generate_204";

/// Lookup capabilities the request handlers depend on. Handlers only ever
/// see this trait, so tests can swap in a fake adapter.
#[async_trait]
pub trait VideoLookup: Send + Sync {
    /// Whether the one-time initialization has completed successfully.
    fn is_ready(&self) -> bool;

    /// Full video info by id: metadata plus the available media formats.
    async fn fetch_video(&self, video_id: &str) -> Result<PlayerData, LookupError>;

    /// Watch-page data by id: related videos, like count, comments token.
    async fn fetch_watch_next(&self, video_id: &str) -> Result<WatchNextData, LookupError>;

    /// One page of comments for a continuation token obtained from
    /// `fetch_watch_next`.
    async fn fetch_comments(&self, token: &str) -> Result<Vec<CommentEntry>, LookupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientState {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// The sole wrapper around the InnerTube surface. Constructed once at
/// startup, initialized once, read-only afterwards.
pub struct InnertubeClient {
    http: Client,
    context: serde_json::Value,
    state: RwLock<ClientState>,
}

impl InnertubeClient {
    /// Construction failure here is fatal: the process refuses to serve if
    /// it cannot build the underlying HTTP client at all.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            context: serde_json::json!({
                "client": config.innertube.to_context_value(),
            }),
            state: RwLock::new(ClientState::Uninitialized),
        })
    }

    /// One-time readiness probe. Exactly one attempt is made; on failure the
    /// adapter stays `Failed` for the rest of the process lifetime and every
    /// request is answered with 503.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.write().unwrap();
            if *state != ClientState::Uninitialized {
                return;
            }
            *state = ClientState::Initializing;
        }

        match self.http.get(PROBE_URL).send().await {
            Ok(resp) if resp.status().is_success() => {
                *self.state.write().unwrap() = ClientState::Ready;
                log::info!("YouTube client initialized.");
            }
            Ok(resp) => {
                *self.state.write().unwrap() = ClientState::Failed;
                log::error!(
                    "Failed to initialize YouTube client: probe returned {}",
                    resp.status()
                );
            }
            Err(e) => {
                *self.state.write().unwrap() = ClientState::Failed;
                log::error!("Failed to initialize YouTube client: {}", e);
            }
        }
    }

    async fn post_innertube(
        &self,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, LookupError> {
        let url = format!("{}/{}?prettyPrint=false", INNERTUBE_BASE, endpoint);

        let resp = self.http.post(&url).json(&payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Upstream(format!(
                "InnerTube {} returned {}",
                endpoint, status
            )));
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(json)
    }
}

#[async_trait]
impl VideoLookup for InnertubeClient {
    fn is_ready(&self) -> bool {
        *self.state.read().unwrap() == ClientState::Ready
    }

    async fn fetch_video(&self, video_id: &str) -> Result<PlayerData, LookupError> {
        let payload = serde_json::json!({
            "context": self.context,
            "videoId": video_id,
        });

        let json = self.post_innertube("player", payload).await?;

        let status = json
            .pointer("/playabilityStatus/status")
            .and_then(|s| s.as_str())
            .unwrap_or("OK");
        if status != "OK" && status != "CONTENT_CHECK_REQUIRED" {
            let reason = json
                .pointer("/playabilityStatus/reason")
                .and_then(|r| r.as_str())
                .unwrap_or("unknown");
            return Err(LookupError::from_playability(status, reason));
        }

        parse::player_data(&json, video_id)
    }

    async fn fetch_watch_next(&self, video_id: &str) -> Result<WatchNextData, LookupError> {
        let payload = serde_json::json!({
            "context": self.context,
            "videoId": video_id,
        });

        let json = self.post_innertube("next", payload).await?;
        Ok(parse::watch_next_data(&json))
    }

    async fn fetch_comments(&self, token: &str) -> Result<Vec<CommentEntry>, LookupError> {
        let payload = serde_json::json!({
            "context": self.context,
            "continuation": token,
        });

        let json = self.post_innertube("next", payload).await?;
        Ok(parse::comments(&json))
    }
}
