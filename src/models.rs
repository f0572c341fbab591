use serde::Serialize;
use utoipa::ToSchema;

/// How many related videos, comments, or formats a response may carry.
pub const LIST_LIMIT: usize = 5;

/// Core metadata projected from the player response. Optional fields stay
/// `None` when the upstream payload lacks them; absence never fails a lookup.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<u64>,
    #[serde(rename = "channelName")]
    pub channel_name: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "channelIcon")]
    pub channel_icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelatedVideo {
    pub id: String,
    pub title: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentEntry {
    pub author: String,
    pub text: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// One media format entry. When the stream URL is cipher-protected the `url`
/// stays `None` and the raw cipher payload is surfaced as-is; signature
/// decryption is not implemented.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaFormat {
    pub quality: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub url: Option<String>,
    #[serde(rename = "encryptedSignature")]
    pub encrypted_signature: bool,
    #[serde(rename = "rawCipherInfo")]
    pub raw_cipher_info: Option<String>,
}

/// Everything extracted from one `youtubei/v1/player` round-trip.
#[derive(Debug, Clone)]
pub struct PlayerData {
    pub details: VideoDetails,
    pub formats: Vec<MediaFormat>,
}

/// Everything extracted from one `youtubei/v1/next` round-trip. The comments
/// continuation token, when present, feeds the follow-up comments call.
#[derive(Debug, Clone)]
pub struct WatchNextData {
    pub related: Vec<RelatedVideo>,
    pub like_count: Option<String>,
    pub channel_icon: Option<String>,
    pub comments_token: Option<String>,
}
