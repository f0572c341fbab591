//! Projection of raw InnerTube JSON into the typed snapshot structs.
//!
//! All field access into the upstream payload happens here, once, at the
//! adapter boundary. Optional fields default rather than fail; the only hard
//! requirement is a title in the player response.

use serde_json::Value;

use crate::error::LookupError;
use crate::models::{CommentEntry, MediaFormat, PlayerData, RelatedVideo, VideoDetails, WatchNextData};

/// InnerTube renders text either as `{"simpleText": ...}` or as
/// `{"runs": [{"text": ...}, ...]}` depending on client and surface.
fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value.get("simpleText").and_then(|t| t.as_str()) {
        return Some(simple.to_string());
    }
    let runs = value.get("runs")?.as_array()?;
    let joined: String = runs
        .iter()
        .filter_map(|r| r.get("text").and_then(|t| t.as_str()))
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn media_format(entry: &Value) -> MediaFormat {
    let quality = entry
        .get("qualityLabel")
        .or_else(|| entry.get("quality"))
        .and_then(|q| q.as_str())
        .unwrap_or("unknown")
        .to_string();

    let mime_type = entry
        .get("mimeType")
        .and_then(|m| m.as_str())
        .unwrap_or("unknown")
        .to_string();

    let url = entry
        .get("url")
        .and_then(|u| u.as_str())
        .map(|u| u.to_string());

    // Cipher-protected streams carry no direct url; the raw cipher payload
    // is surfaced as-is because signature decryption is not implemented.
    let raw_cipher_info = entry
        .get("signatureCipher")
        .or_else(|| entry.get("cipher"))
        .and_then(|c| c.as_str())
        .map(|c| c.to_string());

    let encrypted_signature = url.is_none() && raw_cipher_info.is_some();

    MediaFormat {
        quality,
        mime_type,
        url,
        encrypted_signature,
        raw_cipher_info,
    }
}

/// Project a `youtubei/v1/player` response.
pub fn player_data(json: &Value, video_id: &str) -> Result<PlayerData, LookupError> {
    let details = json
        .get("videoDetails")
        .ok_or_else(|| LookupError::Projection("videoDetails missing in player response".into()))?;

    let title = details
        .get("title")
        .and_then(|t| t.as_str())
        .ok_or_else(|| LookupError::Projection("title missing in player response".into()))?
        .to_string();

    let description = details
        .get("shortDescription")
        .and_then(|d| d.as_str())
        .map(|d| d.to_string());

    let view_count = details
        .get("viewCount")
        .and_then(|v| v.as_str())
        .and_then(|v| v.parse().ok());

    let channel_name = details
        .get("author")
        .and_then(|a| a.as_str())
        .map(|a| a.to_string());

    let channel_id = details
        .get("channelId")
        .and_then(|c| c.as_str())
        .map(|c| c.to_string());

    let mut formats = Vec::new();
    for key in ["formats", "adaptiveFormats"] {
        if let Some(entries) = json
            .pointer("/streamingData")
            .and_then(|s| s.get(key))
            .and_then(|f| f.as_array())
        {
            formats.extend(entries.iter().map(media_format));
        }
    }

    Ok(PlayerData {
        details: VideoDetails {
            video_id: video_id.to_string(),
            title,
            description,
            view_count,
            channel_name,
            channel_id,
            channel_icon: None,
        },
        formats,
    })
}

fn related_video(renderer: &Value) -> Option<RelatedVideo> {
    let id = renderer.get("videoId")?.as_str()?.to_string();
    let title = renderer.get("title").and_then(text_of)?;
    let channel_title = renderer
        .get("shortBylineText")
        .or_else(|| renderer.get("longBylineText"))
        .and_then(text_of);

    Some(RelatedVideo {
        id,
        title,
        channel_title,
    })
}

/// Project a `youtubei/v1/next` (watch page) response.
///
/// The secondary-results list is heterogeneous: mixes, shelves, and ad slots
/// sit next to playable videos. Only `compactVideoRenderer` entries survive.
pub fn watch_next_data(json: &Value) -> WatchNextData {
    let mut related = Vec::new();
    if let Some(results) = json
        .pointer("/contents/twoColumnWatchNextResults/secondaryResults/secondaryResults/results")
        .and_then(|r| r.as_array())
    {
        for entry in results {
            if let Some(renderer) = entry.get("compactVideoRenderer") {
                if let Some(video) = related_video(renderer) {
                    related.push(video);
                }
            } else if let Some(items) = entry
                .pointer("/itemSectionRenderer/contents")
                .and_then(|c| c.as_array())
            {
                for item in items {
                    if let Some(renderer) = item.get("compactVideoRenderer") {
                        if let Some(video) = related_video(renderer) {
                            related.push(video);
                        }
                    }
                }
            }
        }
    }

    let contents = json
        .pointer("/contents/twoColumnWatchNextResults/results/results/contents")
        .and_then(|c| c.as_array());

    let mut like_count = None;
    let mut channel_icon = None;
    let mut comments_token = None;

    if let Some(contents) = contents {
        for entry in contents {
            if let Some(primary) = entry.get("videoPrimaryInfoRenderer") {
                like_count = primary
                    .pointer(concat!(
                        "/videoActions/menuRenderer/topLevelButtons/0",
                        "/segmentedLikeDislikeButtonViewModel/likeButtonViewModel",
                        "/likeButtonViewModel/toggleButtonViewModel/toggleButtonViewModel",
                        "/defaultButtonViewModel/buttonViewModel/title"
                    ))
                    .and_then(|t| t.as_str())
                    .map(|t| t.to_string());
            } else if let Some(secondary) = entry.get("videoSecondaryInfoRenderer") {
                channel_icon = secondary
                    .pointer("/owner/videoOwnerRenderer/thumbnail/thumbnails")
                    .and_then(|t| t.as_array())
                    .and_then(|arr| arr.last())
                    .and_then(|t| t.get("url"))
                    .and_then(|u| u.as_str())
                    .map(|u| u.to_string());
            } else if let Some(section) = entry.get("itemSectionRenderer") {
                let is_comments = section
                    .get("sectionIdentifier")
                    .and_then(|s| s.as_str())
                    .map(|s| s.starts_with("comment"))
                    .unwrap_or(false);
                if is_comments {
                    comments_token = section
                        .pointer("/contents/0/continuationItemRenderer/continuationEndpoint/continuationCommand/token")
                        .and_then(|t| t.as_str())
                        .map(|t| t.to_string());
                }
            }
        }
    }

    WatchNextData {
        related,
        like_count,
        channel_icon,
        comments_token,
    }
}

fn comment_from_renderer(renderer: &Value) -> Option<CommentEntry> {
    let author = renderer
        .get("authorText")
        .and_then(text_of)
        .unwrap_or_else(|| "Unknown".to_string());
    let text = renderer.get("contentText").and_then(text_of)?;
    let published_at = renderer
        .get("publishedTimeText")
        .and_then(text_of)
        .unwrap_or_default();

    Some(CommentEntry {
        author,
        text,
        published_at,
    })
}

/// Project a comments continuation response.
///
/// Newer responses deliver comments as `commentEntityPayload` mutations in
/// `frameworkUpdates`; older ones inline `commentRenderer` trees in the
/// continuation items. Both shapes are handled; anything else yields an
/// empty list, which the handlers treat as "comments unavailable".
pub fn comments(json: &Value) -> Vec<CommentEntry> {
    let mut entries = Vec::new();

    if let Some(mutations) = json
        .pointer("/frameworkUpdates/entityBatchUpdate/mutations")
        .and_then(|m| m.as_array())
    {
        for mutation in mutations {
            let Some(payload) = mutation.pointer("/payload/commentEntityPayload") else {
                continue;
            };
            let author = payload
                .pointer("/author/displayName")
                .and_then(|a| a.as_str())
                .unwrap_or("Unknown")
                .to_string();
            let Some(text) = payload
                .pointer("/properties/content/content")
                .and_then(|t| t.as_str())
            else {
                continue;
            };
            let published_at = payload
                .pointer("/properties/publishedTime")
                .and_then(|p| p.as_str())
                .unwrap_or("")
                .to_string();

            entries.push(CommentEntry {
                author,
                text: text.to_string(),
                published_at,
            });
        }
    }

    if !entries.is_empty() {
        return entries;
    }

    if let Some(endpoints) = json
        .get("onResponseReceivedEndpoints")
        .and_then(|e| e.as_array())
    {
        for endpoint in endpoints {
            let items = endpoint
                .pointer("/reloadContinuationItemsCommand/continuationItems")
                .or_else(|| endpoint.pointer("/appendContinuationItemsAction/continuationItems"))
                .and_then(|i| i.as_array());
            let Some(items) = items else { continue };
            for item in items {
                if let Some(renderer) = item.pointer("/commentThreadRenderer/comment/commentRenderer")
                {
                    if let Some(entry) = comment_from_renderer(renderer) {
                        entries.push(entry);
                    }
                }
            }
        }
    }

    entries
}
