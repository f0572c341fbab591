use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{validate_video_id, LookupError};
use crate::models::{CommentEntry, RelatedVideo, LIST_LIMIT};

#[derive(Serialize, ToSchema)]
pub struct VideoInfoResponse {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<u64>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "channelName")]
    pub channel_name: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "channelIcon")]
    pub channel_icon: Option<String>,
    #[serde(rename = "relatedVideos")]
    pub related_videos: Vec<RelatedVideo>,
    pub comments: Vec<CommentEntry>,
}

#[utoipa::path(
    get,
    path = "/get/{video_id}",
    params(
        ("video_id" = String, Path, description = "11-character YouTube video ID")
    ),
    responses(
        (status = 200, description = "Video snapshot", body = VideoInfoResponse),
        (status = 400, description = "Missing or malformed video ID"),
        (status = 404, description = "Video not found or is private/deleted"),
        (status = 500, description = "Upstream or internal failure"),
        (status = 503, description = "YouTube client still initializing"),
        (status = 504, description = "Upstream request timed out")
    )
)]
pub async fn get_video(
    path: web::Path<String>,
    data: web::Data<crate::AppState>,
) -> impl Responder {
    if !data.lookup.is_ready() {
        return LookupError::NotReady.to_response();
    }

    let raw = path.into_inner();
    let video_id = match validate_video_id(&raw) {
        Ok(id) => id.to_string(),
        Err(e) => return e.to_response(),
    };

    log::info!("Fetching video info for {}", video_id);

    let player = match data.lookup.fetch_video(&video_id).await {
        Ok(player) => player,
        Err(e) => {
            log::warn!("Lookup failed for {}: {}", video_id, e);
            return e.to_response();
        }
    };

    // The watch page is supplemental: losing it costs related videos, like
    // count, and the channel icon, not the whole response.
    let watch_next = match data.lookup.fetch_watch_next(&video_id).await {
        Ok(watch_next) => Some(watch_next),
        Err(e) => {
            log::warn!("Watch-next lookup failed for {}: {}", video_id, e);
            None
        }
    };

    // Comments degrade to empty: disabled comments are not an error.
    let mut comments = match watch_next
        .as_ref()
        .and_then(|w| w.comments_token.as_deref())
    {
        Some(token) => match data.lookup.fetch_comments(token).await {
            Ok(comments) => comments,
            Err(e) => {
                log::warn!("Comments lookup failed for {}: {}", video_id, e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    comments.truncate(LIST_LIMIT);

    let details = player.details;
    let (mut related_videos, like_count, channel_icon) = match watch_next {
        Some(w) => (w.related, w.like_count, w.channel_icon),
        None => (Vec::new(), None, None),
    };
    related_videos.truncate(LIST_LIMIT);

    HttpResponse::Ok().json(VideoInfoResponse {
        video_id: details.video_id,
        title: details.title,
        description: details.description,
        view_count: details.view_count,
        like_count,
        channel_name: details.channel_name,
        channel_id: details.channel_id,
        channel_icon: details.channel_icon.or(channel_icon),
        related_videos,
        comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{sample_watch_next, FakeLookup};
    use crate::AppState;
    use actix_web::{test, App};
    use std::sync::Arc;

    async fn call(fake: Arc<FakeLookup>, uri: &str) -> (u16, serde_json::Value) {
        let state = web::Data::new(AppState {
            lookup: fake as Arc<dyn crate::client::VideoLookup>,
        });
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/get/{video_id:.*}", web::get().to(get_video)),
        )
        .await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn healthy_lookup_returns_full_snapshot() {
        let fake = Arc::new(FakeLookup::healthy());
        let (status, body) = call(fake, "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 200);
        assert_eq!(body["videoId"], "dQw4w9WgXcQ");
        assert_eq!(body["title"], "Never Gonna Give You Up");
        assert!(!body["title"].as_str().unwrap().is_empty());
        assert_eq!(body["likeCount"], "1.2M");
        assert_eq!(body["relatedVideos"].as_array().unwrap().len(), 3);
        assert_eq!(body["comments"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn not_ready_adapter_yields_503_without_upstream_call() {
        let fake = Arc::new(FakeLookup::not_ready());
        let (status, body) = call(fake.clone(), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 503);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Server not ready"));
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn empty_id_yields_400_without_upstream_call() {
        let fake = Arc::new(FakeLookup::healthy());
        let (status, body) = call(fake.clone(), "/get/").await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "Video ID is required");
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn malformed_id_yields_400_without_upstream_call() {
        let fake = Arc::new(FakeLookup::healthy());
        let (status, body) = call(fake.clone(), "/get/not-an-id").await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid Video ID format");
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn not_found_upstream_maps_to_404() {
        let mut fake = FakeLookup::healthy();
        fake.player = Err(LookupError::from_playability(
            "ERROR",
            "This video is unavailable",
        ));
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 404);
        assert_eq!(body["error"], "Video not found or is private/deleted");
    }

    #[actix_web::test]
    async fn other_upstream_errors_map_to_500_with_details() {
        let mut fake = FakeLookup::healthy();
        fake.player = Err(LookupError::Upstream("connection reset by peer".into()));
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Failed to fetch video details");
        assert_eq!(body["details"], "connection reset by peer");
    }

    #[actix_web::test]
    async fn timeout_maps_to_504() {
        let mut fake = FakeLookup::healthy();
        fake.player = Err(LookupError::Timeout("deadline exceeded".into()));
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 504);
        assert_eq!(body["error"], "Upstream request timed out");
    }

    #[actix_web::test]
    async fn lists_truncate_to_five_preserving_order() {
        let mut fake = FakeLookup::healthy();
        fake.watch_next = Ok(sample_watch_next(12));
        fake.comments = Ok(crate::routes::testing::sample_comments(9));
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 200);
        let related = body["relatedVideos"].as_array().unwrap();
        assert_eq!(related.len(), 5);
        for (i, entry) in related.iter().enumerate() {
            assert_eq!(entry["id"], format!("related{:04}", i));
        }
        assert_eq!(body["comments"].as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn disabled_comments_degrade_to_empty_list() {
        let mut fake = FakeLookup::healthy();
        let mut watch_next = sample_watch_next(2);
        watch_next.comments_token = None;
        fake.watch_next = Ok(watch_next);
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 200);
        assert_eq!(body["comments"].as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn failing_comments_call_degrades_to_empty_list() {
        let mut fake = FakeLookup::healthy();
        fake.comments = Err(LookupError::Upstream("comments are turned off".into()));
        let (status, body) = call(Arc::new(fake), "/get/dQw4w9WgXcQ").await;

        assert_eq!(status, 200);
        assert_eq!(body["comments"].as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn projection_is_idempotent_for_identical_upstream_results() {
        let fake = Arc::new(FakeLookup::healthy());
        let (_, first) = call(fake.clone(), "/get/dQw4w9WgXcQ").await;
        let (_, second) = call(fake, "/get/dQw4w9WgXcQ").await;
        assert_eq!(first, second);
    }
}
