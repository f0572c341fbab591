use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{validate_video_id, LookupError};
use crate::models::{RelatedVideo, LIST_LIMIT};

#[derive(Serialize, ToSchema)]
pub struct RelatedResponse {
    pub video_id: String,
    pub related_videos_count: usize,
    pub related: Vec<RelatedVideo>,
}

#[utoipa::path(
    get,
    path = "/related/{video_id}",
    params(
        ("video_id" = String, Path, description = "11-character YouTube video ID")
    ),
    responses(
        (status = 200, description = "Related videos", body = RelatedResponse),
        (status = 400, description = "Missing or malformed video ID"),
        (status = 404, description = "No related videos found"),
        (status = 500, description = "Upstream or internal failure"),
        (status = 503, description = "YouTube client still initializing")
    )
)]
pub async fn get_related(
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

    log::info!("Fetching related videos for {}", video_id);

    let watch_next = match data.lookup.fetch_watch_next(&video_id).await {
        Ok(watch_next) => watch_next,
        Err(e) => {
            log::warn!("Watch-next lookup failed for {}: {}", video_id, e);
            return e.to_response();
        }
    };

    if watch_next.related.is_empty() {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Related videos not found or API structure changed."
        }));
    }

    let mut related = watch_next.related;
    related.truncate(LIST_LIMIT);

    HttpResponse::Ok().json(RelatedResponse {
        video_id,
        related_videos_count: related.len(),
        related,
    })
}
