use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{validate_video_id, LookupError};
use crate::models::{MediaFormat, LIST_LIMIT};

const CIPHER_WARNING: &str =
    "Cipher-protected stream URLs are not deciphered; entries with encryptedSignature=true expose the raw cipher payload only.";

#[derive(Serialize, ToSchema)]
pub struct FormatsResponse {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub warning: String,
    pub formats: Vec<MediaFormat>,
}

#[utoipa::path(
    get,
    path = "/formats/{video_id}",
    params(
        ("video_id" = String, Path, description = "11-character YouTube video ID")
    ),
    responses(
        (status = 200, description = "Available media formats", body = FormatsResponse),
        (status = 400, description = "Missing or malformed video ID"),
        (status = 404, description = "Video not found or is private/deleted"),
        (status = 500, description = "Upstream or internal failure"),
        (status = 503, description = "YouTube client still initializing")
    )
)]
pub async fn get_formats(
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

    log::info!("Fetching formats for {}", video_id);

    let player = match data.lookup.fetch_video(&video_id).await {
        Ok(player) => player,
        Err(e) => {
            log::warn!("Lookup failed for {}: {}", video_id, e);
            return e.to_response();
        }
    };

    let mut formats = player.formats;
    formats.truncate(LIST_LIMIT);

    HttpResponse::Ok().json(FormatsResponse {
        video_id: player.details.video_id,
        title: player.details.title,
        warning: CIPHER_WARNING.to_string(),
        formats,
    })
}
