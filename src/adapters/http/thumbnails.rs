//! Thumbnail upload and retrieval handlers.

use super::auth::authenticate;
use super::error::ApiError;
use super::videos::{enforce_size_ceiling, fetch_owned_video};
use super::AppState;
use crate::domain::Video;
use crate::ports::thumbnails::extension_for;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

/// POST /api/videos/:video_id/thumbnail
///
/// Persistence goes through the configured `ThumbnailStore`: the assets
/// directory (served at /assets) or the bounded in-memory cache (served at
/// /api/thumbnails).
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, ApiError> {
    enforce_size_ceiling(&headers, state.config.max_thumbnail_bytes)?;
    let user_id = authenticate(&headers, &state.config.jwt_secret)?;
    let mut video = fetch_owned_video(&state, video_id, user_id).await?;

    let mut thumbnail: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("thumbnail") {
            continue;
        }

        let media_type = field
            .content_type()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::BadRequest("missing thumbnail content type".to_string()))?;
        if extension_for(&media_type).is_none() {
            return Err(ApiError::BadRequest(format!(
                "unsupported thumbnail media type: {}",
                media_type
            )));
        }

        let body = field.bytes().await?;
        thumbnail = Some((media_type, body));
        break;
    }
    let (media_type, body) = thumbnail.ok_or_else(|| {
        ApiError::BadRequest("missing multipart field \"thumbnail\"".to_string())
    })?;

    let served_at = state
        .thumbnails
        .save(video_id, &media_type, body)
        .await
        .map_err(|err| ApiError::internal("could not store thumbnail", err))?;

    video.thumbnail_url = Some(format!("{}{}", state.config.public_base_url, served_at));
    state
        .videos
        .update_video(&video)
        .await
        .map_err(|err| ApiError::internal("could not update video record", err))?;

    Ok(Json(video))
}

/// GET /api/thumbnails/:video_id - serve from the API-backed store. Always
/// 404 under the assets-directory store, which serves at /assets instead.
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let stored = state
        .thumbnails
        .get(video_id)
        .await
        .map_err(|err| ApiError::internal("could not read thumbnail store", err))?
        .ok_or_else(|| ApiError::NotFound("no such thumbnail".to_string()))?;

    Ok(([(header::CONTENT_TYPE, stored.media_type)], stored.body).into_response())
}
