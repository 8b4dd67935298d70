//! Video record handlers and the video upload pipeline.

use super::auth::authenticate;
use super::error::ApiError;
use super::AppState;
use crate::domain::Video;
use crate::media::{probe, repack};
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::{BoxError, Json};
use futures::{Stream, TryStreamExt};
use serde::Deserialize;
use std::io;
use std::path::Path as FsPath;
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use uuid::Uuid;

const VIDEO_MEDIA_TYPE: &str = "video/mp4";

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/videos - create a draft record with no media attached yet.
pub async fn create_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    let user_id = authenticate(&headers, &state.config.jwt_secret)?;

    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let video = Video::new(user_id, request.title, request.description);
    state
        .videos
        .create_video(&video)
        .await
        .map_err(|err| ApiError::internal("could not persist video record", err))?;

    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /api/videos/:video_id
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Video>, ApiError> {
    let video = state
        .videos
        .get_video(video_id)
        .await
        .map_err(|err| ApiError::internal("could not load video record", err))?
        .ok_or_else(|| ApiError::NotFound("no such video".to_string()))?;
    Ok(Json(video))
}

/// GET /api/videos - the authenticated caller's records.
pub async fn list_videos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Video>>, ApiError> {
    let user_id = authenticate(&headers, &state.config.jwt_secret)?;
    let videos = state
        .videos
        .videos_by_user(user_id)
        .await
        .map_err(|err| ApiError::internal("could not list video records", err))?;
    Ok(Json(videos))
}

/// POST /api/videos/:video_id/video - the video upload pipeline.
///
/// Each step gates the next; the record is only touched after the upload has
/// fully succeeded, so a failure anywhere leaves it unchanged.
pub async fn upload_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, ApiError> {
    enforce_size_ceiling(&headers, state.config.max_video_bytes)?;
    let user_id = authenticate(&headers, &state.config.jwt_secret)?;
    let mut video = fetch_owned_video(&state, video_id, user_id).await?;

    // Stage the upload to a named temp file so the external tools get a
    // seekable path. The file is removed when `staged` drops, on every path
    // out of this function.
    let mut staged: Option<NamedTempFile> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("video") {
            continue;
        }

        let media_type = field
            .content_type()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::BadRequest("missing video content type".to_string()))?;
        if media_type != VIDEO_MEDIA_TYPE {
            return Err(ApiError::BadRequest(format!(
                "invalid file type {}, must be {}",
                media_type, VIDEO_MEDIA_TYPE
            )));
        }

        let tmp = NamedTempFile::new()
            .map_err(|err| ApiError::internal("could not create temp file", err))?;
        stream_to_file(tmp.path(), field)
            .await
            .map_err(|err| ApiError::internal("could not stage upload", err))?;
        staged = Some(tmp);
        break;
    }
    let staged = staged
        .ok_or_else(|| ApiError::BadRequest("missing multipart field \"video\"".to_string()))?;

    let orientation = probe::video_orientation(state.prober.as_ref(), staged.path())
        .await
        .map_err(|err| ApiError::internal("could not determine video orientation", err))?;

    let key = format!("{}/{}.mp4", orientation.as_str(), random_object_name());

    if state.config.faststart {
        let repacked = repack::repack_for_faststart(state.repacker.as_ref(), staged.path())
            .await
            .map_err(|err| {
                ApiError::internal("could not repack video for progressive playback", err)
            })?;
        let uploaded = state
            .storage
            .put_file(&repacked, &key, VIDEO_MEDIA_TYPE)
            .await;
        // The repacked sibling is ours to clean up whether or not the upload worked.
        if let Err(err) = tokio::fs::remove_file(&repacked).await {
            tracing::warn!("could not remove repacked file {:?}: {}", repacked, err);
        }
        uploaded
            .map_err(|err| ApiError::internal("could not upload video to object storage", err))?;
    } else {
        state
            .storage
            .put_file(staged.path(), &key, VIDEO_MEDIA_TYPE)
            .await
            .map_err(|err| ApiError::internal("could not upload video to object storage", err))?;
    }

    video.video_url = Some(state.storage.public_url(&key));
    state
        .videos
        .update_video(&video)
        .await
        .map_err(|err| ApiError::internal("could not update video record", err))?;

    Ok(Json(video))
}

/// Load the record and check the caller owns it.
pub(super) async fn fetch_owned_video(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, ApiError> {
    let video = state
        .videos
        .get_video(video_id)
        .await
        .map_err(|err| ApiError::internal("could not load video record", err))?
        .ok_or_else(|| ApiError::NotFound("no such video".to_string()))?;

    if video.user_id != user_id {
        return Err(ApiError::Unauthorized(
            "not authorized to modify this video".to_string(),
        ));
    }
    Ok(video)
}

/// Reject a declared body size over the ceiling before reading anything.
/// Chunked bodies without a declared length are still cut off by the
/// per-route body limit while streaming.
pub(super) fn enforce_size_ceiling(headers: &HeaderMap, limit: usize) -> Result<(), ApiError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    if let Some(length) = declared {
        if length > limit as u64 {
            return Err(ApiError::PayloadTooLarge(format!(
                "request body of {} bytes exceeds the {} byte limit",
                length, limit
            )));
        }
    }
    Ok(())
}

// Save a `Stream` to a file
async fn stream_to_file<S, E>(path: &FsPath, stream: S) -> io::Result<()>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(())
}

fn random_object_name() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}
