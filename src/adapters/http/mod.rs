//! HTTP inbound adapter - routing, auth, and the upload handlers.

pub mod auth;
pub mod error;
pub mod thumbnails;
pub mod videos;


use crate::config::Config;
use crate::media::cmd::{ProbeRunner, RepackRunner};
use crate::ports::repository::VideoRepository;
use crate::ports::storage::ObjectStorage;
use crate::ports::thumbnails::ThumbnailStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state: configuration plus the outbound ports, passed in explicitly
/// so every collaborator has a defined lifecycle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub prober: Arc<dyn ProbeRunner>,
    pub repacker: Arc<dyn RepackRunner>,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route(
            "/api/videos",
            post(videos::create_video).get(videos::list_videos),
        )
        .route("/api/videos/:video_id", get(videos::get_video))
        .route(
            "/api/videos/:video_id/video",
            post(videos::upload_video).layer(DefaultBodyLimit::max(state.config.max_video_bytes)),
        )
        .route(
            "/api/videos/:video_id/thumbnail",
            post(thumbnails::upload_thumbnail)
                .layer(DefaultBodyLimit::max(state.config.max_thumbnail_bytes)),
        )
        .route("/api/thumbnails/:video_id", get(thumbnails::get_thumbnail))
        .route("/healthz", get(|| async { "ok" }))
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
