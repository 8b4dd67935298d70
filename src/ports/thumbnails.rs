use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error;
use uuid::Uuid;

/// File extension for an accepted thumbnail media type. `None` means the
/// declared type is not accepted and the upload must be rejected.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// A stored thumbnail as served back to clients.
#[derive(Debug, Clone)]
pub struct StoredThumbnail {
    pub media_type: String,
    pub body: Bytes,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Persist thumbnail bytes for a video. Returns the URL path the
    /// thumbnail will be served from (relative to the public base URL).
    async fn save(
        &self,
        video_id: Uuid,
        media_type: &str,
        body: Bytes,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// Fetch stored bytes. `None` when there is no entry, or when the store
    /// serves through another surface (static files) rather than the API.
    async fn get(
        &self,
        video_id: Uuid,
    ) -> Result<Option<StoredThumbnail>, Box<dyn Error + Send + Sync>>;
}
