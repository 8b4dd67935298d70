use crate::ports::thumbnails::{extension_for, StoredThumbnail, ThumbnailStore};
use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error;
use std::path::PathBuf;
use uuid::Uuid;

/// ThumbnailStore writing files into a directory served statically at
/// `/assets`. Filenames derive from the record id and the media type, so a
/// re-upload overwrites the previous thumbnail.
#[derive(Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the backing directory if it does not exist yet.
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }
}

#[async_trait]
impl ThumbnailStore for AssetDir {
    async fn save(
        &self,
        video_id: Uuid,
        media_type: &str,
        body: Bytes,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let ext = extension_for(media_type)
            .ok_or_else(|| format!("unsupported thumbnail media type: {}", media_type))?;
        let file_name = format!("{}.{}", video_id, ext);
        tokio::fs::write(self.root.join(&file_name), &body).await?;
        Ok(format!("/assets/{}", file_name))
    }

    async fn get(
        &self,
        _video_id: Uuid,
    ) -> Result<Option<StoredThumbnail>, Box<dyn Error + Send + Sync>> {
        // Served by the static file service, not through the API.
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn save_writes_the_file_and_returns_the_assets_path() {
        let dir = tempdir().unwrap();
        let store = AssetDir::new(dir.path());
        let id = Uuid::new_v4();

        let path = store
            .save(id, "image/png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        assert_eq!(path, format!("/assets/{}.png", id));
        let written = std::fs::read(dir.path().join(format!("{}.png", id))).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn save_overwrites_a_previous_thumbnail() {
        let dir = tempdir().unwrap();
        let store = AssetDir::new(dir.path());
        let id = Uuid::new_v4();

        store
            .save(id, "image/jpeg", Bytes::from_static(b"first"))
            .await
            .unwrap();
        store
            .save(id, "image/jpeg", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join(format!("{}.jpg", id))).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn unknown_media_type_is_rejected() {
        let dir = tempdir().unwrap();
        let store = AssetDir::new(dir.path());

        let err = store
            .save(Uuid::new_v4(), "application/pdf", Bytes::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[tokio::test]
    async fn get_defers_to_the_static_file_service() {
        let dir = tempdir().unwrap();
        let store = AssetDir::new(dir.path());
        let id = Uuid::new_v4();
        store
            .save(id, "image/png", Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert!(store.get(id).await.unwrap().is_none());
    }
}
