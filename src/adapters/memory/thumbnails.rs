use crate::ports::thumbnails::{StoredThumbnail, ThumbnailStore};
use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use std::error::Error;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Bounded, mutex-guarded in-memory thumbnail store, served back through the
/// API at `/api/thumbnails/:video_id`. Inserting past capacity evicts the
/// least recently used entry. Contents do not survive a restart.
pub struct ThumbnailCache {
    inner: Mutex<LruCache<Uuid, StoredThumbnail>>,
}

impl ThumbnailCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }
}

#[async_trait]
impl ThumbnailStore for ThumbnailCache {
    async fn save(
        &self,
        video_id: Uuid,
        media_type: &str,
        body: Bytes,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let mut cache = self.inner.lock().await;
        cache.put(
            video_id,
            StoredThumbnail {
                media_type: media_type.to_owned(),
                body,
            },
        );
        Ok(format!("/api/thumbnails/{}", video_id))
    }

    async fn get(
        &self,
        video_id: Uuid,
    ) -> Result<Option<StoredThumbnail>, Box<dyn Error + Send + Sync>> {
        let mut cache = self.inner.lock().await;
        Ok(cache.get(&video_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> ThumbnailCache {
        ThumbnailCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = cache(4);
        let id = Uuid::new_v4();

        let path = store
            .save(id, "image/png", Bytes::from_static(b"bytes"))
            .await
            .unwrap();
        assert_eq!(path, format!("/api/thumbnails/{}", id));

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.media_type, "image/png");
        assert_eq!(stored.body, Bytes::from_static(b"bytes"));
    }

    #[tokio::test]
    async fn missing_entry_is_none() {
        let store = cache(4);
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn capacity_bounds_the_store() {
        let store = cache(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        for id in [first, second, third] {
            store.save(id, "image/png", Bytes::new()).await.unwrap();
        }

        assert!(store.get(first).await.unwrap().is_none());
        assert!(store.get(second).await.unwrap().is_some());
        assert!(store.get(third).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reads_refresh_recency() {
        let store = cache(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        store.save(first, "image/png", Bytes::new()).await.unwrap();
        store.save(second, "image/png", Bytes::new()).await.unwrap();
        store.get(first).await.unwrap();
        store.save(third, "image/png", Bytes::new()).await.unwrap();

        assert!(store.get(first).await.unwrap().is_some());
        assert!(store.get(second).await.unwrap().is_none());
    }
}
