//! Redis VideoRepository implementation.
//!
//! Records are stored as JSON under `video:<id>`; the set `user-videos:<uid>`
//! indexes the ids a user owns.

use super::error::RepositoryError;
use super::pool::RedisPool;
use super::{USER_VIDEOS_PREFIX, VIDEO_KEY_PREFIX};
use crate::domain::Video;
use crate::ports::repository::VideoRepository;
use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

fn video_key(video_id: Uuid) -> String {
    format!("{}{}", VIDEO_KEY_PREFIX, video_id)
}

fn user_videos_key(user_id: Uuid) -> String {
    format!("{}{}", USER_VIDEOS_PREFIX, user_id)
}

#[async_trait]
impl VideoRepository for RedisPool {
    async fn create_video(
        &self,
        video: &Video,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let json = serde_json::to_string(video)?;
        conn.set::<_, _, ()>(video_key(video.id), json)
            .await
            .map_err(RepositoryError::from)?;
        conn.sadd::<_, _, ()>(user_videos_key(video.user_id), video.id.to_string())
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn get_video(
        &self,
        video_id: Uuid,
    ) -> Result<Option<Video>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let json: Option<String> = conn
            .get(video_key(video_id))
            .await
            .map_err(RepositoryError::from)?;
        match json {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn update_video(
        &self,
        video: &Video,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let json = serde_json::to_string(video)?;
        conn.set::<_, _, ()>(video_key(video.id), json)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn videos_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Video>, Box<dyn std::error::Error + Send + Sync>> {
        let mut conn = self.pool.get().await.map_err(RepositoryError::from)?;
        let ids: Vec<String> = conn
            .smembers(user_videos_key(user_id))
            .await
            .map_err(RepositoryError::from)?;

        let mut videos = Vec::with_capacity(ids.len());
        for id in ids {
            let json: Option<String> = conn
                .get(format!("{}{}", VIDEO_KEY_PREFIX, id))
                .await
                .map_err(RepositoryError::from)?;
            if let Some(data) = json {
                videos.push(serde_json::from_str::<Video>(&data)?);
            }
        }
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }
}
