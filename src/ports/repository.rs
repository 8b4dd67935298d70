use crate::domain::Video;
use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Persist a new draft record
    async fn create_video(&self, video: &Video) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Fetch a record by id
    async fn get_video(
        &self,
        video_id: Uuid,
    ) -> Result<Option<Video>, Box<dyn Error + Send + Sync>>;

    /// Overwrite an existing record
    async fn update_video(&self, video: &Video) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// All records owned by a user
    async fn videos_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Video>, Box<dyn Error + Send + Sync>>;
}
