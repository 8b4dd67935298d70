use async_trait::async_trait;
use std::error::Error;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a local file to remote storage under the given key
    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Public URL an uploaded key is reachable at
    fn public_url(&self, key: &str) -> String;
}
