use crate::ports::storage::ObjectStorage;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::error::Error;
use std::path::Path;

/// S3Adapter implements ObjectStorage for AWS S3.
#[derive(Clone)]
pub struct S3Adapter {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Adapter {
    pub fn new(client: Client, bucket: String, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Adapter {
    async fn put_file(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Streams from disk rather than buffering the whole file in memory.
        let body = ByteStream::from_path(local_path).await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::BehaviorVersion;

    #[test]
    fn public_url_is_composed_from_bucket_and_region() {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        let adapter = S3Adapter::new(
            Client::from_conf(conf),
            "tube".to_string(),
            "eu-west-3".to_string(),
        );
        assert_eq!(
            adapter.public_url("wide/abc123.mp4"),
            "https://tube.s3.eu-west-3.amazonaws.com/wide/abc123.mp4"
        );
    }
}
