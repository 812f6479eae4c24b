//! S3 client implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};

/// Upload retry policy. The upload is the one transient-failure-prone step
/// of the pipeline, so it alone gets retried.
const UPLOAD_ATTEMPTS: u32 = 3;
const RETRY_BASE_MS: u64 = 200;
const RETRY_MAX_MS: u64 = 5_000;

/// Configuration for the S3 storage client.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Optional custom endpoint (S3-compatible stores, local test stacks)
    pub endpoint_url: Option<String>,
    /// Optional CDN host used when building public URLs
    pub cdn_base_url: Option<String>,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            bucket: std::env::var("S3_BUCKET")
                .map_err(|_| StorageError::config("S3_BUCKET not set"))?,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
            cdn_base_url: std::env::var("CDN_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
        })
    }
}

/// Object storage operations the upload pipeline depends on.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a local file under `key`, with the given content type attached.
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;

    /// Delete the object stored under `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL for the object stored under `key`.
    fn url_for(&self, key: &str) -> String;
}

/// S3-backed [`ObjectStorage`].
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
    cdn_base_url: Option<String>,
}

impl S3Storage {
    /// Create a new storage client. Credentials come from the default AWS
    /// provider chain (environment, profile, instance role).
    pub async fn new(config: S3Config) -> StorageResult<Self> {
        let base = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = Builder::from(&base);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        Ok(Self {
            client,
            bucket: config.bucket,
            region: config.region,
            cdn_base_url: config.cdn_base_url,
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Self::new(config).await
    }

    async fn put_once(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()> {
        debug!("Uploading {} to {}", path.display(), key);

        let mut last_error = None;
        for attempt in 0..UPLOAD_ATTEMPTS {
            if attempt > 0 {
                let delay = (RETRY_BASE_MS << attempt).min(RETRY_MAX_MS);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.put_once(key, path, content_type).await {
                Ok(()) => {
                    info!("Uploaded {} to {}", path.display(), key);
                    return Ok(());
                }
                Err(e) => {
                    warn!(attempt = attempt + 1, error = %e, "Upload attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| StorageError::upload_failed("upload never attempted")))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        debug!("Deleting {}", key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::delete_failed(e.to_string()))?;

        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        public_url(self.cdn_base_url.as_deref(), &self.bucket, &self.region, key)
    }
}

/// Build the public URL for an object.
///
/// The chosen convention is `{scheme}://{host}/{key}`: the CDN host when one
/// is configured, otherwise the virtual-hosted S3 form
/// `https://<bucket>.s3.<region>.amazonaws.com/<key>`.
fn public_url(cdn_base_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match cdn_base_url {
        Some(base) => format!("{}/{}", base, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_virtual_hosted_form_by_default() {
        let url = public_url(None, "videos", "eu-west-1", "landscape/abc.mp4");
        assert_eq!(
            url,
            "https://videos.s3.eu-west-1.amazonaws.com/landscape/abc.mp4"
        );
    }

    #[test]
    fn url_prefers_cdn_host_when_configured() {
        let url = public_url(
            Some("https://cdn.example.com"),
            "videos",
            "eu-west-1",
            "portrait/xyz.mp4",
        );
        assert_eq!(url, "https://cdn.example.com/portrait/xyz.mp4");
    }

    /// Upload/delete cycle against a real bucket.
    #[tokio::test]
    #[ignore = "requires S3 credentials and S3_BUCKET"]
    async fn upload_delete_roundtrip() {
        use std::io::Write;

        dotenvy::dotenv().ok();

        let storage = S3Storage::from_env().await.expect("S3 config");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"integration test payload").unwrap();

        let key = "other/integration-test.mp4";
        storage.put_file(key, file.path(), "video/mp4").await.unwrap();
        storage.delete(key).await.unwrap();
    }
}
