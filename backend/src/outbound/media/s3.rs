//! S3 presigned `GetObject` URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::warn;

use crate::domain::ImageKey;
use crate::domain::ports::{ImageResolver, ImageResolverError};

/// Resolver that presigns reads from a single bucket.
#[derive(Clone)]
pub struct S3ImageResolver {
    client: Client,
    bucket: String,
    ttl: Duration,
}

impl S3ImageResolver {
    pub fn new(client: Client, bucket: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            ttl,
        }
    }

    /// Build a client from the ambient AWS environment (region, credentials).
    pub async fn from_env(bucket: impl Into<String>, ttl: Duration) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), bucket, ttl)
    }
}

#[async_trait]
impl ImageResolver for S3ImageResolver {
    async fn resolve(&self, image: &ImageKey) -> Result<String, ImageResolverError> {
        let presigning = PresigningConfig::expires_in(self.ttl)
            .map_err(|err| ImageResolverError::backend(err.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(image.object_key())
            .presigned(presigning)
            .await
            .map_err(|err| {
                warn!(key = %image, bucket = %self.bucket, error = %err, "presigning failed");
                ImageResolverError::backend(err.to_string())
            })?;
        Ok(request.uri().to_owned())
    }
}
