//! Port for turning stored image names into retrievable URLs.
//!
//! Resolvers are side-effect free and may be called concurrently for every
//! item of a listing.

use async_trait::async_trait;

use crate::domain::ImageKey;

use super::define_port_error;

/// Expiry applied to resolved URLs unless configured otherwise.
pub const DEFAULT_IMAGE_URL_TTL_SECS: u64 = 3600;

define_port_error! {
    /// Errors raised while resolving an image URL.
    pub enum ImageResolverError {
        /// The media backend rejected or could not serve the request.
        Backend { message: String } => "image resolver backend failed: {message}",
        /// The object key could not be expressed as a URL.
        InvalidKey { key: String } => "image key cannot be resolved: {key}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageResolver: Send + Sync {
    /// Return a time-limited URL for the object backing `image`.
    async fn resolve(&self, image: &ImageKey) -> Result<String, ImageResolverError>;
}
