//! Image URL resolvers.
//!
//! [`SignedUrlImageResolver`] signs URLs locally with HMAC-SHA256 and is the
//! default. With the `s3` feature enabled, [`S3ImageResolver`] presigns
//! `GetObject` requests against a bucket instead.

#[cfg(feature = "s3")]
mod s3;
mod signed_url;

#[cfg(feature = "s3")]
pub use s3::S3ImageResolver;
pub use signed_url::{SignedUrlConfigError, SignedUrlImageResolver, SigningSecret};
