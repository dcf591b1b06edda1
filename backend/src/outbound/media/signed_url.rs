//! HMAC-signed, time-limited image URLs.
//!
//! URLs take the form `{base_url}/{object_key}?expires=<unix>&signature=<hex>`
//! where the signature is HMAC-SHA256 over `"{object_key}\n{expires}"`. A
//! media proxy holding the same secret can verify them without shared state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use mockable::Clock;
use rand::RngCore;
use sha2::Sha256;
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::ImageKey;
use crate::domain::ports::{ImageResolver, ImageResolverError};

type HmacSha256 = Hmac<Sha256>;

const EPHEMERAL_SECRET_LEN: usize = 32;

/// Key material used to sign image URLs. Wiped from memory on drop.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Random secret valid for this process only.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(..)")
    }
}

/// Errors raised while building a [`SignedUrlImageResolver`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignedUrlConfigError {
    #[error("image base url is invalid: {message}")]
    InvalidBaseUrl { message: String },
    #[error("image base url cannot carry path segments: {url}")]
    CannotBeABase { url: String },
    #[error("image url ttl is out of range: {secs}s")]
    TtlOutOfRange { secs: u64 },
}

/// Resolver that signs URLs with a shared secret.
pub struct SignedUrlImageResolver {
    base_url: Url,
    secret: SigningSecret,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl SignedUrlImageResolver {
    /// Build a resolver rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` does not parse as an absolute URL that can carry
    /// path segments, or when `ttl` does not fit a Unix timestamp offset.
    pub fn new(
        base_url: &str,
        secret: SigningSecret,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SignedUrlConfigError> {
        let base_url = Url::parse(base_url).map_err(|err| SignedUrlConfigError::InvalidBaseUrl {
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SignedUrlConfigError::CannotBeABase {
                url: base_url.to_string(),
            });
        }
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| SignedUrlConfigError::TtlOutOfRange { secs: ttl.as_secs() })?;
        Ok(Self {
            base_url,
            secret,
            ttl_secs,
            clock,
        })
    }

    fn signature(&self, object_key: &str, expires: i64) -> Result<String, ImageResolverError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|err| ImageResolverError::backend(err.to_string()))?;
        mac.update(object_key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[async_trait]
impl ImageResolver for SignedUrlImageResolver {
    async fn resolve(&self, image: &ImageKey) -> Result<String, ImageResolverError> {
        let object_key = image.object_key();
        let expires = self
            .clock
            .utc()
            .timestamp()
            .checked_add(self.ttl_secs)
            .ok_or_else(|| ImageResolverError::backend("url expiry overflowed"))?;
        let signature = self.signature(&object_key, expires)?;

        let mut url = self.base_url.clone();
        {
            let Ok(mut segments) = url.path_segments_mut() else {
                warn!(key = %image, "image base url rejected path segments");
                return Err(ImageResolverError::invalid_key(image.as_str()));
            };
            segments.pop_if_empty().extend(object_key.split('/'));
        }
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    const NOW: i64 = 1_767_225_600;

    #[fixture]
    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: DateTime::from_timestamp(NOW, 0).expect("valid fixture timestamp"),
        })
    }

    fn resolver(base: &str, clock: Arc<dyn Clock>) -> SignedUrlImageResolver {
        SignedUrlImageResolver::new(
            base,
            SigningSecret::new(b"test-secret".to_vec()),
            Duration::from_secs(3600),
            clock,
        )
        .expect("valid resolver config")
    }

    fn expected_signature(payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(b"test-secret").expect("hmac accepts any key");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[rstest]
    #[tokio::test]
    async fn resolves_signed_url_for_object_key(clock: Arc<dyn Clock>) {
        let resolver = resolver("https://media.example.com/images", clock);
        let key = ImageKey::new("img1").expect("valid key");

        let url = resolver.resolve(&key).await.expect("url resolves");

        let expires = NOW + 3600;
        let signature = expected_signature(&format!("img1.jpeg\n{expires}"));
        assert_eq!(
            url,
            format!(
                "https://media.example.com/images/img1.jpeg?expires={expires}&signature={signature}"
            )
        );
    }

    #[rstest]
    #[tokio::test]
    async fn resolution_is_deterministic_for_fixed_clock(clock: Arc<dyn Clock>) {
        let resolver = resolver("https://media.example.com/images/", clock);
        let key = ImageKey::new("eiffel").expect("valid key");

        let first = resolver.resolve(&key).await.expect("url resolves");
        let second = resolver.resolve(&key).await.expect("url resolves");

        assert_eq!(first, second);
        assert!(first.starts_with("https://media.example.com/images/eiffel.jpeg?"));
    }

    #[rstest]
    #[tokio::test]
    async fn nested_keys_keep_their_path(clock: Arc<dyn Clock>) {
        let resolver = resolver("http://localhost:8080/images", clock);
        let key = ImageKey::new("paris/louvre").expect("valid key");

        let url = resolver.resolve(&key).await.expect("url resolves");

        assert!(url.starts_with("http://localhost:8080/images/paris/louvre.jpeg?expires="));
    }

    #[rstest]
    #[case("paris/louvre")]
    #[case("a.b/..c")]
    #[case("v1/.hidden/img")]
    #[tokio::test]
    async fn emitted_path_is_the_signed_key(clock: Arc<dyn Clock>, #[case] name: &str) {
        let resolver = resolver("http://localhost:8080/images", clock);
        let key = ImageKey::new(name).expect("valid key");

        let url = Url::parse(&resolver.resolve(&key).await.expect("url resolves"))
            .expect("resolver emits a valid url");

        let object_key = key.object_key();
        assert_eq!(url.path(), format!("/images/{object_key}"));
        let signature = url
            .query_pairs()
            .find(|(name, _)| name == "signature")
            .map(|(_, value)| value.into_owned());
        let expires = NOW + 3600;
        assert_eq!(
            signature,
            Some(expected_signature(&format!("{object_key}\n{expires}")))
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:media@example.com")]
    fn rejects_unusable_base_urls(clock: Arc<dyn Clock>, #[case] base: &str) {
        let result = SignedUrlImageResolver::new(
            base,
            SigningSecret::generate(),
            Duration::from_secs(60),
            clock,
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn secret_debug_output_is_redacted() {
        let secret = SigningSecret::new(b"hunter2".to_vec());
        assert_eq!(format!("{secret:?}"), "SigningSecret(..)");
    }
}
