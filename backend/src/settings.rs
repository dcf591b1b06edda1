//! Application settings loaded via OrthoConfig.
//!
//! Values layer as CLI flags over `FUNFACTS_*` environment variables over a
//! configuration file. Unset optional values fall back to the defaults
//! exposed by the accessor methods.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::domain::ports::DEFAULT_IMAGE_URL_TTL_SECS;
use crate::outbound::media::SigningSecret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8080/images";
const DEFAULT_IMAGE_BUCKET: &str = "fun-facts-images";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind_addr is not a socket address: {value}")]
    InvalidBindAddr { value: String },
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
    #[error("image_signing_secret must be set in release builds")]
    MissingSigningSecret,
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FUNFACTS")]
pub struct AppSettings {
    /// HTTP listener address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory repositories are used when unset.
    pub database_url: Option<String>,
    /// Connection pool size.
    pub db_max_connections: Option<u32>,
    /// Landmark export to import into the place repository at startup.
    pub places_seed_path: Option<PathBuf>,
    /// List only approved facts.
    #[ortho_config(default = false)]
    pub facts_approved_only: bool,
    /// Base URL for signed image links.
    pub image_base_url: Option<String>,
    /// HMAC key for signed image links.
    pub image_signing_secret: Option<String>,
    /// Lifetime of resolved image URLs, in seconds.
    pub image_url_ttl_secs: Option<u64>,
    /// Bucket holding images when S3 presigning is enabled.
    pub image_bucket: Option<String>,
}

impl AppSettings {
    /// Listener address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }

    pub fn image_base_url(&self) -> &str {
        self.image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    pub fn image_url_ttl(&self) -> Duration {
        Duration::from_secs(
            self.image_url_ttl_secs
                .unwrap_or(DEFAULT_IMAGE_URL_TTL_SECS),
        )
    }

    pub fn image_bucket(&self) -> &str {
        self.image_bucket.as_deref().unwrap_or(DEFAULT_IMAGE_BUCKET)
    }

    /// Signing key for image URLs.
    ///
    /// Debug builds fall back to a random per-process secret so local runs
    /// work without configuration; release builds refuse to start.
    pub fn signing_secret(&self) -> Result<SigningSecret, SettingsError> {
        resolve_signing_secret(
            self.image_signing_secret.as_deref(),
            cfg!(debug_assertions),
        )
    }
}

fn resolve_signing_secret(
    configured: Option<&str>,
    allow_ephemeral: bool,
) -> Result<SigningSecret, SettingsError> {
    match configured.filter(|secret| !secret.is_empty()) {
        Some(secret) => Ok(SigningSecret::new(secret.as_bytes().to_vec())),
        None if allow_ephemeral => {
            warn!("image_signing_secret not set; using an ephemeral secret for this process");
            Ok(SigningSecret::generate())
        }
        None => Err(SettingsError::MissingSigningSecret),
    }
}

#[cfg(test)]
mod tests {
    //! Settings parsing and default resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "FUNFACTS_BIND_ADDR",
        "FUNFACTS_DATABASE_URL",
        "FUNFACTS_DB_MAX_CONNECTIONS",
        "FUNFACTS_PLACES_SEED_PATH",
        "FUNFACTS_FACTS_APPROVED_ONLY",
        "FUNFACTS_IMAGE_BASE_URL",
        "FUNFACTS_IMAGE_SIGNING_SECRET",
        "FUNFACTS_IMAGE_URL_TTL_SECS",
        "FUNFACTS_IMAGE_BUCKET",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("fun-facts-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), Ok(10));
        assert!(settings.places_seed_path.is_none());
        assert!(!settings.facts_approved_only);
        assert_eq!(settings.image_base_url(), "http://localhost:8080/images");
        assert_eq!(settings.image_url_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.image_bucket(), "fun-facts-images");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FUNFACTS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "FUNFACTS_DATABASE_URL",
                Some("postgres://localhost/funfacts".to_owned()),
            ),
            ("FUNFACTS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (
                "FUNFACTS_PLACES_SEED_PATH",
                Some("/tmp/landmarks.json".to_owned()),
            ),
            ("FUNFACTS_FACTS_APPROVED_ONLY", Some("true".to_owned())),
            (
                "FUNFACTS_IMAGE_BASE_URL",
                Some("https://cdn.example.com/img".to_owned()),
            ),
            ("FUNFACTS_IMAGE_SIGNING_SECRET", Some("s3cret".to_owned())),
            ("FUNFACTS_IMAGE_URL_TTL_SECS", Some("60".to_owned())),
            ("FUNFACTS_IMAGE_BUCKET", Some("landmark-photos".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/funfacts")
        );
        assert_eq!(settings.db_max_connections(), Ok(4));
        assert_eq!(
            settings.places_seed_path,
            Some(PathBuf::from("/tmp/landmarks.json"))
        );
        assert!(settings.facts_approved_only);
        assert_eq!(settings.image_base_url(), "https://cdn.example.com/img");
        assert_eq!(settings.image_url_ttl(), Duration::from_secs(60));
        assert_eq!(settings.image_bucket(), "landmark-photos");
        assert!(settings.signing_secret().is_ok());
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env([
            ("FUNFACTS_BIND_ADDR", Some("not-an-address".to_owned())),
            ("FUNFACTS_DB_MAX_CONNECTIONS", Some("0".to_owned())),
            ("FUNFACTS_DATABASE_URL", Some("   ".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
        assert_eq!(
            settings.db_max_connections(),
            Err(SettingsError::ZeroConnections)
        );
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    #[case(Some("key"), false, true)]
    #[case(Some(""), false, false)]
    #[case(None, false, false)]
    #[case(None, true, true)]
    fn signing_secret_requires_configuration_in_release(
        #[case] configured: Option<&str>,
        #[case] allow_ephemeral: bool,
        #[case] accepted: bool,
    ) {
        let result = resolve_signing_secret(configured, allow_ephemeral);
        assert_eq!(result.is_ok(), accepted);
        if !accepted {
            assert!(matches!(result, Err(SettingsError::MissingSigningSecret)));
        }
    }
}
