//! Opaque continuation tokens.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Errors raised while encoding or decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token is not valid URL-safe base64.
    #[error("cursor is not valid base64")]
    InvalidEncoding,
    /// The decoded token does not describe a key of the expected shape.
    #[error("cursor payload is malformed: {message}")]
    MalformedPayload {
        /// Parser diagnostic.
        message: String,
    },
    /// The key could not be serialised.
    #[error("cursor key could not be serialised: {message}")]
    Serialize {
        /// Serialiser diagnostic.
        message: String,
    },
}

/// Continuation point within an ordered collection.
///
/// The cursor remembers the key of the last item a client received; the next
/// page starts strictly after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor<K> {
    #[serde(rename = "k")]
    key: K,
}

impl<K> Cursor<K> {
    /// Create a cursor positioned after `key`.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the key this cursor resumes after.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Consume the cursor, returning its key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Serialise the cursor into an opaque URL-safe token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Serialize`] when the key cannot be represented
    /// as JSON.
    pub fn encode(&self) -> Result<String, CursorError> {
        let payload = serde_json::to_vec(self).map_err(|err| CursorError::Serialize {
            message: err.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Parse a token previously produced by [`Cursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidEncoding`] for non-base64 input and
    /// [`CursorError::MalformedPayload`] when the payload does not match `K`.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let payload = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| CursorError::InvalidEncoding)?;
        serde_json::from_slice(&payload).map_err(|err| CursorError::MalformedPayload {
            message: err.to_string(),
        })
    }
}
