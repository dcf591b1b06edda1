//! Image references stored on places and facts.

use serde::{Deserialize, Serialize};

/// File extension appended to stored image names to form the object key.
pub const IMAGE_OBJECT_EXTENSION: &str = "jpeg";

/// Validation errors for [`ImageKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageKeyValidationError {
    /// The image name was empty or whitespace.
    #[error("image name must not be empty")]
    Empty,
    /// The image name contains control characters.
    #[error("image name must not contain control characters")]
    ControlCharacters,
    /// A `/`-separated segment is empty, `.` or `..`.
    #[error("image name segment {segment:?} is not allowed")]
    PathSegment {
        /// Offending segment.
        segment: String,
    },
}

/// Name of an image in the media store, without its extension.
///
/// ## Invariants
/// - Non-empty after trimming.
/// - No control characters, so the derived object key is printable.
/// - No empty, `.` or `..` segments, so URL builders keep the path intact.
///
/// # Examples
/// ```
/// use fun_facts_backend::domain::ImageKey;
///
/// let key = ImageKey::new("eiffel-tower").expect("valid image name");
/// assert_eq!(key.object_key(), "eiffel-tower.jpeg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageKey(String);

impl ImageKey {
    /// Validate and construct an image key.
    pub fn new(name: impl Into<String>) -> Result<Self, ImageKeyValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ImageKeyValidationError::Empty);
        }
        if name.chars().any(char::is_control) {
            return Err(ImageKeyValidationError::ControlCharacters);
        }
        if let Some(segment) = name
            .split('/')
            .find(|segment| segment.is_empty() || *segment == "." || *segment == "..")
        {
            return Err(ImageKeyValidationError::PathSegment {
                segment: segment.to_owned(),
            });
        }
        Ok(Self(name))
    }

    /// Stored image name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Object key in the media store.
    pub fn object_key(&self) -> String {
        format!("{}.{IMAGE_OBJECT_EXTENSION}", self.0)
    }
}

impl AsRef<str> for ImageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ImageKey> for String {
    fn from(value: ImageKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageKey {
    type Error = ImageKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("img1", "img1.jpeg")]
    #[case("Big Ben", "Big Ben.jpeg")]
    #[case("landmarks/colosseum", "landmarks/colosseum.jpeg")]
    #[case("a.b/..c", "a.b/..c.jpeg")]
    fn object_key_appends_extension(#[case] name: &str, #[case] expected: &str) {
        let key = ImageKey::new(name).expect("valid image name");
        assert_eq!(key.object_key(), expected);
    }

    #[rstest]
    #[case("", ImageKeyValidationError::Empty)]
    #[case("   ", ImageKeyValidationError::Empty)]
    #[case("line\nbreak", ImageKeyValidationError::ControlCharacters)]
    #[case("tab\there", ImageKeyValidationError::ControlCharacters)]
    #[case("a/../img0", ImageKeyValidationError::PathSegment { segment: "..".to_owned() })]
    #[case("./img0", ImageKeyValidationError::PathSegment { segment: ".".to_owned() })]
    #[case("/img0", ImageKeyValidationError::PathSegment { segment: String::new() })]
    #[case("a//img0", ImageKeyValidationError::PathSegment { segment: String::new() })]
    #[case("img0/", ImageKeyValidationError::PathSegment { segment: String::new() })]
    fn rejects_invalid_names(#[case] name: &str, #[case] expected: ImageKeyValidationError) {
        assert_eq!(ImageKey::new(name), Err(expected));
    }
}
