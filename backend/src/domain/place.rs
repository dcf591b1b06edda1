//! Place catalogue entities.
//!
//! Places are points of interest loaded out-of-band (bulk import) and read by
//! the request-handling core. Every constructor validates its input so a
//! `Place` value is always well formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ImageKey, ImageKeyValidationError};

/// Validation errors raised while building place values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceValidationError {
    /// The place identifier was empty or whitespace.
    #[error("place id must not be empty")]
    EmptyId,
    /// The place name was empty or whitespace.
    #[error("place name must not be empty")]
    EmptyName,
    /// The category was empty or whitespace.
    #[error("place category must not be empty")]
    EmptyCategory,
    /// Latitude is outside [-90, 90] or not finite.
    #[error("latitude {value} must be within [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// Longitude is outside [-180, 180] or not finite.
    #[error("longitude {value} must be within [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// The image name is not a usable media-store key.
    #[error("place image is invalid: {0}")]
    InvalidImage(#[from] ImageKeyValidationError),
}

/// Stable place identifier.
///
/// Identifiers come from the legacy landmark export and are opaque strings;
/// the only rule is that they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

impl PlaceId {
    /// Validate and construct a [`PlaceId`].
    pub fn new(id: impl Into<String>) -> Result<Self, PlaceValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PlaceValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PlaceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PlaceId> for String {
    fn from(value: PlaceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlaceId {
    type Error = PlaceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct coordinates.
    ///
    /// # Examples
    /// ```
    /// use fun_facts_backend::domain::Coordinates;
    ///
    /// assert!(Coordinates::new(48.8584, 2.2945).is_ok());
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PlaceValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PlaceValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(PlaceValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Unvalidated place fields, used by adapters and the importer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    pub id: String,
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<String>,
    pub like_count: u64,
}

/// A point of interest in the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    id: PlaceId,
    name: String,
    category: String,
    coordinates: Coordinates,
    image: Option<ImageKey>,
    like_count: u64,
}

impl Place {
    /// Validate a draft into a place.
    ///
    /// An `image`, when present, must be a valid [`ImageKey`].
    pub fn new(draft: PlaceDraft) -> Result<Self, PlaceValidationError> {
        let PlaceDraft {
            id,
            name,
            category,
            latitude,
            longitude,
            image,
            like_count,
        } = draft;

        let id = PlaceId::new(id)?;
        if name.trim().is_empty() {
            return Err(PlaceValidationError::EmptyName);
        }
        if category.trim().is_empty() {
            return Err(PlaceValidationError::EmptyCategory);
        }
        let coordinates = Coordinates::new(latitude, longitude)?;
        let image = image.map(ImageKey::new).transpose()?;

        Ok(Self {
            id,
            name,
            category,
            coordinates,
            image,
            like_count,
        })
    }

    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn image(&self) -> Option<&ImageKey> {
        self.image.as_ref()
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }
}
