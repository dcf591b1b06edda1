//! Bulk import of places from a legacy landmark export.
//!
//! The export is a JSON array of landmark documents. Only `id`, `name`,
//! `type`, `coordinates` and `image` are read; legacy bookkeeping fields such
//! as `l`, `g`, `likes` and `dislikes` are ignored and every imported place
//! starts with zero likes. Validation is all-or-nothing: the first invalid
//! record aborts the import before anything is written.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};
use crate::domain::{Place, PlaceDraft};

/// Errors raised while importing places.
#[derive(Debug, thiserror::Error)]
pub enum PlaceImportError {
    /// The export is not a JSON array of landmark objects.
    #[error("landmark export is not valid JSON: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },
    /// A landmark failed validation.
    #[error("landmark #{index} is invalid: {reason}")]
    InvalidRecord {
        /// Zero-based position of the record in the export.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },
    /// Writing the batch failed.
    #[error("failed to store imported places: {0}")]
    Repository(#[from] PlaceRepositoryError),
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceImportReport {
    /// Number of places written.
    pub imported: usize,
    /// Distinct categories among the imported places.
    pub categories: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self, axis: &str) -> Result<f64, String> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("{axis} {text:?} is not a number")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LandmarkCoordinates {
    latitude: Degrees,
    longitude: Degrees,
}

#[derive(Debug, Deserialize)]
struct LandmarkDocument {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    coordinates: Option<LandmarkCoordinates>,
    image: Option<String>,
}

impl LandmarkDocument {
    fn into_place(self) -> Result<Place, String> {
        let coordinates = self.coordinates.ok_or("coordinates are missing")?;
        let latitude = coordinates.latitude.value("latitude")?;
        let longitude = coordinates.longitude.value("longitude")?;
        Place::new(PlaceDraft {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            latitude,
            longitude,
            image: self.image,
            like_count: 0,
        })
        .map_err(|err| err.to_string())
    }
}

/// Parse and validate a landmark export.
///
/// # Examples
/// ```
/// use fun_facts_backend::domain::parse_landmark_export;
///
/// let places = parse_landmark_export(
///     r#"[{"id":"eiffel","name":"Eiffel Tower","type":"Monument",
///          "coordinates":{"latitude":"48.8584","longitude":2.2945},
///          "likes":12,"l":"x","g":"y"}]"#,
/// )
/// .expect("valid export");
/// assert_eq!(places.len(), 1);
/// assert_eq!(places[0].like_count(), 0);
/// ```
pub fn parse_landmark_export(json: &str) -> Result<Vec<Place>, PlaceImportError> {
    let documents: Vec<LandmarkDocument> =
        serde_json::from_str(json).map_err(|err| PlaceImportError::Parse {
            message: err.to_string(),
        })?;

    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            document
                .into_place()
                .map_err(|reason| PlaceImportError::InvalidRecord { index, reason })
        })
        .collect()
}

/// Writes validated places through a [`PlaceRepository`].
#[derive(Clone)]
pub struct PlaceImportService<R: ?Sized> {
    place_repo: Arc<R>,
}

impl<R> PlaceImportService<R>
where
    R: PlaceRepository + ?Sized,
{
    pub fn new(place_repo: Arc<R>) -> Self {
        Self { place_repo }
    }

    /// Parse `json` and upsert every place it describes.
    pub async fn import_json(&self, json: &str) -> Result<PlaceImportReport, PlaceImportError> {
        let places = parse_landmark_export(json)?;
        self.import(places).await
    }

    /// Upsert already validated places.
    pub async fn import(&self, places: Vec<Place>) -> Result<PlaceImportReport, PlaceImportError> {
        let categories: BTreeSet<String> = places
            .iter()
            .map(|place| place.category().to_owned())
            .collect();
        let imported = self.place_repo.upsert_batch(&places).await?;
        info!(imported, categories = ?categories, "places imported");
        Ok(PlaceImportReport {
            imported,
            categories,
        })
    }
}
