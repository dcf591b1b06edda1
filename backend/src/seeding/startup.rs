//! Startup import of a landmark export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::PlaceRepository;
use crate::domain::{PlaceImportError, PlaceImportReport, PlaceImportService};

/// Errors returned while seeding places.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The export file could not be read.
    #[error("failed to read landmark export at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Parsing, validation or the repository write failed.
    #[error("place import failed: {0}")]
    Import(#[from] PlaceImportError),
}

/// Read a landmark export as UTF-8 text.
pub fn read_landmark_export(path: &Path) -> Result<String, SeedingError> {
    let read_error = |source| SeedingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "landmark export path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}

/// Import `seed_path` into `repository` when a path is configured.
///
/// Returns `Ok(None)` when seeding is not configured.
pub async fn seed_places_on_startup<R>(
    seed_path: Option<&Path>,
    repository: Arc<R>,
) -> Result<Option<PlaceImportReport>, SeedingError>
where
    R: PlaceRepository + ?Sized,
{
    let Some(path) = seed_path else {
        info!(reason = "not configured", "place seeding skipped");
        return Ok(None);
    };

    let contents = read_landmark_export(path)?;
    let report = PlaceImportService::new(repository)
        .import_json(&contents)
        .await?;
    info!(
        path = %path.display(),
        imported = report.imported,
        categories = report.categories.len(),
        "places seeded"
    );
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PlaceRepository;
    use crate::outbound::memory::InMemoryPlaceRepository;
    use rstest::rstest;
    use std::io::Write;

    const EXPORT: &str = r#"[
        {"id": "eiffel", "name": "Eiffel Tower", "type": "Monument",
         "coordinates": {"latitude": 48.8584, "longitude": "2.2945"},
         "image": "eiffel", "likes": 12, "g": "u09tunq"},
        {"id": "louvre", "name": "Louvre", "type": "Museum",
         "coordinates": {"latitude": "48.8606", "longitude": 2.3376}}
    ]"#;

    fn export_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write export");
        file
    }

    #[rstest]
    #[tokio::test]
    async fn skips_when_unconfigured() {
        let repo = Arc::new(InMemoryPlaceRepository::default());
        let outcome = seed_places_on_startup(None, repo.clone())
            .await
            .expect("skip succeeds");
        assert!(outcome.is_none());
        assert!(repo.list(None, 10).await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn imports_configured_export() {
        let file = export_file(EXPORT);
        let repo = Arc::new(InMemoryPlaceRepository::default());

        let report = seed_places_on_startup(Some(file.path()), repo.clone())
            .await
            .expect("seeding succeeds")
            .expect("report present");

        assert_eq!(report.imported, 2);
        assert_eq!(report.categories.len(), 2);
        let places = repo.list(None, 10).await.expect("list");
        assert_eq!(places.len(), 2);
        assert!(places.iter().all(|place| place.like_count() == 0));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");
        let repo = Arc::new(InMemoryPlaceRepository::default());

        let err = seed_places_on_startup(Some(&path), repo)
            .await
            .expect_err("missing file fails");
        assert!(matches!(err, SeedingError::Read { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_export_writes_nothing() {
        let file = export_file(
            r#"[{"id": "x", "name": "X", "type": "Y", "coordinates": {"latitude": 91, "longitude": 0}}]"#,
        );
        let repo = Arc::new(InMemoryPlaceRepository::default());

        let err = seed_places_on_startup(Some(file.path()), repo.clone())
            .await
            .expect_err("out of range latitude");
        assert!(matches!(
            err,
            SeedingError::Import(PlaceImportError::InvalidRecord { index: 0, .. })
        ));
        assert!(repo.list(None, 10).await.expect("list").is_empty());
    }
}
