//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for places, facts and user
//! profiles, the ports adapters implement, and the services that enforce the
//! moderation and upsert rules. Types validate on construction so invalid
//! values never reach persistence.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable code.
//! - Place, Fact, UserProfile: catalogue, submission and profile entities.
//! - Approval: the pending to approved/rejected state machine.
//! - FactService, PlaceCatalogService, UserDirectoryService,
//!   PlaceImportService: driving-port implementations.

pub mod error;
pub mod fact;
pub mod fact_service;
mod image;
pub(crate) mod image_urls;
pub mod place;
pub mod place_catalog_service;
pub mod place_import;
pub mod ports;
pub mod trace_id;
pub mod user_directory_service;
pub mod user_profile;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fact::{
    Approval, ApprovalState, Fact, FactId, FactRecord, FactSubmission, FactSubmissionDraft,
    FactTransitionError, FactValidationError, ModerationDecision, ParseApprovalStateError,
};
pub use self::fact_service::FactService;
pub use self::image::{IMAGE_OBJECT_EXTENSION, ImageKey, ImageKeyValidationError};
pub use self::place::{Coordinates, Place, PlaceDraft, PlaceId, PlaceValidationError};
pub use self::place_catalog_service::PlaceCatalogService;
pub use self::place_import::{
    PlaceImportError, PlaceImportReport, PlaceImportService, parse_landmark_export,
};
pub use self::trace_id::TraceId;
pub use self::user_directory_service::UserDirectoryService;
pub use self::user_profile::{
    DEFAULT_USER_CATEGORY, UserProfile, UserProfileDraft, UserProfileId, UserProfileRecord,
    UserProfileUpsert, UserProfileValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use fun_facts_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such place"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
