//! Facts submitted about places and their moderation workflow.
//!
//! A fact is created `pending` and moves exactly once to `approved` or
//! `rejected`. The moderation outcome and the moderator who produced it are
//! modelled as one enum, [`Approval`], so a fact can never carry both an
//! approver and a rejecter, nor a moderator while still pending.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ImageKey, PlaceId};

/// Validation errors raised while building facts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactValidationError {
    /// A required field was absent or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
    /// A field was present but malformed.
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        /// Wire name of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Stored moderation columns contradict each other.
    #[error("inconsistent moderation record: {reason}")]
    InconsistentModeration {
        /// Description of the contradiction.
        reason: String,
    },
}

/// Raised when a moderation decision is applied to a fact that is not pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fact has already been {current}")]
pub struct FactTransitionError {
    /// State the fact is already in.
    pub current: ApprovalState,
}

/// Identifier of a fact, unique within its place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(String);

impl FactId {
    /// Validate and wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, FactValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(FactValidationError::MissingField { field: "factId" });
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier for a new submission.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Moderation stage of a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalState {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown approval state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approval state: {0}")]
pub struct ParseApprovalStateError(pub String);

impl FromStr for ApprovalState {
    type Err = ParseApprovalStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseApprovalStateError(other.to_owned())),
        }
    }
}

/// Outcome a moderator may choose for a pending fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationDecision {
    Approved,
    Rejected,
}

impl FromStr for ModerationDecision {
    type Err = ParseApprovalStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseApprovalStateError(other.to_owned())),
        }
    }
}

/// Moderation status together with the moderator responsible for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    Pending,
    Approved { moderator: String },
    Rejected { moderator: String },
}

impl Approval {
    /// Coarse state without the moderator.
    pub fn state(&self) -> ApprovalState {
        match self {
            Self::Pending => ApprovalState::Pending,
            Self::Approved { .. } => ApprovalState::Approved,
            Self::Rejected { .. } => ApprovalState::Rejected,
        }
    }

    /// Apply a decision. Only `pending` accepts one.
    ///
    /// # Examples
    /// ```
    /// use fun_facts_backend::domain::{Approval, ApprovalState, ModerationDecision};
    ///
    /// let approved = Approval::Pending
    ///     .decide(ModerationDecision::Approved, "mod-1".to_owned())
    ///     .expect("pending facts accept a decision");
    /// assert_eq!(approved.state(), ApprovalState::Approved);
    ///
    /// let again = approved.decide(ModerationDecision::Rejected, "mod-2".to_owned());
    /// assert!(again.is_err());
    /// ```
    pub fn decide(
        &self,
        decision: ModerationDecision,
        moderator: String,
    ) -> Result<Self, FactTransitionError> {
        match self {
            Self::Pending => Ok(match decision {
                ModerationDecision::Approved => Self::Approved { moderator },
                ModerationDecision::Rejected => Self::Rejected { moderator },
            }),
            other => Err(FactTransitionError {
                current: other.state(),
            }),
        }
    }

    /// Rebuild from the stored state and nullable moderator columns.
    pub fn from_columns(
        state: ApprovalState,
        approved_by: Option<String>,
        rejected_by: Option<String>,
    ) -> Result<Self, FactValidationError> {
        let inconsistent = |reason: &str| FactValidationError::InconsistentModeration {
            reason: reason.to_owned(),
        };
        match (state, approved_by, rejected_by) {
            (ApprovalState::Pending, None, None) => Ok(Self::Pending),
            (ApprovalState::Approved, Some(moderator), None) => Ok(Self::Approved { moderator }),
            (ApprovalState::Rejected, None, Some(moderator)) => Ok(Self::Rejected { moderator }),
            (ApprovalState::Pending, _, _) => Err(inconsistent("pending fact has a moderator")),
            (ApprovalState::Approved, _, _) => {
                Err(inconsistent("approved fact must name only an approver"))
            }
            (ApprovalState::Rejected, _, _) => {
                Err(inconsistent("rejected fact must name only a rejecter"))
            }
        }
    }

    /// Decision and moderator for a decided approval, `None` while pending.
    pub fn decision(&self) -> Option<(ModerationDecision, &str)> {
        match self {
            Self::Pending => None,
            Self::Approved { moderator } => Some((ModerationDecision::Approved, moderator.as_str())),
            Self::Rejected { moderator } => Some((ModerationDecision::Rejected, moderator.as_str())),
        }
    }

    pub fn approved_by(&self) -> Option<&str> {
        match self {
            Self::Approved { moderator } => Some(moderator.as_str()),
            _ => None,
        }
    }

    pub fn rejected_by(&self) -> Option<&str> {
        match self {
            Self::Rejected { moderator } => Some(moderator.as_str()),
            _ => None,
        }
    }
}

/// Raw submission fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSubmissionDraft {
    pub place_id: Option<String>,
    pub submitted_by: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source: Option<String>,
}

/// Validated submission, ready to become a pending fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSubmission {
    place_id: PlaceId,
    submitted_by: String,
    description: String,
    image: ImageKey,
    tags: BTreeSet<String>,
    source: String,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, FactValidationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(FactValidationError::MissingField { field })
}

impl TryFrom<FactSubmissionDraft> for FactSubmission {
    type Error = FactValidationError;

    fn try_from(draft: FactSubmissionDraft) -> Result<Self, Self::Error> {
        let place_id = PlaceId::new(required_text(draft.place_id, "placeId")?).map_err(|err| {
            FactValidationError::InvalidField {
                field: "placeId",
                reason: err.to_string(),
            }
        })?;
        let submitted_by = required_text(draft.submitted_by, "submittedBy")?;
        let description = required_text(draft.description, "description")?;
        let image = ImageKey::new(required_text(draft.image, "image")?).map_err(|err| {
            FactValidationError::InvalidField {
                field: "image",
                reason: err.to_string(),
            }
        })?;
        let raw_tags = draft
            .tags
            .ok_or(FactValidationError::MissingField { field: "tags" })?;
        let source = required_text(draft.source, "source")?;

        let tags = raw_tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            place_id,
            submitted_by,
            description,
            image,
            tags,
            source,
        })
    }
}

impl FactSubmission {
    pub fn place_id(&self) -> &PlaceId {
        &self.place_id
    }
}

/// Stored fact fields, used by adapters to rehydrate a [`Fact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRecord {
    pub place_id: String,
    pub fact_id: String,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub like_count: u64,
    pub dislike_count: u64,
    pub approval_state: ApprovalState,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
}

/// A fact about a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    place_id: PlaceId,
    fact_id: FactId,
    submitted_by: String,
    created_at: DateTime<Utc>,
    description: String,
    like_count: u64,
    dislike_count: u64,
    approval: Approval,
    image: Option<ImageKey>,
    tags: BTreeSet<String>,
    source: String,
}

impl Fact {
    /// Create a pending fact from a validated submission.
    pub fn submit(submission: FactSubmission, fact_id: FactId, created_at: DateTime<Utc>) -> Self {
        let FactSubmission {
            place_id,
            submitted_by,
            description,
            image,
            tags,
            source,
        } = submission;
        Self {
            place_id,
            fact_id,
            submitted_by,
            created_at,
            description,
            like_count: 0,
            dislike_count: 0,
            approval: Approval::Pending,
            image: Some(image),
            tags,
            source,
        }
    }

    /// Rebuild a fact from storage, validating cross-field invariants.
    pub fn restore(record: FactRecord) -> Result<Self, FactValidationError> {
        let FactRecord {
            place_id,
            fact_id,
            submitted_by,
            created_at,
            description,
            like_count,
            dislike_count,
            approval_state,
            approved_by,
            rejected_by,
            image,
            tags,
            source,
        } = record;

        let place_id = PlaceId::new(place_id).map_err(|err| FactValidationError::InvalidField {
            field: "placeId",
            reason: err.to_string(),
        })?;
        let fact_id = FactId::new(fact_id)?;
        let approval = Approval::from_columns(approval_state, approved_by, rejected_by)?;
        let image = image
            .map(ImageKey::new)
            .transpose()
            .map_err(|err| FactValidationError::InvalidField {
                field: "image",
                reason: err.to_string(),
            })?;

        Ok(Self {
            place_id,
            fact_id,
            submitted_by,
            created_at,
            description,
            like_count,
            dislike_count,
            approval,
            image,
            tags: tags.into_iter().collect(),
            source,
        })
    }

    /// Apply a moderation decision, consuming the pending fact.
    pub fn moderate(
        mut self,
        decision: ModerationDecision,
        moderator: String,
    ) -> Result<Self, FactTransitionError> {
        self.approval = self.approval.decide(decision, moderator)?;
        Ok(self)
    }

    pub fn place_id(&self) -> &PlaceId {
        &self.place_id
    }

    pub fn fact_id(&self) -> &FactId {
        &self.fact_id
    }

    pub fn submitted_by(&self) -> &str {
        self.submitted_by.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn dislike_count(&self) -> u64 {
        self.dislike_count
    }

    pub fn approval(&self) -> &Approval {
        &self.approval
    }

    pub fn approval_state(&self) -> ApprovalState {
        self.approval.state()
    }

    pub fn image(&self) -> Option<&ImageKey> {
        self.image.as_ref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }
}
