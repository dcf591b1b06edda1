//! User profile records maintained through idempotent upserts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when a write omits `userCategory`.
pub const DEFAULT_USER_CATEGORY: &str = "Rookie";

/// Validation errors returned when building user profile values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserProfileValidationError {
    /// A required field was absent or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },
}

/// Identifier supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserProfileId(String);

impl UserProfileId {
    /// Validate and wrap a user identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, UserProfileValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserProfileValidationError::MissingField { field: "userId" });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserProfileId> for String {
    fn from(value: UserProfileId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserProfileId {
    type Error = UserProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raw upsert fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileDraft {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub user_category: Option<String>,
}

/// Validated profile write.
///
/// An omitted or blank `user_category` resolves to
/// [`DEFAULT_USER_CATEGORY`] on both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileUpsert {
    user_id: UserProfileId,
    username: String,
    email: String,
    profile_picture: Option<String>,
    user_category: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, UserProfileValidationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(UserProfileValidationError::MissingField { field })
}

impl TryFrom<UserProfileDraft> for UserProfileUpsert {
    type Error = UserProfileValidationError;

    fn try_from(draft: UserProfileDraft) -> Result<Self, Self::Error> {
        let user_id = UserProfileId::new(required(draft.user_id, "userId")?)?;
        let username = required(draft.username, "username")?;
        let email = required(draft.email, "email")?;
        let user_category = draft
            .user_category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_CATEGORY.to_owned());

        Ok(Self {
            user_id,
            username,
            email,
            profile_picture: draft.profile_picture,
            user_category,
        })
    }
}

impl UserProfileUpsert {
    pub fn user_id(&self) -> &UserProfileId {
        &self.user_id
    }

    /// Build a fresh profile stamped with `now` for both timestamps.
    pub fn create(self, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            profile_picture: self.profile_picture,
            user_category: self.user_category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite `existing`, keeping its creation time.
    pub fn apply(self, existing: UserProfile, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            created_at: existing.created_at,
            updated_at: now,
            ..self.create(now)
        }
    }
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user_id: UserProfileId,
    username: String,
    email: String,
    profile_picture: Option<String>,
    user_category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Stored profile fields, used by adapters to rehydrate a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileRecord {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub user_category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Rebuild a profile from storage.
    pub fn restore(record: UserProfileRecord) -> Result<Self, UserProfileValidationError> {
        Ok(Self {
            user_id: UserProfileId::new(record.user_id)?,
            username: record.username,
            email: record.email,
            profile_picture: record.profile_picture,
            user_category: record.user_category,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn user_id(&self) -> &UserProfileId {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    pub fn user_category(&self) -> &str {
        self.user_category.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for profile validation and timestamps.
    use super::*;
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserProfileDraft {
        UserProfileDraft {
            user_id: Some("u1".to_owned()),
            username: Some("ada".to_owned()),
            email: Some("ada@example.com".to_owned()),
            profile_picture: None,
            user_category: None,
        }
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .expect("RFC3339 fixture timestamp")
            .with_timezone(&Utc)
    }

    #[rstest]
    fn create_sets_both_timestamps_and_default_category(draft: UserProfileDraft, now: DateTime<Utc>) {
        let upsert = UserProfileUpsert::try_from(draft).expect("valid draft");
        let profile = upsert.create(now);
        assert_eq!(profile.created_at(), now);
        assert_eq!(profile.updated_at(), now);
        assert_eq!(profile.user_category(), DEFAULT_USER_CATEGORY);
    }

    #[rstest]
    fn apply_keeps_created_at_and_resets_category(mut draft: UserProfileDraft, now: DateTime<Utc>) {
        draft.user_category = Some("Explorer".to_owned());
        let original = UserProfileUpsert::try_from(draft.clone())
            .expect("valid draft")
            .create(now);
        assert_eq!(original.user_category(), "Explorer");

        draft.user_category = None;
        draft.username = Some("ada-l".to_owned());
        let later = now + Duration::minutes(5);
        let updated = UserProfileUpsert::try_from(draft)
            .expect("valid draft")
            .apply(original, later);

        assert_eq!(updated.created_at(), now);
        assert_eq!(updated.updated_at(), later);
        assert_eq!(updated.username(), "ada-l");
        assert_eq!(updated.user_category(), DEFAULT_USER_CATEGORY);
    }

    #[rstest]
    #[case::user_id(|d: &mut UserProfileDraft| d.user_id = None, "userId")]
    #[case::username(|d: &mut UserProfileDraft| d.username = Some(" ".to_owned()), "username")]
    #[case::email(|d: &mut UserProfileDraft| d.email = None, "email")]
    fn missing_required_fields_are_reported(
        mut draft: UserProfileDraft,
        #[case] mutate: fn(&mut UserProfileDraft),
        #[case] field: &'static str,
    ) {
        mutate(&mut draft);
        assert_eq!(
            UserProfileUpsert::try_from(draft),
            Err(UserProfileValidationError::MissingField { field })
        );
    }
}
