//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Place catalogue, keyed by the legacy landmark id.
    places (id) {
        id -> Text,
        name -> Text,
        category -> Text,
        latitude -> Float8,
        longitude -> Float8,
        /// Image name without extension.
        image -> Nullable<Text>,
        like_count -> Int8,
    }
}

diesel::table! {
    /// Submitted facts. `approved_by` / `rejected_by` are constrained to match
    /// `approval_state`.
    facts (place_id, fact_id) {
        place_id -> Text,
        fact_id -> Text,
        submitted_by -> Text,
        created_at -> Timestamptz,
        description -> Text,
        like_count -> Int8,
        dislike_count -> Int8,
        approval_state -> Text,
        approved_by -> Nullable<Text>,
        rejected_by -> Nullable<Text>,
        image -> Nullable<Text>,
        tags -> Array<Text>,
        source -> Text,
    }
}

diesel::table! {
    /// User profile metadata.
    user_profiles (user_id) {
        user_id -> Text,
        username -> Text,
        email -> Text,
        profile_picture -> Nullable<Text>,
        user_category -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(places, facts, user_profiles);
