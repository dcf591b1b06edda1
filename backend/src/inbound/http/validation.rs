//! Shared validation helpers for inbound HTTP adapters.

use pagination::{Cursor, PageSize};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidCursor,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidCursor => "invalid_cursor",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn invalid_value_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    let name = field.as_str();
    field_error(field, ErrorCode::InvalidValue, format!("{name} is invalid: {reason}"))
}

/// Return the trimmed-non-empty value or a `missing_field` error.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing_field_error(field)),
    }
}

/// Parse an optional `pageSize` query value, defaulting when absent.
pub(crate) fn parse_page_size(raw: Option<&str>, field: FieldName) -> Result<PageSize, Error> {
    raw.map_or(Ok(PageSize::default()), |raw| {
        PageSize::parse(raw).map_err(|err| invalid_value_error(field, err))
    })
}

/// Decode an optional continuation token.
pub(crate) fn parse_cursor(
    raw: Option<&str>,
    field: FieldName,
) -> Result<Option<Cursor<String>>, Error> {
    raw.map(|token| {
        Cursor::decode(token).map_err(|err| {
            field_error(
                field,
                ErrorCode::InvalidCursor,
                format!("{} is invalid: {err}", field.as_str()),
            )
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PAGE_SIZE: FieldName = FieldName::new("pageSize");
    const CURSOR: FieldName = FieldName::new("cursor");

    fn details_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(|code| code.as_str())
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_values_are_missing(#[case] value: Option<&str>) {
        let err = require_field(value.map(str::to_owned), FieldName::new("placeId"))
            .expect_err("blank is missing");
        assert_eq!(details_code(&err), Some("missing_field"));
        assert_eq!(err.message(), "missing required field: placeId");
    }

    #[rstest]
    #[case(None, 20)]
    #[case(Some("1"), 1)]
    #[case(Some("100"), 100)]
    #[case(Some("250"), 100)]
    #[case(Some("99999999999999999999"), 100)]
    fn page_size_defaults_and_clamps(#[case] raw: Option<&str>, #[case] expected: usize) {
        let size = parse_page_size(raw, PAGE_SIZE).expect("page size accepted");
        assert_eq!(size.get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("ten")]
    fn page_size_rejects_invalid_values(#[case] raw: &str) {
        let err = parse_page_size(Some(raw), PAGE_SIZE).expect_err("rejected");
        assert_eq!(details_code(&err), Some("invalid_value"));
    }

    #[rstest]
    fn cursor_round_trips() {
        let token = Cursor::new("eiffel".to_owned()).encode().expect("encodes");
        let cursor = parse_cursor(Some(&token), CURSOR)
            .expect("valid token")
            .expect("cursor present");
        assert_eq!(cursor.key(), "eiffel");
    }

    #[rstest]
    fn cursor_rejects_garbage() {
        let err = parse_cursor(Some("***"), CURSOR).expect_err("rejected");
        assert_eq!(details_code(&err), Some("invalid_cursor"));
    }
}
