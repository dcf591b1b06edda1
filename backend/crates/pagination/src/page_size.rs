//! Client-supplied page-size normalisation.

use std::num::IntErrorKind;

/// Errors raised when a page size cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageSizeError {
    /// The value is not an integer.
    #[error("page size must be an integer")]
    NotAnInteger,
    /// The value is below one.
    #[error("page size must be at least 1")]
    TooSmall,
}

/// Number of items requested for one page.
///
/// Values above [`PageSize::MAX`] are clamped rather than rejected so that
/// generous clients still receive a bounded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Page size used when the client does not specify one.
    pub const DEFAULT: Self = Self(20);
    /// Largest page size a single request may return.
    pub const MAX: usize = 100;

    /// Build a page size from a numeric value, clamping it to [`Self::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::TooSmall`] when `value` is zero.
    pub const fn new(value: usize) -> Result<Self, PageSizeError> {
        if value == 0 {
            return Err(PageSizeError::TooSmall);
        }
        if value > Self::MAX {
            Ok(Self(Self::MAX))
        } else {
            Ok(Self(value))
        }
    }

    /// Parse a query-string value.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::NotAnInteger`] for non-numeric input and
    /// [`PageSizeError::TooSmall`] for zero or negative values. Integers too
    /// large for any numeric type still clamp to [`Self::MAX`].
    pub fn parse(raw: &str) -> Result<Self, PageSizeError> {
        let value: i64 = match raw.trim().parse() {
            Ok(value) => value,
            Err(err) => {
                return match err.kind() {
                    IntErrorKind::PosOverflow => Ok(Self(Self::MAX)),
                    IntErrorKind::NegOverflow => Err(PageSizeError::TooSmall),
                    _ => Err(PageSizeError::NotAnInteger),
                };
            }
        };
        if value < 1 {
            return Err(PageSizeError::TooSmall);
        }
        let bounded = usize::try_from(value).unwrap_or(Self::MAX);
        Self::new(bounded)
    }

    /// Number of items in a full page.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    //! Page-size parsing and clamping.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("20", 20)]
    #[case("100", 100)]
    #[case("101", 100)]
    #[case("9999999999999", 100)]
    #[case("99999999999999999999", 100)]
    #[case("+12", 12)]
    #[case(" 7 ", 7)]
    fn parse_accepts_and_clamps(#[case] raw: &str, #[case] expected: usize) {
        assert_eq!(PageSize::parse(raw).map(PageSize::get), Ok(expected));
    }

    #[rstest]
    #[case("0", PageSizeError::TooSmall)]
    #[case("-3", PageSizeError::TooSmall)]
    #[case("-99999999999999999999", PageSizeError::TooSmall)]
    #[case("abc", PageSizeError::NotAnInteger)]
    #[case("2.5", PageSizeError::NotAnInteger)]
    #[case("", PageSizeError::NotAnInteger)]
    fn parse_rejects_invalid_values(#[case] raw: &str, #[case] expected: PageSizeError) {
        assert_eq!(PageSize::parse(raw), Err(expected));
    }

    #[rstest]
    fn default_is_twenty() {
        assert_eq!(PageSize::default().get(), 20);
    }
}
