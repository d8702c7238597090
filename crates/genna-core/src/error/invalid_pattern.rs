use super::Error;

/// Error when a table-selection pattern cannot be parsed.
///
/// Patterns have the form `schema.table` where either segment may be `*`.
/// A pattern that matches nothing is not an error; only a pattern with an
/// unparseable shape (for example more than one `.`) is.
#[derive(Debug)]
pub(super) struct InvalidPattern {
    pattern: Box<str>,
}

impl std::error::Error for InvalidPattern {}

impl core::fmt::Display for InvalidPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid table pattern `{}`: expected `schema.table`",
            self.pattern
        )
    }
}

impl Error {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPattern(InvalidPattern {
            pattern: pattern.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid pattern error.
    pub fn is_invalid_pattern(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidPattern(_)))
    }
}
