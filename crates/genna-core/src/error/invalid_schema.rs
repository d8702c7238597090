use super::Error;

/// Error when the introspected schema facts are inconsistent.
///
/// This occurs when:
/// - Two tables share the same `(schema, name)` identity
/// - A foreign-key column is claimed by more than one outgoing relation
/// - A snapshot references a table or column that does not exist
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
