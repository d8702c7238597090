use super::Error;

/// Error when field deduplication could not find a free name.
///
/// Suffix probing is bounded by the number of fields in the table, so this
/// is unreachable for well-formed input. It is an internal defect, not a
/// recoverable condition.
#[derive(Debug)]
pub(super) struct NamingCollision {
    table: Box<str>,
    name: Box<str>,
}

impl std::error::Error for NamingCollision {}

impl core::fmt::Display for NamingCollision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "naming collision in {}: no free field name for `{}`",
            self.table, self.name
        )
    }
}

impl Error {
    /// Creates a naming collision error.
    pub fn naming_collision(table: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NamingCollision(NamingCollision {
            table: table.into().into(),
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a naming collision error.
    pub fn is_naming_collision(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NamingCollision(_)))
    }
}
