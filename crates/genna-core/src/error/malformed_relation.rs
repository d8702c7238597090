use super::Error;

/// Error when a foreign key cannot be turned into a relation.
///
/// The source and target column lists of a foreign key must be non-empty
/// and of equal length. A junction declaration must consist of two foreign
/// keys leaving the same table. Malformed relations are fatal configuration
/// errors and are never retried.
#[derive(Debug)]
pub(super) struct MalformedRelation {
    table: Box<str>,
    detail: Detail,
}

#[derive(Debug)]
enum Detail {
    ColumnCount { source: usize, target: usize },
    Junction { left: Box<str>, right: Box<str> },
}

impl std::error::Error for MalformedRelation {}

impl core::fmt::Display for MalformedRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.detail {
            Detail::ColumnCount { source, target } => write!(
                f,
                "malformed relation on {}: {} source column(s) but {} target column(s)",
                self.table, source, target
            ),
            Detail::Junction { left, right } => write!(
                f,
                "malformed junction {}: foreign keys leave {} and {}",
                self.table, left, right
            ),
        }
    }
}

impl Error {
    /// Creates a malformed relation error for a column count mismatch.
    pub fn malformed_relation(table: impl Into<String>, source: usize, target: usize) -> Error {
        Error::from(super::ErrorKind::MalformedRelation(MalformedRelation {
            table: table.into().into(),
            detail: Detail::ColumnCount { source, target },
        }))
    }

    /// Creates a malformed relation error for a junction whose foreign keys
    /// do not share a source table.
    pub fn malformed_junction(
        junction: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::MalformedRelation(MalformedRelation {
            table: junction.into().into(),
            detail: Detail::Junction {
                left: left.into().into(),
                right: right.into().into(),
            },
        }))
    }

    /// Returns `true` if this error is a malformed relation error.
    pub fn is_malformed_relation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MalformedRelation(_)))
    }
}
