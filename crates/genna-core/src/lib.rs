mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Column, ColumnType, Relation, RelationKind, Table, TableId};

/// A Result type alias that uses genna's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
