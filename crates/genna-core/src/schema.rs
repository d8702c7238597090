mod column;
pub use column::Column;

pub mod name;

pub mod relation;
pub use relation::{ColumnSet, ForeignKey, Junction, Relation, RelationKind, Through};

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::ColumnType;

/// Schema assumed for unqualified table names.
pub const PUBLIC_SCHEMA: &str = "public";
