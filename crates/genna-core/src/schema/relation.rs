mod build;
pub use build::{build, build_all, build_inverse, build_many_to_many};

use super::{name, TableId};

use serde::{Deserialize, Serialize};

/// A directed association from a set of source columns to a set of target
/// columns.
///
/// Built once from a [`ForeignKey`] or [`Junction`] by the functions in this
/// module. The `kind` is decided at construction time and is the only
/// cardinality information downstream stages consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,

    /// The table owning the generated field, and the columns on it that
    /// take part in the join
    pub source: ColumnSet,

    /// The related table and its joined columns
    pub target: ColumnSet,

    /// Name of the generated field, before deduplication
    pub field_name: String,

    /// True if the relation is the referenced side of a foreign key, so
    /// its source columns do not reference anything
    #[serde(default)]
    pub inverse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelationKind {
    /// At most one target row: child to parent, or one-to-one.
    HasOne,

    /// Any number of target rows referencing the source.
    HasMany,

    /// Any number of target rows, linked through a junction table.
    ManyToMany(Through),
}

/// The junction table of a many-to-many relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Through {
    pub table: TableId,

    /// Junction columns referencing the relation's source
    pub source_columns: Vec<String>,

    /// Junction columns referencing the relation's target
    pub target_columns: Vec<String>,
}

/// One end of a relation: a table and an ordered list of its columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSet {
    #[serde(flatten)]
    pub table: TableId,

    pub columns: Vec<String>,
}

/// A foreign key constraint as reported by introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// The referencing table and columns
    pub source: ColumnSet,

    /// The referenced table and columns
    pub target: ColumnSet,

    /// True if the source columns are exactly the source table's primary key
    #[serde(default)]
    pub source_is_primary_key: bool,

    /// True if the target columns are exactly the target table's primary key
    #[serde(default = "default_true")]
    pub target_is_primary_key: bool,

    /// Also emit the relation on the referenced table
    #[serde(default)]
    pub bidirectional: bool,
}

/// An explicit many-to-many declaration: a linking table with one foreign
/// key to each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub left: ForeignKey,

    pub right: ForeignKey,

    /// Also emit the relation on the right-hand table
    #[serde(default)]
    pub bidirectional: bool,
}

fn default_true() -> bool {
    true
}

impl Relation {
    /// True if the relation joins a table to itself.
    pub fn is_self_referencing(&self) -> bool {
        self.source.table == self.target.table
    }

    pub fn is_has_one(&self) -> bool {
        matches!(self.kind, RelationKind::HasOne)
    }

    /// True if the source columns of this relation form an outgoing
    /// foreign key.
    pub fn is_foreign_key(&self) -> bool {
        self.is_has_one() && !self.inverse
    }

    pub fn through(&self) -> Option<&Through> {
        match &self.kind {
            RelationKind::ManyToMany(through) => Some(through),
            _ => None,
        }
    }

    /// Alias under which the target table is joined. Self-referencing
    /// relations use the join alias so the two sides stay distinct.
    pub fn target_alias(&self) -> String {
        if self.is_self_referencing() {
            name::join_alias(&self.target.table.name)
        } else {
            name::alias(&self.target.table.name)
        }
    }
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::HasOne => "has-one",
            RelationKind::HasMany => "has-many",
            RelationKind::ManyToMany(_) => "many-to-many",
        }
    }
}

impl ColumnSet {
    pub fn new<I, S>(schema: &str, table: &str, columns: I) -> ColumnSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSet {
            table: TableId::new(schema, table),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl ForeignKey {
    /// A child-to-parent foreign key referencing the target's primary key.
    pub fn new(source: ColumnSet, target: ColumnSet) -> ForeignKey {
        ForeignKey {
            source,
            target,
            source_is_primary_key: false,
            target_is_primary_key: true,
            bidirectional: false,
        }
    }

    pub fn source_is_primary_key(mut self, value: bool) -> ForeignKey {
        self.source_is_primary_key = value;
        self
    }

    pub fn target_is_primary_key(mut self, value: bool) -> ForeignKey {
        self.target_is_primary_key = value;
        self
    }

    pub fn bidirectional(mut self, value: bool) -> ForeignKey {
        self.bidirectional = value;
        self
    }

    /// True if primary key references primary key, making both sides
    /// unique.
    pub fn is_one_to_one(&self) -> bool {
        self.source_is_primary_key && self.target_is_primary_key
    }
}
