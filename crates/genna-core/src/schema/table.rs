use super::{Column, Relation, PUBLIC_SCHEMA};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A database table or view, as reported by introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Schema the table lives in
    pub schema: String,

    /// Name of the table
    pub name: String,

    /// The table's columns, in catalog order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Outgoing relations, in declaration order
    #[serde(default)]
    pub relations: Vec<Relation>,

    /// True if the relation is a view rather than a base table
    #[serde(default)]
    pub view: bool,
}

/// Identifies a table within a database: `(schema, name)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableId {
    pub schema: String,
    pub name: String,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Table {
        Table {
            schema: schema.into(),
            name: name.into(),
            columns: vec![],
            relations: vec![],
            view: false,
        }
    }

    pub fn id(&self) -> TableId {
        TableId::new(&self.schema, &self.name)
    }

    pub fn is(&self, id: &TableId) -> bool {
        self.schema == id.schema && self.name == id.name
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    pub fn has_composite_primary_key(&self) -> bool {
        self.primary_key_columns().count() > 1
    }

    pub fn with_column(mut self, column: Column) -> Table {
        self.columns.push(column);
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Table {
        self.relations.push(relation);
        self
    }
}

impl TableId {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> TableId {
        TableId {
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.schema == PUBLIC_SCHEMA
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}
