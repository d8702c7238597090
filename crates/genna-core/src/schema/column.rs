use super::ColumnType;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The column's database type.
    pub ty: ColumnType,

    /// Whether or not the column is nullable
    #[serde(default)]
    pub nullable: bool,

    /// True if the column is part of the table's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// True if the column takes part in an outgoing foreign key
    #[serde(default)]
    pub foreign_key: bool,

    /// Default value expression, verbatim from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Column comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Column {
        Column {
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
            foreign_key: false,
            default: None,
            comment: None,
        }
    }

    pub fn nullable(mut self) -> Column {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Column {
        self.primary_key = true;
        self
    }

    pub fn foreign_key(mut self) -> Column {
        self.foreign_key = true;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Column {
        self.comment = Some(comment.into());
        self
    }
}
