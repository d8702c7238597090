//! The package payload handed to rendering.
//!
//! Everything here is already resolved: names are final and tags are
//! serialized text. Rendering only has to lay the values out.

use crate::{
    assemble::{NormalizedColumn, NormalizedRelation, NormalizedTable},
    tag::Tag,
    Options,
};

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub package: String,

    /// Imports of the model file, sorted
    pub imports: Vec<String>,

    pub models: Vec<TemplateTable>,

    /// Imports of the search file, sorted. Empty unless search is strict.
    pub search_imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateTable {
    pub struct_name: String,
    pub struct_tag: String,

    pub table_name: String,

    pub with_alias: bool,
    pub table_alias: String,
    pub join_alias: String,

    pub columns: Vec<TemplateColumn>,
    pub relations: Vec<TemplateRelation>,

    pub search_struct_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateColumn {
    pub field_name: String,
    pub field_db_name: String,
    pub field_type: String,
    pub field_tag: String,
    pub field_comment: Option<String>,

    pub is_searchable: bool,
    pub search_field_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRelation {
    pub field_name: String,
    pub field_type: String,
    pub field_tag: String,
    pub field_comment: Option<String>,
}

impl Package {
    /// Builds the payload from deduplicated tables.
    pub fn new(tables: Vec<NormalizedTable>, options: &Options) -> Package {
        let mut imports = BTreeSet::new();
        let mut search_imports = BTreeSet::new();

        let models = tables
            .into_iter()
            .map(|table| {
                imports.extend(table.imports.iter().cloned());
                search_imports.extend(table.search_imports.iter().cloned());
                TemplateTable::new(table, options)
            })
            .collect();

        let search_imports = if options.strict_search {
            search_imports.into_iter().collect()
        } else {
            vec![]
        };

        Package {
            package: options.package.clone(),
            imports: imports.into_iter().collect(),
            models,
            search_imports,
        }
    }

    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }

    pub fn has_search_imports(&self) -> bool {
        !self.search_imports.is_empty()
    }

    pub fn model(&self, struct_name: &str) -> Option<&TemplateTable> {
        self.models
            .iter()
            .find(|model| model.struct_name == struct_name)
    }
}

impl TemplateTable {
    fn new(table: NormalizedTable, options: &Options) -> TemplateTable {
        TemplateTable {
            struct_tag: struct_tag(&table, options).to_string(),
            struct_name: table.struct_name,
            table_name: table.table_name,
            with_alias: !options.no_alias,
            table_alias: table.alias,
            join_alias: table.join_alias,
            columns: table.columns.into_iter().map(TemplateColumn::from).collect(),
            relations: table
                .relations
                .into_iter()
                .map(TemplateRelation::from)
                .collect(),
            search_struct_name: table.search_struct_name,
        }
    }

    pub fn has_relations(&self) -> bool {
        !self.relations.is_empty()
    }

    pub fn column(&self, field_name: &str) -> Option<&TemplateColumn> {
        self.columns
            .iter()
            .find(|column| column.field_name == field_name)
    }

    pub fn relation(&self, field_name: &str) -> Option<&TemplateRelation> {
        self.relations
            .iter()
            .find(|relation| relation.field_name == field_name)
    }

    /// Every field name of the struct, columns first.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .map(|column| column.field_name.as_str())
            .chain(self.relations.iter().map(|relation| relation.field_name.as_str()))
    }
}

impl From<NormalizedColumn> for TemplateColumn {
    fn from(column: NormalizedColumn) -> TemplateColumn {
        TemplateColumn {
            is_searchable: column.is_searchable(),
            field_tag: column.tag.to_string(),
            field_name: column.field_name,
            field_db_name: column.db_name,
            field_type: column.field_type,
            field_comment: column.comment,
            search_field_type: column.search_type,
        }
    }
}

impl From<NormalizedRelation> for TemplateRelation {
    fn from(relation: NormalizedRelation) -> TemplateRelation {
        TemplateRelation {
            field_tag: relation.tag.to_string(),
            field_name: relation.field_name,
            field_type: relation.field_type,
            field_comment: relation.comment,
        }
    }
}

/// Tag of the struct's `tableName` marker field.
fn struct_tag(table: &NormalizedTable, options: &Options) -> Tag {
    let tag = if table.view {
        Tag::new().option("select", &table.table_name)
    } else {
        Tag::new().value(&table.table_name)
    };

    let tag = if options.no_alias {
        tag
    } else {
        tag.option("alias", &table.alias)
    };

    tag.flag_if(!options.no_discard, "discard_unknown_columns")
}
