//! Normalization of a selected table into generation-ready records.

use crate::{
    tag::Tag,
    ty::{self, GoType},
    Options,
};

use genna_core::{
    schema::{name, RelationKind},
    Column, Error, Relation, Result, Table, TableId,
};
use std::collections::BTreeSet;

/// Field name given to a primary key column when it is not kept.
pub const PRIMARY_KEY_FIELD: &str = "ID";

/// A table ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub id: TableId,

    /// Name of the model struct
    pub struct_name: String,

    /// Name of the search struct
    pub search_struct_name: String,

    /// Table name as referenced from Go, schema-qualified outside `public`
    pub table_name: String,

    pub alias: String,

    /// Alias used when the table is joined to itself
    pub join_alias: String,

    pub view: bool,

    /// True if primary key columns keep their own field names, either by
    /// option or because the key is composite
    pub keep_pk: bool,

    pub columns: Vec<NormalizedColumn>,

    pub relations: Vec<NormalizedRelation>,

    /// Go imports needed by the model struct
    pub imports: BTreeSet<String>,

    /// Go imports needed by the search struct
    pub search_imports: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedColumn {
    /// Generated field name. Only deduplication changes it after assembly.
    pub field_name: String,

    /// Column name in the database
    pub db_name: String,

    pub field_type: String,

    pub tag: Tag,

    pub comment: Option<String>,

    pub primary_key: bool,

    /// Field type in the search struct, when the column is searchable
    pub search_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRelation {
    /// Generated field name. Only deduplication changes it after assembly.
    pub field_name: String,

    pub field_type: String,

    pub kind: RelationKind,

    pub target: TableId,

    pub tag: Tag,

    pub comment: Option<String>,
}

impl NormalizedColumn {
    pub fn is_searchable(&self) -> bool {
        self.search_type.is_some()
    }
}

/// Normalizes `table`. Relations whose target, or junction, is not part of
/// `selected` are dropped, leaving their columns as plain fields.
pub fn assemble(table: &Table, selected: &[&Table], options: &Options) -> Result<NormalizedTable> {
    let id = table.id();
    let keep_pk = options.keep_pk || table.has_composite_primary_key();

    if keep_pk && !options.keep_pk {
        log::debug!("{id} has a composite primary key; keeping primary key fields");
    }

    let mut imports = BTreeSet::new();
    let mut search_imports = BTreeSet::new();

    let mut columns = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        let go = GoType::from_column(&column.ty);
        if let Some(import) = go.import {
            imports.insert(import.to_string());
        }

        let search_type = if ty::is_searchable(&column.ty) {
            let search = ty::search_type(&go, options.strict_search);
            if let Some(import) = search.import {
                search_imports.insert(import.to_string());
            }
            Some(search.name)
        } else {
            None
        };

        columns.push(NormalizedColumn {
            field_name: column_field_name(column, keep_pk, options),
            db_name: column.name.clone(),
            field_type: go.field_type(column.nullable),
            tag: column_tag(column, options),
            comment: column
                .comment
                .as_deref()
                .map(single_line)
                .filter(|comment| !comment.is_empty()),
            primary_key: column.primary_key,
            search_type,
        });
    }

    let mut kept = Vec::with_capacity(table.relations.len());
    for relation in &table.relations {
        let Some(target) = find(selected, &relation.target.table) else {
            log::debug!(
                "{id}: dropping relation `{}`, {} is not selected",
                relation.field_name,
                relation.target.table
            );
            continue;
        };

        if let Some(through) = relation.through() {
            if find(selected, &through.table).is_none() {
                log::debug!(
                    "{id}: dropping relation `{}`, junction {} is not selected",
                    relation.field_name,
                    through.table
                );
                continue;
            }
        }

        kept.push((relation, target));
    }

    verify_foreign_keys(table, kept.iter().map(|(relation, _)| *relation))?;

    let relations = kept
        .into_iter()
        .map(|(relation, target)| normalize_relation(relation, target))
        .collect();

    Ok(NormalizedTable {
        struct_name: name::model_name(&table.schema, &table.name),
        search_struct_name: format!("{}Search", name::model_name(&table.schema, &table.name)),
        table_name: table_name(&id),
        alias: name::alias(&table.name),
        join_alias: name::join_alias(&table.name),
        view: table.view || options.view,
        keep_pk,
        columns,
        relations,
        imports,
        search_imports,
        id,
    })
}

/// Checks the relations of a table against its columns: every relation
/// must start at this table and use existing columns.
pub fn verify(table: &Table) -> Result<()> {
    let id = table.id();

    for relation in &table.relations {
        if relation.source.table != id {
            return Err(Error::invalid_schema(format!(
                "relation `{}` is attached to {} but starts at {}",
                relation.field_name, id, relation.source.table
            )));
        }

        if let Some(missing) = relation
            .source
            .columns
            .iter()
            .find(|column| table.column(column).is_none())
        {
            return Err(Error::invalid_schema(format!(
                "relation `{}` uses unknown column {}.{}",
                relation.field_name, id, missing
            )));
        }
    }

    Ok(())
}

/// A foreign key column may back at most one outgoing relation among those
/// that are generated.
fn verify_foreign_keys<'a>(
    table: &Table,
    relations: impl Iterator<Item = &'a Relation> + Clone,
) -> Result<()> {
    for column in table.columns.iter().filter(|column| column.foreign_key) {
        let owners = relations
            .clone()
            .filter(|relation| relation.is_foreign_key())
            .filter(|relation| relation.source.columns.contains(&column.name))
            .count();

        if owners > 1 {
            return Err(Error::invalid_schema(format!(
                "foreign key column {}.{} backs {} relations",
                table.id(),
                column.name,
                owners
            )));
        }
    }

    Ok(())
}

/// Table name as written in tags: unqualified inside `public`.
pub fn table_name(id: &TableId) -> String {
    if id.is_public() {
        id.name.clone()
    } else {
        id.to_string()
    }
}

fn find<'a>(selected: &[&'a Table], id: &TableId) -> Option<&'a Table> {
    selected.iter().copied().find(|table| table.is(id))
}

fn column_field_name(column: &Column, keep_pk: bool, options: &Options) -> String {
    if column.primary_key && !keep_pk {
        PRIMARY_KEY_FIELD.to_string()
    } else {
        name::field_name(&column.name, options.preserve_case)
    }
}

/// Joins the lines of a comment so it fits a trailing `//` comment.
fn single_line(comment: &str) -> String {
    comment
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn column_tag(column: &Column, options: &Options) -> Tag {
    let soft_delete = options.soft_delete.as_deref() == Some(column.name.as_str());

    Tag::new()
        .value(&column.name)
        .flag_if(column.primary_key, "pk")
        .flag_if(!column.nullable && !column.primary_key, "use_zero")
        .flag_if(column.ty.is_array(), "array")
        .flag_if(soft_delete, "soft_delete")
}

fn normalize_relation(relation: &Relation, target: &Table) -> NormalizedRelation {
    let struct_name = name::model_name(&target.schema, &target.name);

    let (field_type, tag, comment) = match &relation.kind {
        RelationKind::HasOne => {
            let tag = relation
                .source
                .columns
                .iter()
                .fold(Tag::new(), |tag, column| tag.option("fk", column))
                .option("rel", "has-one");
            (format!("*{struct_name}"), tag, None)
        }
        RelationKind::HasMany => {
            let tag = relation
                .target
                .columns
                .iter()
                .fold(Tag::new().option("rel", "has-many"), |tag, column| {
                    tag.option("join_fk", column)
                });
            (format!("[]{struct_name}"), tag, None)
        }
        RelationKind::ManyToMany(through) => {
            let tag = Tag::new().option("many2many", table_name(&through.table));
            let tag = through
                .source_columns
                .iter()
                .fold(tag, |tag, column| tag.option("fk", column));
            let tag = through
                .target_columns
                .iter()
                .fold(tag, |tag, column| tag.option("join_fk", column));
            let comment = format!("linked through {}", table_name(&through.table));
            (format!("[]{struct_name}"), tag, Some(comment))
        }
    };

    let tag = if relation.is_self_referencing() {
        tag.option("alias", relation.target_alias())
    } else {
        tag
    };

    NormalizedRelation {
        field_name: relation.field_name.clone(),
        field_type,
        kind: relation.kind.clone(),
        target: relation.target.table.clone(),
        tag,
        comment,
    }
}
