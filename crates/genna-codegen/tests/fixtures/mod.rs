#![allow(dead_code)]

use genna_core::schema::{relation, ColumnSet, ForeignKey};
use genna_core::{Column, ColumnType, Table};

pub fn fk(source: (&str, &str, &str), target: (&str, &str, &str)) -> ForeignKey {
    ForeignKey::new(
        ColumnSet::new(source.0, source.1, [source.2]),
        ColumnSet::new(target.0, target.1, [target.2]),
    )
}

pub fn has_one(source: (&str, &str, &str), target: (&str, &str, &str)) -> genna_core::Relation {
    relation::build(&fk(source, target)).unwrap()
}

pub fn titled(schema: &str, name: &str, pk: &str) -> Table {
    Table::new(schema, name)
        .with_column(Column::new(pk, ColumnType::Int8).primary_key())
        .with_column(Column::new("title", ColumnType::Varchar).nullable())
}

pub fn users() -> Table {
    Table::new("public", "users")
        .with_column(Column::new("userId", ColumnType::Int8).primary_key())
        .with_column(Column::new("email", ColumnType::Varchar).nullable())
        .with_column(Column::new("locationId", ColumnType::Int8).foreign_key())
        .with_column(Column::new("companyId", ColumnType::Int8).nullable().foreign_key())
        .with_column(Column::new("createdAt", ColumnType::Timestamp))
        .with_relation(has_one(
            ("public", "users", "locationId"),
            ("geo", "locations", "locationId"),
        ))
        .with_relation(has_one(
            ("public", "users", "companyId"),
            ("public", "companies", "companyId"),
        ))
}

/// The schema used throughout: `unused`, `users`, `companies`,
/// `geo.locations` and `geo.languages`, in that order.
pub fn schema() -> Vec<Table> {
    vec![
        titled("public", "unused", "unusedId"),
        users(),
        titled("public", "companies", "companyId"),
        titled("geo", "locations", "locationId"),
        titled("geo", "languages", "languageId"),
    ]
}

pub fn names(tables: &[&Table]) -> Vec<String> {
    tables.iter().map(|table| table.id().to_string()).collect()
}
