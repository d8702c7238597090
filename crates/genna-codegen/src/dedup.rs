//! Guarantees unique field names within a table.
//!
//! Columns are processed before relations, each in declaration order. A
//! column whose name is taken gets a plain numeric suffix (`Name1`,
//! `Name2`, ...). A relation whose name is taken gets the
//! [`NON_UNIQUE_SUFFIX`] marker, then a number (`NameRel`, `NameRel1`, ...).
//! Because relations never influence column names, adding a relation to a
//! table never renames one of its columns.

use crate::assemble::NormalizedTable;

use genna_core::{Error, Result};
use std::collections::HashSet;

/// Marker appended to relation fields renamed because of a collision.
pub const NON_UNIQUE_SUFFIX: &str = "Rel";

/// The field names claimed so far within one table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldIndex {
    claimed: HashSet<String>,
}

impl FieldIndex {
    pub fn new() -> FieldIndex {
        FieldIndex::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claimed.contains(name)
    }

    /// Claims `name`, returning `false` if it was already claimed.
    pub fn claim(&mut self, name: &str) -> bool {
        if self.claimed.contains(name) {
            return false;
        }
        self.claimed.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Deduplicates the field names of `table` starting from an empty index.
pub fn dedup(table: &mut NormalizedTable) -> Result<FieldIndex> {
    uniquify(table, FieldIndex::new())
}

/// Renames colliding fields of `table` in place, treating names already in
/// `index` as taken. Returns the index with every field name of the table
/// claimed.
pub fn uniquify(table: &mut NormalizedTable, mut index: FieldIndex) -> Result<FieldIndex> {
    // Every probe rejects a distinct name, and there are never more taken
    // names than this.
    let bound = index.len() + table.columns.len() + table.relations.len() + 1;

    for i in 0..table.columns.len() {
        let base = table.columns[i].field_name.clone();
        if index.claim(&base) {
            continue;
        }

        let renamed = (1..=bound)
            .map(|suffix| format!("{base}{suffix}"))
            .find(|candidate| {
                !index.contains(candidate)
                    && !table
                        .columns
                        .iter()
                        .any(|column| column.field_name == *candidate)
            })
            .ok_or_else(|| Error::naming_collision(table.id.to_string(), &base))?;

        log::debug!("{}: column field `{base}` renamed to `{renamed}`", table.id);
        index.claim(&renamed);
        table.columns[i].field_name = renamed;
    }

    for i in 0..table.relations.len() {
        let base = table.relations[i].field_name.clone();
        if index.claim(&base) {
            continue;
        }

        let renamed = (0..bound)
            .map(|suffix| match suffix {
                0 => format!("{base}{NON_UNIQUE_SUFFIX}"),
                n => format!("{base}{NON_UNIQUE_SUFFIX}{n}"),
            })
            .find(|candidate| {
                !index.contains(candidate)
                    && !table
                        .columns
                        .iter()
                        .any(|column| column.field_name == *candidate)
                    && !table
                        .relations
                        .iter()
                        .any(|relation| relation.field_name == *candidate)
            })
            .ok_or_else(|| Error::naming_collision(table.id.to_string(), &base))?;

        log::debug!("{}: relation field `{base}` renamed to `{renamed}`", table.id);
        index.claim(&renamed);
        table.relations[i].field_name = renamed;
    }

    Ok(index)
}
