//! Selection of the tables that take part in generation.

use genna_core::{
    schema::{Relation, PUBLIC_SCHEMA},
    Error, Result, Table, TableId,
};
use indexmap::IndexMap;

/// Resolves table selection patterns against the introspected tables.
///
/// When `follow_fks` is set, the selection is closed over relation targets.
/// The result keeps the order of `tables`, so repeated runs over the same
/// input select tables in the same order.
pub fn resolve<'a>(
    patterns: &[String],
    tables: &'a [Table],
    follow_fks: bool,
) -> Result<Vec<&'a Table>> {
    let patterns = patterns
        .iter()
        .map(|pattern| Pattern::parse(pattern))
        .collect::<Result<Vec<_>>>()?;

    let mut set = TableSet::new(tables)?;

    for pattern in &patterns {
        let matched = set.select(pattern);
        log::debug!("pattern `{pattern}` selected {matched} new table(s)");
    }

    if follow_fks {
        let added = set.follow_foreign_keys();
        log::debug!("foreign key closure added {added} table(s)");
    }

    Ok(set.into_tables())
}

/// A `schema.table` selection pattern where either segment may be `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    schema: Segment,
    table: Segment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Any,
    Exact(String),
}

impl Pattern {
    /// Parses a pattern. A bare `*` selects everything and a bare table
    /// name refers to the public schema.
    pub fn parse(src: &str) -> Result<Pattern> {
        let src = src.trim();
        let mut segments = src.split('.');

        let (schema, table) = match (segments.next(), segments.next(), segments.next()) {
            (Some("*"), None, None) => ("*", "*"),
            (Some(table), None, None) => (PUBLIC_SCHEMA, table),
            (Some(schema), Some(table), None) => (schema, table),
            _ => return Err(Error::invalid_pattern(src)),
        };

        if schema.is_empty() || table.is_empty() {
            return Err(Error::invalid_pattern(src));
        }

        Ok(Pattern {
            schema: Segment::new(schema),
            table: Segment::new(table),
        })
    }

    pub fn matches(&self, id: &TableId) -> bool {
        self.schema.matches(&id.schema) && self.table.matches(&id.name)
    }
}

impl Segment {
    fn new(src: &str) -> Segment {
        if src == "*" {
            Segment::Any
        } else {
            Segment::Exact(src.to_string())
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Any => true,
            Segment::Exact(expected) => expected == value,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let segment = |segment: &Segment| match segment {
            Segment::Any => "*".to_string(),
            Segment::Exact(value) => value.clone(),
        };
        write!(f, "{}.{}", segment(&self.schema), segment(&self.table))
    }
}

/// The working set of selected tables.
///
/// Keyed by table identity; inserting a table twice is a no-op and tables
/// are never removed.
#[derive(Debug)]
pub struct TableSet<'a> {
    tables: &'a [Table],

    /// Position of each table in `tables`
    lookup: IndexMap<TableId, usize>,

    selected: Vec<bool>,
}

impl<'a> TableSet<'a> {
    /// Creates an empty selection over `tables`. Two tables with the same
    /// identity are rejected.
    pub fn new(tables: &'a [Table]) -> Result<TableSet<'a>> {
        let mut lookup = IndexMap::with_capacity(tables.len());

        for (index, table) in tables.iter().enumerate() {
            if lookup.insert(table.id(), index).is_some() {
                return Err(Error::invalid_schema(format!(
                    "table {} is listed more than once",
                    table.id()
                )));
            }
        }

        Ok(TableSet {
            tables,
            lookup,
            selected: vec![false; tables.len()],
        })
    }

    /// Selects a table by identity. Returns `true` if it was not selected
    /// before; unknown tables are ignored.
    pub fn insert(&mut self, id: &TableId) -> bool {
        match self.lookup.get(id) {
            Some(&index) => !std::mem::replace(&mut self.selected[index], true),
            None => false,
        }
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.lookup
            .get(id)
            .is_some_and(|&index| self.selected[index])
    }

    pub fn len(&self) -> usize {
        self.selected.iter().filter(|selected| **selected).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selects every table matching `pattern`, returning how many were
    /// newly added.
    pub fn select(&mut self, pattern: &Pattern) -> usize {
        let ids: Vec<TableId> = self
            .lookup
            .keys()
            .filter(|id| pattern.matches(id))
            .cloned()
            .collect();

        ids.iter().filter(|id| self.insert(id)).count()
    }

    /// Adds every table reachable from the selection through relations,
    /// until nothing new is added. Returns the number of tables added.
    pub fn follow_foreign_keys(&mut self) -> usize {
        let tables = self.tables;
        let mut pending: Vec<usize> = (0..tables.len())
            .filter(|&index| self.selected[index])
            .collect();
        let mut added = 0;

        while let Some(index) = pending.pop() {
            for relation in &tables[index].relations {
                for id in related_tables(relation) {
                    if self.insert(id) {
                        log::debug!("{} reached through {}", id, tables[index].id());
                        added += 1;
                        pending.push(self.lookup[id]);
                    }
                }
            }
        }

        added
    }

    /// The selected tables, in input order.
    pub fn into_tables(self) -> Vec<&'a Table> {
        self.tables
            .iter()
            .zip(self.selected)
            .filter_map(|(table, selected)| selected.then_some(table))
            .collect()
    }
}

/// Tables a relation needs in order to be generated: its target, and for
/// many-to-many relations the junction.
fn related_tables(relation: &Relation) -> impl Iterator<Item = &TableId> {
    std::iter::once(&relation.target.table).chain(relation.through().map(|through| &through.table))
}
