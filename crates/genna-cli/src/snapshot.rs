use anyhow::{bail, Context, Result};
use genna_core::schema::{relation, ForeignKey, Junction};
use genna_core::{Error, Relation, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const SNAPSHOT_FILE_VERSION: u32 = 1;

/// Introspected schema facts stored as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Snapshot file format version
    version: u32,

    /// Tables and views, in catalog order
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Foreign key constraints between the tables
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// Explicit many-to-many declarations
    #[serde(default)]
    pub junctions: Vec<Junction>,
}

impl SnapshotFile {
    /// Create a new snapshot file holding the given tables
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            version: SNAPSHOT_FILE_VERSION,
            tables,
            foreign_keys: vec![],
            junctions: vec![],
        }
    }

    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn junction(mut self, junction: Junction) -> Self {
        self.junctions.push(junction);
        self
    }

    /// Load a snapshot file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Save the snapshot file to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_string())?;
        Ok(())
    }

    /// Builds the relations declared by the snapshot and attaches each to
    /// the table it starts at.
    ///
    /// Source columns of every foreign key are flagged as foreign key
    /// columns, and a foreign key whose source columns form the source
    /// table's primary key is treated as one-to-one.
    pub fn into_tables(self) -> genna_core::Result<Vec<Table>> {
        let SnapshotFile {
            mut tables,
            foreign_keys,
            junctions,
            ..
        } = self;

        for mut fk in foreign_keys {
            let source = find(&mut tables, &fk)?;
            for column in &mut source.columns {
                if fk.source.columns.contains(&column.name) {
                    column.foreign_key = true;
                }
            }

            let primary_key: Vec<_> = source
                .primary_key_columns()
                .map(|column| column.name.as_str())
                .collect();
            if !primary_key.is_empty() && primary_key == fk.source.columns {
                fk.source_is_primary_key = true;
            }

            let relations = relation::build_all(&fk)
                .map_err(|err| err.context(format!("building relations for {}", fk.source.table)))?;
            attach(&mut tables, relations)?;
        }

        for junction in junctions {
            let relations = relation::build_many_to_many(&junction).map_err(|err| {
                err.context(format!("building junction {}", junction.left.source.table))
            })?;
            attach(&mut tables, relations)?;
        }

        Ok(tables)
    }
}

fn find<'a>(tables: &'a mut [Table], fk: &ForeignKey) -> genna_core::Result<&'a mut Table> {
    tables
        .iter_mut()
        .find(|table| table.is(&fk.source.table))
        .ok_or_else(|| {
            Error::invalid_schema(format!(
                "foreign key references unknown table {}",
                fk.source.table
            ))
        })
}

fn attach(tables: &mut [Table], relations: Vec<Relation>) -> genna_core::Result<()> {
    for relation in relations {
        let Some(table) = tables
            .iter_mut()
            .find(|table| table.is(&relation.source.table))
        else {
            genna_core::bail!(
                "relation `{}` starts at unknown table {}",
                relation.field_name,
                relation.source.table
            );
        };

        log::debug!(
            "{}: attaching {} relation `{}`",
            relation.source.table,
            relation.kind.as_str(),
            relation.field_name
        );
        table.relations.push(relation);
    }

    Ok(())
}

impl FromStr for SnapshotFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(s)?;

        // Validate version
        if file.version != SNAPSHOT_FILE_VERSION {
            bail!(
                "Unsupported snapshot file version: {}. Expected version {}",
                file.version,
                SNAPSHOT_FILE_VERSION
            );
        }

        Ok(file)
    }
}

impl fmt::Display for SnapshotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = toml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", doc)
    }
}
