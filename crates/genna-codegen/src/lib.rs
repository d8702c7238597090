pub mod assemble;
pub use assemble::{assemble, NormalizedTable};

pub mod dedup;

mod options;
pub use options::{Options, DEFAULT_PACKAGE};

pub mod resolve;
pub use resolve::resolve;

mod tag;
pub use tag::Tag;

pub mod template;
pub use template::Package;

mod ty;

use genna_core::{Result, Table};

/// Compiles introspected tables into the package payload.
///
/// Runs the whole pipeline: table selection, verification, assembly and
/// field deduplication. Any error aborts the run without partial output.
pub fn generate(tables: &[Table], options: &Options) -> Result<Package> {
    let selected = resolve(&options.tables, tables, options.follow_fks)?;
    log::info!(
        "generating {} model(s) from {} table(s)",
        selected.len(),
        tables.len()
    );

    let mut normalized = Vec::with_capacity(selected.len());
    for table in &selected {
        assemble::verify(table)?;

        let mut table = assemble(table, &selected, options)?;
        dedup::dedup(&mut table)?;
        normalized.push(table);
    }

    Ok(Package::new(normalized, options))
}
