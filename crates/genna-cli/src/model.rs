use crate::{config::ConfigSource, render, utility::add_suffix, SnapshotFile};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use genna_codegen::{generate, Options, Package};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix added to the output file name for the search file
const SEARCH_SUFFIX: &str = "_search";

/// Generates models from a schema snapshot.
///
/// Boolean flags take an optional value, so `--follow-fk=false` switches
/// off an option enabled in the config file.
#[derive(Parser, Debug)]
pub struct ModelCommand {
    /// Schema snapshot to generate from
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// File the models are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file [default: genna.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Go)]
    format: Format,

    /// Go package name
    #[arg(short, long)]
    package: Option<String>,

    /// Table patterns, `schema.table` with `*` wildcards
    #[arg(short, long, value_delimiter = ',')]
    tables: Vec<String>,

    /// Also generate tables reachable through foreign keys
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    follow_fk: Option<bool>,

    /// Keep primary key field names instead of `ID`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    keep_pk: Option<bool>,

    /// Do not add table aliases to struct tags
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    no_alias: Option<bool>,

    /// Do not add `discard_unknown_columns` to struct tags
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    no_discard: Option<bool>,

    /// Generate models selecting from views
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    view: Option<bool>,

    /// Also generate search structs
    #[arg(short = 'w', long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    with_search: Option<bool>,

    /// Use exact column types in search structs
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    strict_search: Option<bool>,

    /// Column marking soft-deleted rows
    #[arg(long, value_name = "COLUMN")]
    soft_delete: Option<String>,

    /// Keep the database spelling of column names
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    preserve_case: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Go source
    Go,

    /// The package payload as JSON
    Json,
}

impl ModelCommand {
    pub(crate) fn run(self, source: &ConfigSource) -> Result<()> {
        let config = source.resolve(self.config.as_deref())?;

        let Some(snapshot_path) = self.snapshot.clone().or(config.snapshot.clone()) else {
            bail!("no snapshot given; pass --snapshot or set `snapshot` in {}", crate::CONFIG_FILE);
        };
        let Some(output) = self.output.clone().or(config.output.clone()) else {
            bail!("no output file given; pass --output or set `output` in {}", crate::CONFIG_FILE);
        };
        let options = self.options(config.options);

        println!();
        println!("  {}", style("Generate Models").cyan().bold().underlined());
        println!();

        let tables = SnapshotFile::load(&snapshot_path)?.into_tables()?;
        let package = generate(&tables, &options)
            .with_context(|| format!("generating models from {}", snapshot_path.display()))?;

        if package.models.is_empty() {
            println!(
                "  {}",
                style("No tables matched the given patterns.").magenta().dim()
            );
        }

        match self.format {
            Format::Go => {
                write(&output, &render::models(&package)?)?;
                success(format!("Wrote {} model(s) to {}", package.models.len(), output.display()));

                if options.with_search {
                    let path = add_suffix(&output, SEARCH_SUFFIX);
                    write(&path, &render::search(&package)?)?;
                    success(format!("Wrote search structs to {}", path.display()));
                }
            }
            Format::Json => {
                write(&output, &to_json(&package)?)?;
                success(format!("Wrote payload to {}", output.display()));
            }
        }

        println!();
        Ok(())
    }

    /// Applies the command line flags on top of `options`.
    fn options(&self, options: Options) -> Options {
        let mut options = options;

        if let Some(package) = &self.package {
            options = options.package(package);
        }
        if !self.tables.is_empty() {
            options = options.tables(&self.tables);
        }
        if let Some(column) = &self.soft_delete {
            options = options.soft_delete(column);
        }

        let flags = [
            (&mut options.follow_fks, self.follow_fk),
            (&mut options.keep_pk, self.keep_pk),
            (&mut options.no_alias, self.no_alias),
            (&mut options.no_discard, self.no_discard),
            (&mut options.view, self.view),
            (&mut options.with_search, self.with_search),
            (&mut options.strict_search, self.strict_search),
            (&mut options.preserve_case, self.preserve_case),
        ];
        for (option, flag) in flags {
            if let Some(value) = flag {
                *option = value;
            }
        }

        options
    }
}

fn to_json(package: &Package) -> Result<String> {
    let mut json = serde_json::to_string_pretty(package)?;
    json.push('\n');
    Ok(json)
}

fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    log::debug!("writing {} bytes to {}", contents.len(), path.display());
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn success(message: String) {
    println!("  {} {}", style("✓").green().bold(), style(message).dim());
}
