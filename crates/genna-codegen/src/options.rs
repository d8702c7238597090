use serde::Deserialize;

/// Package name used when none is configured.
pub const DEFAULT_PACKAGE: &str = "model";

/// Options controlling a generation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Go package name of the generated file
    pub package: String,

    /// Table selection patterns, `schema.table` with `*` wildcards
    pub tables: Vec<String>,

    /// Add every table reachable through foreign keys from the selection
    pub follow_fks: bool,

    /// Emit primary key columns under their own names instead of `ID`
    pub keep_pk: bool,

    /// Leave the alias out of struct tags
    pub no_alias: bool,

    /// Leave `discard_unknown_columns` out of struct tags
    pub no_discard: bool,

    /// Generate models that select from views
    pub view: bool,

    /// Generate search structs alongside the models
    pub with_search: bool,

    /// Use exact Go types in search structs
    pub strict_search: bool,

    /// Name of the column marking soft-deleted rows
    pub soft_delete: Option<String>,

    /// Keep the database spelling of column names in field names
    pub preserve_case: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            tables: vec!["public.*".to_string()],
            follow_fks: false,
            keep_pk: false,
            no_alias: false,
            no_discard: false,
            view: false,
            with_search: false,
            strict_search: false,
            soft_delete: None,
            preserve_case: false,
        }
    }
}

impl Options {
    /// Create a new Options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn tables<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn follow_fks(mut self, value: bool) -> Self {
        self.follow_fks = value;
        self
    }

    pub fn keep_pk(mut self, value: bool) -> Self {
        self.keep_pk = value;
        self
    }

    pub fn no_alias(mut self, value: bool) -> Self {
        self.no_alias = value;
        self
    }

    pub fn no_discard(mut self, value: bool) -> Self {
        self.no_discard = value;
        self
    }

    pub fn view(mut self, value: bool) -> Self {
        self.view = value;
        self
    }

    pub fn with_search(mut self, value: bool) -> Self {
        self.with_search = value;
        self
    }

    pub fn strict_search(mut self, value: bool) -> Self {
        self.strict_search = value;
        self
    }

    pub fn soft_delete(mut self, column: impl Into<String>) -> Self {
        self.soft_delete = Some(column.into());
        self
    }

    pub fn preserve_case(mut self, value: bool) -> Self {
        self.preserve_case = value;
        self
    }
}
