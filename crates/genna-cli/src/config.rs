use anyhow::{Context, Result};
use genna_codegen::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default name of the configuration file
pub const CONFIG_FILE: &str = "genna.toml";

/// Configuration for genna CLI operations, usually read from `genna.toml`
///
/// ```toml
/// snapshot = "schema.toml"
/// output = "model/model.go"
///
/// [model]
/// package = "model"
/// tables = ["public.*"]
/// follow_fks = true
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the schema snapshot
    pub snapshot: Option<PathBuf>,

    /// Path of the generated model file
    pub output: Option<PathBuf>,

    /// Model generation options
    #[serde(rename = "model")]
    pub options: Options,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Loads `genna.toml` from `dir` if one exists, else the defaults
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Set the snapshot path
    pub fn snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// Set the output path
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the model generation options
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// Where a command takes its configuration from when no `--config` flag is
/// given.
#[derive(Debug, Clone)]
pub(crate) enum ConfigSource {
    /// A configuration supplied by the embedding program
    Given(Config),

    /// `genna.toml` in this directory, if present
    Discover(PathBuf),
}

impl ConfigSource {
    /// The configuration for a run. An explicit `--config` path wins and the
    /// source is not consulted at all.
    pub(crate) fn resolve(&self, explicit: Option<&Path>) -> Result<Config> {
        match (explicit, self) {
            (Some(path), _) => Config::load(path),
            (None, ConfigSource::Given(config)) => Ok(config.clone()),
            (None, ConfigSource::Discover(dir)) => Config::discover(dir),
        }
    }
}
