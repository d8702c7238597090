mod config;
mod model;
mod render;
mod snapshot;
mod utility;

pub use config::{Config, CONFIG_FILE};
pub use model::{Format, ModelCommand};
pub use render::{models as render_models, search as render_search};
pub use snapshot::SnapshotFile;

use anyhow::Result;
use clap::Parser;
use config::ConfigSource;
use std::path::PathBuf;

/// genna CLI library for building custom command-line tools
pub struct GennaCli {
    config: ConfigSource,
}

impl Default for GennaCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GennaCli {
    /// Create a new GennaCli instance reading `genna.toml` from the working
    /// directory, if present
    pub fn new() -> Self {
        Self::in_dir(".")
    }

    /// Create a new GennaCli instance reading `genna.toml` from `dir`, if
    /// present
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config: ConfigSource::Discover(dir.into()),
        }
    }

    /// Create a new GennaCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config: ConfigSource::Given(config),
        }
    }

    /// Get a reference to the configuration, unless it is discovered when
    /// a command runs
    pub fn config(&self) -> Option<&Config> {
        match &self.config {
            ConfigSource::Given(config) => Some(config),
            ConfigSource::Discover(_) => None,
        }
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    /// Execute already parsed CLI commands
    pub fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Model(cmd) => cmd.run(&self.config),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "genna")]
#[command(about = "genna - go-pg model generator")]
#[command(version)]
pub struct Cli {
    /// Log more; repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate model structs from a schema snapshot
    Model(ModelCommand),
}
