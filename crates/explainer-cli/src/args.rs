//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use explainer_core::DatabaseConfig;

#[derive(Debug, Parser)]
#[command(name = "explainer")]
#[command(about = "Grade MySQL query plans and table structure")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log every database round-trip
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// EXPLAIN and grade every SELECT found in a query log
    Logs {
        /// Path to the log file
        path: PathBuf,

        /// Only analyze the first N unique queries
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Grade the index and column structure of a table
    Table {
        /// Table name
        name: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Connection settings. Each one overrides the value from the config file.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Config file (defaults to <config dir>/explainer/config.toml)
    #[arg(long, global = true, env = "EXPLAINER_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "EXPLAINER_HOST")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "EXPLAINER_PORT")]
    pub port: Option<u16>,

    #[arg(short = 'd', long, global = true, env = "EXPLAINER_DATABASE")]
    pub database: Option<String>,

    #[arg(short = 'u', long, global = true, env = "EXPLAINER_USER")]
    pub user: Option<String>,

    #[arg(short = 'p', long, global = true, env = "EXPLAINER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    /// Applies the flags on top of `base`
    pub fn apply(&self, mut base: DatabaseConfig) -> DatabaseConfig {
        if let Some(host) = &self.host {
            base = base.with_host(host);
        }
        if let Some(port) = self.port {
            base = base.with_port(port);
        }
        if let Some(database) = &self.database {
            base = base.with_database(database);
        }
        if let Some(user) = &self.user {
            base = base.with_username(user);
        }
        if let Some(password) = &self.password {
            base = base.with_password(password);
        }
        base
    }
}

impl Cli {
    /// Log filter used when `EXPLAINER_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
