//! CLI argument definitions for batch digital object creation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use aspace_cli::config::{DaoOverrides, HandleOverrides};

#[derive(Parser)]
#[command(
    name = "aspace-batch-dao",
    version,
    about = "Create ArchivesSpace digital objects in batch",
    long_about = "Create ArchivesSpace digital objects and components from an EAD tab export\n\
                  and a technical metadata dump, or generate handle server batch text\n\
                  for the same items."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file with repository, handle, and output settings.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create digital objects and components for every row of a tab export.
    Dao(DaoArgs),

    /// Write handle server batch text for every row of a tab export.
    Handles(HandleArgs),
}

#[derive(Parser)]
pub struct DaoArgs {
    /// Tab-delimited export, one archival object per line.
    #[arg(value_name = "TAB_FILE")]
    pub tab_file: PathBuf,

    /// JSON technical metadata keyed by filename.
    #[arg(value_name = "TECH_METADATA")]
    pub tech_metadata: PathBuf,

    /// ArchivesSpace API base URL.
    #[arg(long = "base-url", env = "ASPACE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Repository number.
    #[arg(long = "repository", env = "ASPACE_REPOSITORY", value_name = "ID")]
    pub repository: Option<u32>,

    #[arg(long = "username", env = "ASPACE_USERNAME")]
    pub username: Option<String>,

    #[arg(long = "password", env = "ASPACE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Handle prefix used in digital object identifiers.
    #[arg(long = "handle-prefix", env = "HANDLE_PREFIX", value_name = "PREFIX")]
    pub handle_prefix: Option<String>,

    /// Handle resolver base URL (default: http://hdl.handle.net).
    #[arg(long = "resolver-base", value_name = "URL")]
    pub resolver_base: Option<String>,

    /// Directory that receives LOGS/ (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Resolve and report every row without creating anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl DaoArgs {
    pub fn overrides(&self) -> DaoOverrides {
        DaoOverrides {
            base_url: self.base_url.clone(),
            repository: self.repository,
            username: self.username.clone(),
            password: self.password.clone(),
            handle_prefix: self.handle_prefix.clone(),
            resolver_base: self.resolver_base.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

#[derive(Parser)]
pub struct HandleArgs {
    /// Tab-delimited export; only the component id column is used.
    #[arg(value_name = "TAB_FILE")]
    pub tab_file: PathBuf,

    #[arg(long = "handle-prefix", env = "HANDLE_PREFIX", value_name = "PREFIX")]
    pub handle_prefix: Option<String>,

    #[arg(long = "handle-password", env = "HANDLE_PASSWORD", hide_env_values = true)]
    pub handle_password: Option<String>,

    /// Host serving the IIIF viewer (default: library.bc.edu).
    #[arg(long = "iiif-host", value_name = "HOST")]
    pub iiif_host: Option<String>,

    /// Directory that receives HANDLES/ (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl HandleArgs {
    pub fn overrides(&self) -> HandleOverrides {
        HandleOverrides {
            prefix: self.handle_prefix.clone(),
            password: self.handle_password.clone(),
            iiif_host: self.iiif_host.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
