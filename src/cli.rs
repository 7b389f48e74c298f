// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `vaultsync`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "vaultsync",
    version,
    about = "Keep a directory mirrored with a git remote: reconcile on start, commit and push on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to keep in sync (a git working tree).
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "PATH")]
    pub root: Option<String>,

    /// Settings file (TOML).
    ///
    /// Default: `.vaultsync.toml` inside the sync root.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override the branch from the settings file.
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Override the remote from the settings file.
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Override the debounce threshold (seconds).
    #[arg(long, value_name = "SECONDS")]
    pub min_commit_delay: Option<u64>,

    /// Write the effective settings (file + overrides) back and exit.
    #[arg(long)]
    pub save_settings: bool,

    /// Run the startup reconciliation only, then exit. No watching.
    #[arg(long)]
    pub once: bool,

    /// Print the chains that would run, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VAULTSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
