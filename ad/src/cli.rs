//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// actiond - scripted action loop daemon
#[derive(Parser)]
#[command(
    name = "ad",
    about = "Drives randomized, timed message loops from declarative action definitions",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every configured action loop in the foreground
    ///
    /// Control the running loops from stdin: pause, resume, pause!,
    /// resume! (forced variants override run-always), quit.
    Run,

    /// Load and validate the configuration
    Check,

    /// List configured actions
    Actions {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Dry-run one iteration's timeline for an action
    Plan {
        /// Trigger word of the action to plan
        trigger: String,

        /// Plan a steady-state iteration instead of the first one
        #[arg(long)]
        steady: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for inspection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
