use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-health",
    version,
    about = "Git repository health checker",
    after_help = "Without any --check-* flag every check runs (unless repo-health.toml names a set)."
)]
pub struct Cli {
    /// Path to the git repository
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Flag low-quality commit messages in recent history
    #[arg(long)]
    pub check_commits: bool,

    /// Offline scan for committed secrets and private keys
    #[arg(long)]
    pub check_security: bool,

    /// Dependency and test conventions for the primary language
    #[arg(long)]
    pub check_language: bool,

    /// Long functions, circular imports and high-entropy literals (python)
    #[arg(long)]
    pub check_code_quality: bool,

    /// Estimate test coverage from naming conventions (python)
    #[arg(long)]
    pub check_coverage: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress all output except the report and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
    #[value(alias = "md")]
    Markdown,
}
