mod analyze;
mod cli;
mod config;
mod error;
mod report;
mod scan;
mod scoring;
mod types;

use crate::error::HealthError;
use crate::types::config::AnalysisOptions;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INPUT_ERROR: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(options: &AnalysisOptions) {
    let default_level = if options.quiet {
        "error"
    } else {
        match options.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Canonical path of a directory that carries a `.git` marker.
fn validate_repo_path(path: &Path) -> Result<PathBuf, HealthError> {
    if !path.exists() {
        return Err(HealthError::PathNotFound(path.display().to_string()));
    }
    let absolute = path.canonicalize()?;
    if !absolute.is_dir() {
        return Err(HealthError::NotADirectory(absolute.display().to_string()));
    }
    if !absolute.join(".git").exists() {
        return Err(HealthError::NotGitRepo(absolute.display().to_string()));
    }
    Ok(absolute)
}

fn run() -> Result<i32, HealthError> {
    let cli = cli::Cli::parse();
    let root = validate_repo_path(&cli.path)?;
    let loaded = config::load_config(&root)?;
    let options = config::resolve_options(&cli, loaded.as_ref());
    init_tracing(&options);
    tracing::info!("analyzing {}", root.display());

    let history = scan::git_meta::GitCli::new(&root);
    let health_report = analyze::analyze(&root, &options.checks, &history, chrono::Utc::now());
    let rendered = report::render(&health_report, &options)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            if !options.quiet {
                eprintln!("report saved to: {}", path.display());
            }
        }
        None => println!("{rendered}"),
    }

    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_input_error() {
                exit_code::INPUT_ERROR
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
