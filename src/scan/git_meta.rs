use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const RECENT_COMMIT_LIMIT: usize = 100;
const GIT_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What the version-control collaborator knows about a repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub total_commits: u64,
    pub most_recent_commit_date: Option<DateTime<Utc>>,
    /// `"<shortref> <subject>"` lines, newest first.
    pub recent_summaries: Vec<String>,
}

pub trait HistorySource {
    /// Never fails: any collaborator error yields an empty snapshot.
    fn snapshot(&self, include_summaries: bool) -> HistorySnapshot;
}

/// Reads history by shelling out to the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            timeout: GIT_TIMEOUT,
        }
    }

    fn run(&self, args: &[&str]) -> Option<String> {
        let mut child = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| tracing::warn!("could not run git {}: {}", args.join(" "), e))
            .ok()?;

        // git blocks once the pipe buffer fills, so stdout is read while polling.
        let mut pipe = child.stdout.take()?;
        let reader = thread::spawn(move || {
            let mut stdout = String::new();
            pipe.read_to_string(&mut stdout).map(|_| stdout)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    tracing::warn!("git {} timed out after {:?}", args.join(" "), self.timeout);
                    return None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    tracing::warn!("waiting on git {} failed: {}", args.join(" "), e);
                    return None;
                }
            }
        };

        let stdout = match reader.join() {
            Ok(Ok(stdout)) => stdout,
            Ok(Err(e)) => {
                tracing::warn!("reading git {} output failed: {}", args.join(" "), e);
                return None;
            }
            Err(_) => {
                tracing::warn!("git {} output reader panicked", args.join(" "));
                return None;
            }
        };

        if !status.success() {
            tracing::warn!("git {} exited with {}", args.join(" "), status);
            return None;
        }
        Some(stdout)
    }
}

impl HistorySource for GitCli {
    fn snapshot(&self, include_summaries: bool) -> HistorySnapshot {
        let Some(total_commits) = self
            .run(&["rev-list", "--count", "HEAD"])
            .and_then(|out| parse_commit_count(&out))
        else {
            return HistorySnapshot::default();
        };
        if total_commits == 0 {
            return HistorySnapshot::default();
        }

        let most_recent_commit_date = self
            .run(&["log", "-1", "--format=%ci", "HEAD"])
            .and_then(|out| parse_commit_date(&out));

        let recent_summaries = if include_summaries {
            let limit = RECENT_COMMIT_LIMIT.to_string();
            self.run(&["log", "--oneline", "-n", &limit, "HEAD"])
                .map(|out| parse_summaries(&out))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        HistorySnapshot {
            total_commits,
            most_recent_commit_date,
            recent_summaries,
        }
    }
}

pub fn parse_commit_count(output: &str) -> Option<u64> {
    output
        .trim()
        .parse::<u64>()
        .map_err(|e| tracing::warn!("could not parse commit count {:?}: {}", output.trim(), e))
        .ok()
}

/// Parses git's `%ci` format, e.g. `2024-01-15 10:30:45 -0500`.
pub fn parse_commit_date(output: &str) -> Option<DateTime<Utc>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S %z")
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| tracing::warn!("could not parse commit date {:?}: {}", trimmed, e))
        .ok()
}

pub fn parse_summaries(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .take(RECENT_COMMIT_LIMIT)
        .map(str::to_string)
        .collect()
}
