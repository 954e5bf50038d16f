use crate::cli::{Cli, ReportFormat};
use crate::error::{HealthError, Result};
use crate::types::config::{AnalysisOptions, EnabledChecks, HealthConfig, OutputFormat};
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repo-health.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".repo-health/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repo-health/config.toml";

pub fn load_config(root: &Path) -> Result<Option<HealthConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<HealthConfig>> {
    let mut merged = Value::Table(Map::new());
    let mut found = false;
    if let Some(path) = global_path {
        found |= merge_file_if_exists(&mut merged, path)?;
    }
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;
    if !found {
        return Ok(None);
    }

    let cfg: HealthConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| HealthError::ConfigParse(e.to_string()))?;
    Ok(Some(cfg))
}

/// Merge CLI flags over the config file. Explicit `--check-*` flags replace
/// the configured check set; with neither, every check runs.
pub fn resolve_options(cli: &Cli, config: Option<&HealthConfig>) -> AnalysisOptions {
    let flagged = EnabledChecks {
        commit_quality: cli.check_commits,
        security: cli.check_security,
        language: cli.check_language,
        code_quality: cli.check_code_quality,
        coverage: cli.check_coverage,
    };
    let checks = if flagged.any() {
        flagged
    } else {
        config
            .and_then(HealthConfig::enabled_checks)
            .unwrap_or_else(EnabledChecks::all)
    };

    let output_format = match cli.format {
        Some(ReportFormat::Text) => OutputFormat::Text,
        Some(ReportFormat::Json) => OutputFormat::Json,
        Some(ReportFormat::Yaml) => OutputFormat::Yaml,
        Some(ReportFormat::Markdown) => OutputFormat::Markdown,
        None => config
            .and_then(HealthConfig::output_format)
            .unwrap_or_default(),
    };

    AnalysisOptions {
        checks,
        output_format,
        verbose: cli.verbose,
        quiet: cli.quiet,
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| HealthError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| HealthError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_no_file_exists() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[checks]
security = true
coverage = true

[output]
format = "json"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[checks]
coverage = false
language = true
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".repo-health")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[output]
format = "markdown"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        let checks = cfg.enabled_checks().expect("checks should be named");
        assert!(checks.security);
        assert!(checks.language);
        assert!(!checks.coverage);
        assert!(!checks.commit_quality);
        assert_eq!(cfg.output_format(), Some(OutputFormat::Markdown));
    }

    #[test]
    fn load_config_rejects_unknown_sections() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[weights]\nreadme = 5\n")
            .expect("repo config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, HealthError::ConfigParse(_)));
    }

    #[test]
    fn unreadable_config_is_a_config_error_naming_the_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::create_dir_all(root.path().join(DEFAULT_CONFIG_FILE)).expect("dir should create");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.is_input_error());
        match err {
            HealthError::ConfigParse(message) => assert!(message.contains(DEFAULT_CONFIG_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_options_enables_everything_without_flags_or_config() {
        let cli = Cli::parse_from(["repo-health", "."]);
        let options = resolve_options(&cli, None);
        assert_eq!(options.checks, EnabledChecks::all());
        assert_eq!(options.output_format, OutputFormat::Text);
    }

    #[test]
    fn resolve_options_prefers_flags_over_config() {
        let cfg: HealthConfig = toml::from_str(
            r#"
[checks]
coverage = true

[output]
format = "yaml"
"#,
        )
        .expect("config should parse");
        let cli = Cli::parse_from(["repo-health", ".", "--check-security", "-f", "json"]);

        let options = resolve_options(&cli, Some(&cfg));
        assert!(options.checks.security);
        assert!(!options.checks.coverage);
        assert_eq!(options.output_format, OutputFormat::Json);
    }

    #[test]
    fn resolve_options_falls_back_to_config_checks_and_format() {
        let cfg: HealthConfig = toml::from_str(
            r#"
[checks]
coverage = true

[output]
format = "yaml"
"#,
        )
        .expect("config should parse");
        let cli = Cli::parse_from(["repo-health", ".", "-q"]);

        let options = resolve_options(&cli, Some(&cfg));
        assert!(options.checks.coverage);
        assert!(!options.checks.security);
        assert_eq!(options.output_format, OutputFormat::Yaml);
        assert!(options.quiet);
    }
}
