use serde::{Deserialize, Serialize};

/// Schema of `repo-health.toml` after global, repo and local layers are merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    pub checks: Option<ChecksConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    pub commit_quality: Option<bool>,
    pub security: Option<bool>,
    pub language: Option<bool>,
    pub code_quality: Option<bool>,
    pub coverage: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    #[serde(alias = "md")]
    Markdown,
}

/// Optional analyzers; structure and history always run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnabledChecks {
    pub commit_quality: bool,
    pub security: bool,
    pub language: bool,
    pub code_quality: bool,
    pub coverage: bool,
}

impl EnabledChecks {
    pub fn all() -> Self {
        Self {
            commit_quality: true,
            security: true,
            language: true,
            code_quality: true,
            coverage: true,
        }
    }

    pub fn any(&self) -> bool {
        self.commit_quality || self.security || self.language || self.code_quality || self.coverage
    }

    /// The language detector feeds the python-only analyzers as well.
    pub fn needs_language_detection(&self) -> bool {
        self.language || self.code_quality || self.coverage
    }
}

impl HealthConfig {
    /// Checks named in the config file, or `None` if the file names none.
    pub fn enabled_checks(&self) -> Option<EnabledChecks> {
        let checks = self.checks.as_ref()?;
        let named = [
            checks.commit_quality,
            checks.security,
            checks.language,
            checks.code_quality,
            checks.coverage,
        ];
        if named.iter().all(Option::is_none) {
            return None;
        }
        Some(EnabledChecks {
            commit_quality: checks.commit_quality.unwrap_or(false),
            security: checks.security.unwrap_or(false),
            language: checks.language.unwrap_or(false),
            code_quality: checks.code_quality.unwrap_or(false),
            coverage: checks.coverage.unwrap_or(false),
        })
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|output| output.format)
    }
}

/// Run options, resolved once from CLI flags and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub checks: EnabledChecks,
    pub output_format: OutputFormat,
    pub verbose: u8,
    pub quiet: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            checks: EnabledChecks::all(),
            output_format: OutputFormat::Text,
            verbose: 0,
            quiet: false,
        }
    }
}
