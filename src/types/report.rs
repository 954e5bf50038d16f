use crate::types::config::EnabledChecks;
use crate::types::scoring::{HealthCategory, ScoreBreakdown};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A single finding plus a remediation hint. Every analyzer reports through this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Warning {
    pub message: String,
    pub tip: String,
}

impl Warning {
    pub fn new(message: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tip: tip.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub has_readme: bool,
    pub has_license: bool,
    pub has_tests: bool,
    pub has_gitignore: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryReport {
    pub total_commits: u64,
    pub most_recent_commit_date: Option<DateTime<Utc>>,
    pub commit_quality_warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecurityReport {
    pub scanned_files: usize,
    pub secrets_warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Go,
    #[default]
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Go => "go",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageReport {
    pub primary_language: Language,
    pub language_warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeQualityKind {
    LongFunction,
    CircularDependency,
    HighEntropy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeQualityWarning {
    pub kind: CodeQualityKind,
    #[serde(flatten)]
    pub warning: Warning,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodeQualityReport {
    pub code_quality_warnings: Vec<CodeQualityWarning>,
}

impl CodeQualityReport {
    pub fn count(&self, kind: CodeQualityKind) -> usize {
        self.code_quality_warnings
            .iter()
            .filter(|warning| warning.kind == kind)
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total_modules: usize,
    pub total_functions: usize,
    pub tested_functions: usize,
    pub function_coverage_pct: f64,
    pub total_lines: usize,
    pub estimated_covered_lines: usize,
    pub line_coverage_est_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    pub coverage_stats: CoverageStats,
    pub coverage_warnings: Vec<Warning>,
}

/// Everything one run produced; the renderers work from this alone.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub repository: String,
    pub analyzed_at: DateTime<Utc>,
    pub health_score: u8,
    pub category: HealthCategory,
    pub breakdown: ScoreBreakdown,
    pub enabled_checks: EnabledChecks,
    pub structure: StructureReport,
    pub history: HistoryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_quality: Option<CodeQualityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}
