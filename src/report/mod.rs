pub mod json;
pub mod md;
pub mod text;
pub mod yaml;

use crate::error::HealthError;
use crate::types::config::{AnalysisOptions, OutputFormat};
use crate::types::report::{HealthReport, Warning};

/// How much the text renderer prints around the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Quiet,
    Normal,
    Verbose,
}

impl Detail {
    pub fn from_options(options: &AnalysisOptions) -> Self {
        if options.quiet {
            Self::Quiet
        } else if options.verbose > 0 {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

pub fn render(report: &HealthReport, options: &AnalysisOptions) -> Result<String, HealthError> {
    match options.output_format {
        OutputFormat::Text => Ok(text::to_text(report, Detail::from_options(options))),
        OutputFormat::Json => json::to_json(report).map_err(HealthError::Json),
        OutputFormat::Yaml => yaml::to_yaml(report).map_err(HealthError::Yaml),
        OutputFormat::Markdown => Ok(md::to_markdown(report)),
    }
}

/// Warnings grouped under their breakdown category, for checks that ran.
pub fn warning_sections(report: &HealthReport) -> Vec<(&'static str, Vec<&Warning>)> {
    let mut sections = Vec::new();
    if report.enabled_checks.commit_quality {
        sections.push((
            "commit_quality",
            report.history.commit_quality_warnings.iter().collect(),
        ));
    }
    if let Some(security) = &report.security {
        sections.push(("security", security.secrets_warnings.iter().collect()));
    }
    if let Some(language) = &report.language {
        sections.push((
            "language_specific",
            language.language_warnings.iter().collect(),
        ));
    }
    if let Some(code_quality) = &report.code_quality {
        sections.push((
            "code_quality",
            code_quality
                .code_quality_warnings
                .iter()
                .map(|tagged| &tagged.warning)
                .collect(),
        ));
    }
    if let Some(coverage) = &report.coverage {
        sections.push(("coverage", coverage.coverage_warnings.iter().collect()));
    }
    sections
}

/// Display label for a breakdown category.
pub fn category_label(category: &str) -> &str {
    match category {
        "base_score" => "Base Score",
        "structure" => "Repository Structure",
        "history" => "Git History",
        "commit_quality" => "Commit Quality",
        "security" => "Security",
        "language_specific" => "Language Checks",
        "code_quality" => "Code Quality",
        "coverage" => "Test Coverage",
        "final_score" => "Final Score",
        other => other,
    }
}
