pub mod commits;
pub mod coverage;
pub mod entropy;
pub mod imports;
pub mod long_functions;
pub mod python;

use crate::scan::git_meta::HistorySource;
use crate::scan::language::{check_language, detect_primary_language};
use crate::scan::secrets::scan_secrets;
use crate::scan::structure::detect_structure;
use crate::scan::SourceTree;
use crate::scoring;
use crate::types::config::EnabledChecks;
use crate::types::report::{
    CodeQualityReport, CoverageReport, HealthReport, HistoryReport, Language, LanguageReport,
    SecurityReport, StructureReport,
};
use chrono::{DateTime, Utc};
use python::PythonParser;
use std::path::Path;

/// Reports from one run. Optional reports exist only for requested checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResults {
    pub structure: StructureReport,
    pub history: HistoryReport,
    pub security: Option<SecurityReport>,
    pub language: Option<LanguageReport>,
    pub code_quality: Option<CodeQualityReport>,
    pub coverage: Option<CoverageReport>,
}

pub fn analyze(
    root: &Path,
    checks: &EnabledChecks,
    history: &dyn HistorySource,
    now: DateTime<Utc>,
) -> HealthReport {
    let results = collect(root, checks, history);
    let (health_score, breakdown) = scoring::calculate_health_score(&results, checks, now);
    tracing::info!("health score {}/100", health_score);

    HealthReport {
        repository: root.display().to_string(),
        analyzed_at: now,
        health_score,
        category: scoring::score_category(health_score),
        breakdown,
        enabled_checks: *checks,
        structure: results.structure,
        history: results.history,
        security: results.security,
        language: results.language,
        code_quality: results.code_quality,
        coverage: results.coverage,
    }
}

pub fn collect(root: &Path, checks: &EnabledChecks, history: &dyn HistorySource) -> AnalysisResults {
    tracing::info!("checking repository structure");
    let structure = detect_structure(root);

    tracing::info!("reading git history");
    let history = history_report(history, checks.commit_quality);

    let security = checks.security.then(|| {
        tracing::info!("scanning for secrets");
        scan_secrets(root)
    });

    let tree = checks
        .needs_language_detection()
        .then(|| SourceTree::discover(root));
    let primary_language = tree
        .as_ref()
        .map(|tree| detect_primary_language(&tree.files))
        .unwrap_or_default();
    tracing::info!("primary language: {}", primary_language);

    let language = checks.language.then(|| {
        tracing::info!("running {} checks", primary_language);
        check_language(root, primary_language)
    });

    let python_tree = tree
        .as_ref()
        .filter(|_| primary_language == Language::Python);
    let mut parser = python_tree
        .filter(|_| checks.code_quality || checks.coverage)
        .and_then(|_| PythonParser::new());

    let code_quality = checks.code_quality.then(|| {
        tracing::info!("analyzing code quality");
        python_tree
            .map(|tree| code_quality_report(tree, parser.as_mut()))
            .unwrap_or_default()
    });

    let coverage = checks.coverage.then(|| {
        tracing::info!("estimating test coverage");
        match (python_tree, parser.as_mut()) {
            (Some(tree), Some(parser)) => coverage::analyze_coverage(tree, parser),
            _ => CoverageReport::default(),
        }
    });

    AnalysisResults {
        structure,
        history,
        security,
        language,
        code_quality,
        coverage,
    }
}

fn history_report(source: &dyn HistorySource, check_commits: bool) -> HistoryReport {
    let snapshot = source.snapshot(check_commits);
    let commit_quality_warnings = if check_commits {
        commits::check_commit_quality(&snapshot.recent_summaries)
    } else {
        Vec::new()
    };
    HistoryReport {
        total_commits: snapshot.total_commits,
        most_recent_commit_date: snapshot
            .most_recent_commit_date
            .filter(|_| snapshot.total_commits > 0),
        commit_quality_warnings,
    }
}

fn code_quality_report(tree: &SourceTree, parser: Option<&mut PythonParser>) -> CodeQualityReport {
    let mut code_quality_warnings = Vec::new();
    if let Some(parser) = parser {
        code_quality_warnings.extend(long_functions::check_long_functions(tree, parser));
        code_quality_warnings.extend(imports::check_circular_dependencies(tree, parser));
    }
    code_quality_warnings.extend(entropy::check_high_entropy_strings(tree));
    CodeQualityReport {
        code_quality_warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::git_meta::HistorySnapshot;
    use crate::types::report::CodeQualityKind;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    struct FakeHistory(HistorySnapshot);

    impl HistorySource for FakeHistory {
        fn snapshot(&self, include_summaries: bool) -> HistorySnapshot {
            let mut snapshot = self.0.clone();
            if !include_summaries {
                snapshot.recent_summaries.clear();
            }
            snapshot
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
            .single()
            .expect("valid date")
    }

    fn history(commits: u64, summaries: &[&str]) -> FakeHistory {
        FakeHistory(HistorySnapshot {
            total_commits: commits,
            most_recent_commit_date: Some(now() - Duration::days(1)),
            recent_summaries: summaries.iter().map(|line| line.to_string()).collect(),
        })
    }

    fn python_repo() -> TempDir {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("README.md"), "# Test Repo").expect("readme should write");
        fs::write(dir.path().join("LICENSE"), "MIT License").expect("license should write");
        fs::create_dir_all(dir.path().join("tests")).expect("tests dir should create");
        fs::write(dir.path().join("tests/__init__.py"), "").expect("init should write");
        fs::write(dir.path().join(".gitignore"), "*.pyc\n__pycache__/").expect("gitignore write");
        fs::write(dir.path().join("main.py"), "print(\"hello\")").expect("main should write");
        fs::write(dir.path().join("utils.py"), "def func(): pass").expect("utils should write");
        dir
    }

    #[test]
    fn unrequested_checks_produce_no_reports() {
        let repo = python_repo();
        let results = collect(repo.path(), &EnabledChecks::default(), &history(3, &["a1 wip"]));
        assert!(results.security.is_none());
        assert!(results.language.is_none());
        assert!(results.code_quality.is_none());
        assert!(results.coverage.is_none());
        assert!(results.history.commit_quality_warnings.is_empty());
        assert_eq!(results.history.total_commits, 3);
    }

    #[test]
    fn zero_commits_drop_the_commit_date() {
        let repo = python_repo();
        let results = collect(repo.path(), &EnabledChecks::default(), &history(0, &[]));
        assert!(results.history.most_recent_commit_date.is_none());
    }

    #[test]
    fn full_run_on_python_repo() {
        let repo = python_repo();
        fs::write(repo.path().join("a.py"), "import b\n").expect("a should write");
        fs::write(repo.path().join("b.py"), "import a\n").expect("b should write");

        let report = analyze(
            repo.path(),
            &EnabledChecks::all(),
            &history(5, &["abc1234 wip"]),
            now(),
        );

        assert_eq!(report.breakdown.base_score, 100);
        assert_eq!(report.breakdown.commit_quality, Some(-20));
        assert_eq!(
            report.language.as_ref().map(|l| l.primary_language),
            Some(Language::Python)
        );
        // requirements.txt is missing; tests/ exists.
        assert_eq!(report.breakdown.language_specific, Some(-10));
        let code_quality = report.code_quality.as_ref().expect("code quality should run");
        assert_eq!(code_quality.count(CodeQualityKind::CircularDependency), 1);
        assert_eq!(report.breakdown.code_quality, Some(-15));
        assert_eq!(report.breakdown.security, Some(0));
        assert!(report.health_score <= 100);
        assert_eq!(
            i32::from(report.health_score),
            report.breakdown.final_score
        );
    }

    #[test]
    fn python_only_analyzers_are_empty_for_other_languages() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("main.go"), "package main\n").expect("go file should write");

        let results = collect(dir.path(), &EnabledChecks::all(), &history(1, &[]));
        assert_eq!(results.code_quality, Some(CodeQualityReport::default()));
        assert_eq!(results.coverage, Some(CoverageReport::default()));
        assert_eq!(
            results.language.map(|language| language.language_warnings.len()),
            Some(2)
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let repo = python_repo();
        let source = history(4, &["abc1234 Merge branch 'x' into y", "def5678 temp"]);
        let first = analyze(repo.path(), &EnabledChecks::all(), &source, now());
        let second = analyze(repo.path(), &EnabledChecks::all(), &source, now());
        assert_eq!(first.health_score, second.health_score);
        assert_eq!(first.breakdown, second.breakdown);
    }
}
