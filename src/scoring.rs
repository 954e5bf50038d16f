//! Turns analyzer reports into a bounded 0-100 score and a signed breakdown.

use crate::analyze::AnalysisResults;
use crate::types::config::EnabledChecks;
use crate::types::report::{CodeQualityKind, CodeQualityReport};
use crate::types::scoring::{HealthCategory, ScoreBreakdown};
use chrono::{DateTime, Duration, Utc};

pub const README_POINTS: i32 = 20;
pub const LICENSE_POINTS: i32 = 15;
pub const TESTS_POINTS: i32 = 25;
pub const GITIGNORE_POINTS: i32 = 15;
pub const COMMITS_POINTS: i32 = 15;
pub const RECENT_ACTIVITY_POINTS: i32 = 10;
pub const RECENT_ACTIVITY_DAYS: i64 = 180;
pub const MAX_SCORE: i32 = 100;

/// Points per warning and the cap for one penalty bucket.
#[derive(Debug, Clone, Copy)]
struct Penalty {
    per_warning: i32,
    cap: i32,
}

impl Penalty {
    const fn new(per_warning: i32, cap: i32) -> Self {
        Self { per_warning, cap }
    }

    fn apply(self, count: usize) -> i32 {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        count.saturating_mul(self.per_warning).min(self.cap)
    }
}

const COMMIT_QUALITY: Penalty = Penalty::new(10, 30);
const SECURITY: Penalty = Penalty::new(20, 50);
const LANGUAGE: Penalty = Penalty::new(10, 30);
const LONG_FUNCTION: Penalty = Penalty::new(5, 20);
const CIRCULAR_DEPENDENCY: Penalty = Penalty::new(15, 30);
const HIGH_ENTROPY: Penalty = Penalty::new(20, 40);
const COVERAGE: Penalty = Penalty::new(15, 45);

pub fn calculate_health_score(
    results: &AnalysisResults,
    checks: &EnabledChecks,
    now: DateTime<Utc>,
) -> (u8, ScoreBreakdown) {
    let structure = &results.structure;
    let structure_points = [
        (structure.has_readme, README_POINTS),
        (structure.has_license, LICENSE_POINTS),
        (structure.has_tests, TESTS_POINTS),
        (structure.has_gitignore, GITIGNORE_POINTS),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum::<i32>();

    let history = &results.history;
    let mut history_points = 0;
    if history.total_commits > 0 {
        history_points += COMMITS_POINTS;
    }
    if history
        .most_recent_commit_date
        .is_some_and(|date| date >= now - Duration::days(RECENT_ACTIVITY_DAYS))
    {
        history_points += RECENT_ACTIVITY_POINTS;
    }

    let mut breakdown = ScoreBreakdown {
        base_score: structure_points + history_points,
        structure: structure_points,
        history: history_points,
        ..ScoreBreakdown::default()
    };

    breakdown.commit_quality = checks
        .commit_quality
        .then(|| -COMMIT_QUALITY.apply(history.commit_quality_warnings.len()));
    breakdown.security = checks.security.then(|| {
        -SECURITY.apply(
            results
                .security
                .as_ref()
                .map_or(0, |security| security.secrets_warnings.len()),
        )
    });
    breakdown.language_specific = checks.language.then(|| {
        -LANGUAGE.apply(
            results
                .language
                .as_ref()
                .map_or(0, |language| language.language_warnings.len()),
        )
    });
    breakdown.code_quality = checks.code_quality.then(|| {
        -results
            .code_quality
            .as_ref()
            .map_or(0, code_quality_penalty)
    });
    breakdown.coverage = checks.coverage.then(|| {
        -COVERAGE.apply(
            results
                .coverage
                .as_ref()
                .map_or(0, |coverage| coverage.coverage_warnings.len()),
        )
    });

    let final_score = (breakdown.base_score.min(MAX_SCORE) + breakdown.total_penalty()).max(0);
    breakdown.final_score = final_score;
    tracing::debug!(?breakdown, "score computed");

    (u8::try_from(final_score.min(MAX_SCORE)).unwrap_or(0), breakdown)
}

/// Each subtype is capped on its own before the three are summed.
fn code_quality_penalty(report: &CodeQualityReport) -> i32 {
    LONG_FUNCTION.apply(report.count(CodeQualityKind::LongFunction))
        + CIRCULAR_DEPENDENCY.apply(report.count(CodeQualityKind::CircularDependency))
        + HIGH_ENTROPY.apply(report.count(CodeQualityKind::HighEntropy))
}

pub fn score_category(score: u8) -> HealthCategory {
    HealthCategory::from_score(score)
}
