use super::{category_label, warning_sections};
use crate::types::report::HealthReport;

pub fn to_markdown(report: &HealthReport) -> String {
    let mut output = String::new();
    output.push_str("# Git Repository Health Report\n\n");
    output.push_str(&format!("- **Repository:** `{}`\n", report.repository));
    output.push_str(&format!(
        "- **Analyzed:** {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "- **Health score:** {}/100 ({})\n\n",
        report.health_score, report.category
    ));

    output.push_str("## Repository Structure\n\n");
    for (present, label) in [
        (report.structure.has_readme, "README.md"),
        (report.structure.has_license, "LICENSE file"),
        (report.structure.has_tests, "Tests directory (tests/ or __tests__/)"),
        (report.structure.has_gitignore, ".gitignore"),
    ] {
        output.push_str(&format!(
            "- [{}] {}\n",
            if present { "x" } else { " " },
            label
        ));
    }
    output.push('\n');

    output.push_str("## Git History\n\n");
    output.push_str(&format!(
        "- Total commits: {}\n",
        report.history.total_commits
    ));
    output.push_str(&format!(
        "- Most recent commit: {}\n\n",
        report
            .history
            .most_recent_commit_date
            .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));

    output.push_str("## Score Breakdown\n\n");
    output.push_str("| Category | Points |\n|---|---:|\n");
    for (name, points) in report.breakdown.entries() {
        output.push_str(&format!("| {} | {:+} |\n", category_label(name), points));
    }
    output.push('\n');

    for (name, warnings) in warning_sections(report) {
        output.push_str(&format!("## {}\n\n", category_label(name)));
        if warnings.is_empty() {
            output.push_str("- none\n\n");
            continue;
        }
        for warning in warnings {
            output.push_str(&format!("- {}\n  - _Tip:_ {}\n", warning.message, warning.tip));
        }
        output.push('\n');
    }

    if let Some(coverage) = &report.coverage {
        let stats = &coverage.coverage_stats;
        output.push_str("## Coverage Estimate\n\n");
        output.push_str(&format!(
            "- Modules: {}\n- Functions tested: {}/{} ({:.1}%)\n- Lines covered (est.): {}/{} ({:.1}%)\n",
            stats.total_modules,
            stats.tested_functions,
            stats.total_functions,
            stats.function_coverage_pct,
            stats.estimated_covered_lines,
            stats.total_lines,
            stats.line_coverage_est_pct
        ));
    }

    output
}
