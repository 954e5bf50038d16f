use super::{category_label, warning_sections, Detail};
use crate::types::report::HealthReport;

const WIDTH: usize = 70;

fn rule(output: &mut String, c: char) {
    output.push_str(&c.to_string().repeat(WIDTH));
    output.push('\n');
}

fn section(output: &mut String, title: &str) {
    rule(output, '-');
    output.push_str(&format!("  {title}\n"));
    rule(output, '-');
}

fn status(present: bool) -> &'static str {
    if present {
        "[PASS]"
    } else {
        "[FAIL]"
    }
}

pub fn to_text(report: &HealthReport, detail: Detail) -> String {
    let mut output = String::new();

    if detail == Detail::Quiet {
        output.push_str(&format!(
            "Score: {}/100 ({})\n",
            report.health_score, report.category
        ));
        for (_, warnings) in warning_sections(report) {
            for warning in warnings {
                output.push_str(&format!("- {}\n", warning.message));
            }
        }
        return output;
    }

    rule(&mut output, '=');
    output.push_str("  Git Repository Health Checker\n");
    rule(&mut output, '=');
    output.push_str(&format!("\nRepository: {}\n", report.repository));
    output.push_str(&format!(
        "Analysis Date: {}\n\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S")
    ));

    section(&mut output, "HEALTH SCORE");
    output.push_str(&format!(
        "Score: {}/100 ({})\n\n",
        report.health_score, report.category
    ));

    section(&mut output, "REPOSITORY STRUCTURE");
    output.push_str(&format!("  {} README.md\n", status(report.structure.has_readme)));
    output.push_str(&format!("  {} LICENSE file\n", status(report.structure.has_license)));
    output.push_str(&format!(
        "  {} Tests directory (tests/ or __tests__/)\n",
        status(report.structure.has_tests)
    ));
    output.push_str(&format!("  {} .gitignore\n\n", status(report.structure.has_gitignore)));

    section(&mut output, "GIT HISTORY");
    output.push_str(&format!("  Total Commits: {}\n", report.history.total_commits));
    match report.history.most_recent_commit_date {
        Some(date) => output.push_str(&format!(
            "  Most Recent Commit: {}\n\n",
            date.format("%Y-%m-%d %H:%M:%S")
        )),
        None => output.push_str("  Most Recent Commit: N/A\n\n"),
    }

    if let Some(language) = &report.language {
        output.push_str(&format!("  Primary Language: {}\n\n", language.primary_language));
    }

    section(&mut output, "SCORE BREAKDOWN");
    for (name, points) in report.breakdown.entries() {
        output.push_str(&format!("  {:<24} {:>+5}\n", category_label(name), points));
    }
    output.push('\n');

    for (name, warnings) in warning_sections(report) {
        section(&mut output, &category_label(name).to_uppercase());
        if warnings.is_empty() {
            output.push_str("  No issues found\n\n");
            continue;
        }
        for warning in warnings {
            output.push_str(&format!("  [WARN] {}\n", warning.message));
            output.push_str(&format!("         Tip: {}\n", warning.tip));
        }
        output.push('\n');
    }

    if detail == Detail::Verbose {
        if let Some(security) = &report.security {
            output.push_str(&format!("  Files scanned for secrets: {}\n", security.scanned_files));
        }
        if let Some(coverage) = &report.coverage {
            let stats = &coverage.coverage_stats;
            output.push_str(&format!(
                "  Coverage estimate: {} module(s), functions {}/{} ({:.1}%), lines {}/{} ({:.1}%)\n",
                stats.total_modules,
                stats.tested_functions,
                stats.total_functions,
                stats.function_coverage_pct,
                stats.estimated_covered_lines,
                stats.total_lines,
                stats.line_coverage_est_pct
            ));
        }
        output.push('\n');
    }

    rule(&mut output, '=');
    output
}
