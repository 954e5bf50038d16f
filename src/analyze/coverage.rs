//! Coverage estimate from naming conventions: `tests/test_foo.py` covers
//! `foo.py`, and each test function is assumed to exercise two functions.

use super::python::{module_name, PythonParser};
use crate::scan::SourceTree;
use crate::types::report::{CoverageReport, CoverageStats, Warning};
use std::collections::BTreeMap;

pub const FUNCTION_COVERAGE_TARGET: f64 = 80.0;
pub const LINE_COVERAGE_TARGET: f64 = 70.0;
const FUNCTIONS_PER_TEST: usize = 2;
const MIN_SOURCE_CHARS: usize = 50;

const EXCLUDED_FILES: [&str; 11] = [
    "__init__.py",
    "setup.py",
    "conftest.py",
    "manage.py",
    "wsgi.py",
    "asgi.py",
    "urls.py",
    "admin.py",
    "apps.py",
    "models.py",
    "serializers.py",
];
const EXCLUDED_DIRS: [&str; 2] = ["migrations", "tests"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    pub name: String,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub line_count: usize,
}

fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with(".py") && (file_name.starts_with("test_") || file_name.ends_with("_test.py"))
}

fn is_excluded(relative: &str) -> bool {
    let mut segments: Vec<&str> = relative.split('/').collect();
    let file_name = segments.pop().unwrap_or_default();
    is_test_file(file_name)
        || EXCLUDED_FILES.contains(&file_name)
        || segments.iter().any(|dir| EXCLUDED_DIRS.contains(dir))
}

pub fn collect_source_modules(tree: &SourceTree, parser: &mut PythonParser) -> Vec<SourceModule> {
    let mut modules = Vec::new();
    for path in tree.python_files() {
        let relative = tree.relative(path);
        if is_excluded(&relative) {
            continue;
        }
        let Some(module) = parser.parse_file(path) else {
            continue;
        };
        if module.source().chars().count() < MIN_SOURCE_CHARS || !module.has_definitions() {
            continue;
        }

        let public: Vec<_> = module
            .functions()
            .into_iter()
            .filter(|function| function.top_level && !function.name.starts_with('_'))
            .collect();
        modules.push(SourceModule {
            name: module_name(&relative),
            line_count: public.iter().map(|function| function.line_span()).sum(),
            functions: public.into_iter().map(|function| function.name).collect(),
            classes: module.top_level_classes(),
        });
    }
    modules
}

/// Module a test file targets: `tests.test_utils` -> `utils`.
pub fn target_module(test_module: &str) -> String {
    test_module
        .strip_prefix("tests.")
        .unwrap_or(test_module)
        .replace("test_", "")
}

/// Test function counts keyed by the module each test file targets.
pub fn collect_test_counts(tree: &SourceTree, parser: &mut PythonParser) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for path in tree.python_files() {
        let relative = tree.relative(path);
        let is_test = relative
            .rsplit('/')
            .next()
            .is_some_and(|name| name.starts_with("test_"));
        if !is_test {
            continue;
        }
        let Some(module) = parser.parse_file(path) else {
            continue;
        };
        let tests = module
            .functions()
            .iter()
            .filter(|function| function.name.starts_with("test_"))
            .count();
        *counts
            .entry(target_module(&module_name(&relative)))
            .or_insert(0) += tests;
    }
    counts
}

pub fn estimate_coverage(
    modules: &[SourceModule],
    test_counts: &BTreeMap<String, usize>,
) -> CoverageReport {
    let mut warnings = Vec::new();
    let mut total_functions = 0;
    let mut tested_functions = 0;
    let mut total_lines = 0;
    let mut covered_lines = 0.0;

    for module in modules {
        let function_count = module.functions.len();
        total_functions += function_count;
        total_lines += module.line_count;

        match test_counts.get(&module.name) {
            Some(&tests) => {
                let covered = (FUNCTIONS_PER_TEST * tests).min(function_count);
                tested_functions += covered;
                if function_count > 0 {
                    covered_lines +=
                        covered as f64 / function_count as f64 * module.line_count as f64;
                }
            }
            None => {
                let short_name = module.name.rsplit('.').next().unwrap_or(&module.name);
                warnings.push(Warning::new(
                    format!("No test file found for module '{}'", module.name),
                    format!("Add tests/test_{short_name}.py covering its public functions."),
                ));
            }
        }
    }

    let function_coverage_pct = percentage(tested_functions as f64, total_functions as f64);
    let line_coverage_est_pct = percentage(covered_lines, total_lines as f64);

    if !modules.is_empty() {
        if function_coverage_pct < FUNCTION_COVERAGE_TARGET {
            warnings.push(Warning::new(
                format!(
                    "Low function coverage: {function_coverage_pct:.1}% (target {FUNCTION_COVERAGE_TARGET:.0}%)"
                ),
                "Write tests for untested public functions.",
            ));
        }
        if line_coverage_est_pct < LINE_COVERAGE_TARGET {
            warnings.push(Warning::new(
                format!(
                    "Low estimated line coverage: {line_coverage_est_pct:.1}% (target {LINE_COVERAGE_TARGET:.0}%)"
                ),
                "Cover the longest functions first; they carry most of the untested lines.",
            ));
        }
    }

    CoverageReport {
        coverage_stats: CoverageStats {
            total_modules: modules.len(),
            total_functions,
            tested_functions,
            function_coverage_pct: round_tenth(function_coverage_pct),
            total_lines,
            estimated_covered_lines: covered_lines.round() as usize,
            line_coverage_est_pct: round_tenth(line_coverage_est_pct),
        },
        coverage_warnings: warnings,
    }
}

pub fn analyze_coverage(tree: &SourceTree, parser: &mut PythonParser) -> CoverageReport {
    let modules = collect_source_modules(tree, parser);
    let test_counts = collect_test_counts(tree, parser);
    tracing::debug!(
        "coverage: {} source module(s) with {} class(es), {} test target(s)",
        modules.len(),
        modules.iter().map(|module| module.classes.len()).sum::<usize>(),
        test_counts.len()
    );
    estimate_coverage(&modules, &test_counts)
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
