use crate::scan::SourceTree;
use crate::types::report::{CodeQualityKind, CodeQualityWarning, Warning};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const MIN_LITERAL_LEN: usize = 10;
pub const ENTROPY_THRESHOLD: f64 = 4.5;

static ASSIGNMENT_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn assignment_pattern() -> Option<&'static Regex> {
    ASSIGNMENT_PATTERN
        .get_or_init(|| {
            Regex::new(
                r#"(?i)\b(api_key|apikey|secret|token|password|pwd|key)\b["']?\s*[:=]\s*(?:"([^"\n]*)"|'([^'\n]*)')"#,
            )
            .map_err(|e| tracing::error!("invalid assignment pattern: {}", e))
            .ok()
        })
        .as_ref()
}

/// Shannon entropy in bits per character.
pub fn shannon_entropy(value: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in value.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
        .max(0.0)
}

/// Credential-named variables bound to high-entropy literals, as
/// `(variable, literal)` pairs.
pub fn find_suspicious_assignments(source: &str) -> Vec<(String, String)> {
    let Some(pattern) = assignment_pattern() else {
        return Vec::new();
    };
    pattern
        .captures_iter(source)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            let literal = captures.get(2).or_else(|| captures.get(3))?.as_str();
            (literal.chars().count() > MIN_LITERAL_LEN && shannon_entropy(literal) > ENTROPY_THRESHOLD)
                .then(|| (name.to_string(), literal.to_string()))
        })
        .collect()
}

pub fn check_high_entropy_strings(tree: &SourceTree) -> Vec<CodeQualityWarning> {
    let mut warnings = Vec::new();
    for path in tree.python_files() {
        let Ok(source) = std::fs::read_to_string(path) else {
            tracing::debug!("skipping unreadable {}", path.display());
            continue;
        };
        let relative = tree.relative(path);
        for (name, _) in find_suspicious_assignments(&source) {
            warnings.push(CodeQualityWarning {
                kind: CodeQualityKind::HighEntropy,
                warning: Warning::new(
                    format!("High-entropy string assigned to '{name}' in {relative}"),
                    "This looks like a hardcoded secret; load it from the environment instead.",
                ),
            });
        }
    }
    warnings
}
