use crate::scan::git_meta::RECENT_COMMIT_LIMIT;
use crate::types::report::Warning;
use std::collections::BTreeSet;

pub const BAD_KEYWORDS: [&str; 6] = ["wip", "fix", "temp", "test", "debug", "hack"];
pub const MIN_SUBJECT_CHARS: usize = 10;

/// Classifies `"<hash> <subject>"` lines, newest first. Duplicate messages
/// collapse; the result is sorted by message.
pub fn check_commit_quality(summaries: &[String]) -> Vec<Warning> {
    let mut warnings = BTreeSet::new();
    for line in summaries.iter().take(RECENT_COMMIT_LIMIT) {
        let Some((_, subject)) = line.split_once(' ') else {
            continue;
        };
        let subject = subject.trim();
        if subject.is_empty() {
            continue;
        }
        let folded = subject.to_lowercase();

        if let Some(keyword) = BAD_KEYWORDS
            .iter()
            .find(|keyword| contains_word(&folded, keyword))
        {
            warnings.insert(Warning::new(
                format!("Bad commit message: '{line}' (contains '{keyword}')"),
                "Describe what the change does and why; squash WIP commits before merging.",
            ));
        }

        if subject.chars().count() < MIN_SUBJECT_CHARS && !folded.starts_with("merge") {
            warnings.insert(Warning::new(
                format!("Very short commit message: '{line}'"),
                "Use a subject of at least 10 characters that summarizes the change.",
            ));
        }
    }
    warnings.into_iter().collect()
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn wip_commit_is_both_bad_and_short() {
        let warnings = check_commit_quality(&lines(&["abc1234 wip"]));
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Bad commit message: 'abc1234 wip' (contains 'wip')",
                "Very short commit message: 'abc1234 wip'",
            ]
        );
    }

    #[test]
    fn merge_commits_are_not_short() {
        let warnings = check_commit_quality(&lines(&["abc1234 Merge branch 'x' into y"]));
        assert!(warnings.is_empty());

        let warnings = check_commit_quality(&lines(&["abc1234 Merge"]));
        assert!(warnings.is_empty());
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let warnings = check_commit_quality(&lines(&[
            "abc1234 Add testing harness for parser",
            "def5678 Prefix handling in tokenizer module",
        ]));
        assert!(warnings.is_empty());

        let warnings = check_commit_quality(&lines(&["abc1234 Fix bug in parser module"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.ends_with("(contains 'fix')"));
    }

    #[test]
    fn duplicates_collapse_and_missing_subjects_are_skipped() {
        let warnings = check_commit_quality(&lines(&[
            "abc1234 temp",
            "abc1234 temp",
            "deadbeef",
        ]));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn only_first_hundred_commits_are_considered() {
        let mut summaries: Vec<String> = (0..RECENT_COMMIT_LIMIT)
            .map(|i| format!("c{i:04} Implement feature number {i}"))
            .collect();
        summaries.push("zzz9999 wip".to_string());
        assert!(check_commit_quality(&summaries).is_empty());
    }
}
