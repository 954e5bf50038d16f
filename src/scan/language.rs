use super::filesystem::{dir_exists, file_exists};
use super::structure::has_tests_dir;
use crate::types::report::{Language, LanguageReport, Warning};
use std::path::{Path, PathBuf};

/// Extension buckets in tie-break order.
const BUCKETS: [(Language, &[&str]); 3] = [
    (Language::Python, &["py"]),
    (Language::Javascript, &["js", "ts", "jsx", "tsx"]),
    (Language::Go, &["go"]),
];

const PYTHON_MANIFESTS: [&str; 3] = ["requirements.txt", "pyproject.toml", "setup.py"];

pub fn detect_primary_language(files: &[PathBuf]) -> Language {
    let mut counts = [0usize; BUCKETS.len()];
    for file in files {
        let Some(extension) = file.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        if let Some(index) = BUCKETS
            .iter()
            .position(|(_, extensions)| extensions.contains(&extension))
        {
            counts[index] += 1;
        }
    }

    let mut primary = Language::Unknown;
    let mut best = 0;
    for (index, (language, _)) in BUCKETS.iter().enumerate() {
        if counts[index] > best {
            best = counts[index];
            primary = *language;
        }
    }
    primary
}

pub fn check_language(root: &Path, primary_language: Language) -> LanguageReport {
    let language_warnings = match primary_language {
        Language::Python => python_warnings(root),
        Language::Javascript => javascript_warnings(root),
        Language::Go => go_warnings(root),
        Language::Unknown => Vec::new(),
    };
    LanguageReport {
        primary_language,
        language_warnings,
    }
}

fn python_warnings(root: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if !PYTHON_MANIFESTS
        .iter()
        .any(|name| file_exists(&root.join(name)))
    {
        warnings.push(Warning::new(
            "No Python dependency file found (requirements.txt, pyproject.toml or setup.py)",
            "Declare dependencies in requirements.txt or pyproject.toml so installs are reproducible.",
        ));
    }
    if !has_tests_dir(root) && !has_root_test_file(root) {
        warnings.push(Warning::new(
            "No Python tests found (no tests/ directory or test_*.py files)",
            "Add a tests/ directory with pytest-style test_*.py modules.",
        ));
    }
    warnings
}

fn has_root_test_file(root: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(root) else {
        return false;
    };
    entries.filter_map(|entry| entry.ok()).any(|entry| {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        name.starts_with("test_") && name.ends_with(".py") && entry.path().is_file()
    })
}

fn javascript_warnings(root: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let manifest = root.join("package.json");
    if !file_exists(&manifest) {
        warnings.push(Warning::new(
            "No package.json found",
            "Run `npm init` to declare dependencies and scripts.",
        ));
    }
    if dir_exists(&root.join("node_modules")) {
        warnings.push(Warning::new(
            "node_modules directory is present in the repository",
            "Add node_modules/ to .gitignore and remove it from version control.",
        ));
    }
    if file_exists(&manifest) {
        if let Some(warning) = manifest_scripts_warning(&manifest) {
            warnings.push(warning);
        }
    }
    warnings
}

fn manifest_scripts_warning(manifest: &Path) -> Option<Warning> {
    let parsed = std::fs::read_to_string(manifest)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<serde_json::Value>(&content).map_err(|e| e.to_string())
        });
    match parsed {
        Ok(value) => {
            let has_scripts = value
                .get("scripts")
                .and_then(|scripts| scripts.as_object())
                .is_some_and(|scripts| !scripts.is_empty());
            (!has_scripts).then(|| {
                Warning::new(
                    "package.json declares no scripts",
                    "Add test and build scripts so contributors know how to run the project.",
                )
            })
        }
        Err(e) => Some(Warning::new(
            format!("Could not parse package.json: {e}"),
            "Fix the JSON syntax in package.json.",
        )),
    }
}

fn go_warnings(root: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if !file_exists(&root.join("go.mod")) {
        warnings.push(Warning::new(
            "No go.mod found",
            "Run `go mod init` to enable Go modules.",
        ));
    }
    if !file_exists(&root.join("go.sum")) {
        warnings.push(Warning::new(
            "No go.sum found",
            "Run `go mod tidy` and commit go.sum to lock dependency checksums.",
        ));
    }
    warnings
}
