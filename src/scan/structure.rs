use super::filesystem::{dir_exists, file_exists};
use crate::types::report::StructureReport;
use std::path::Path;

const LICENSE_VARIANTS: [&str; 5] = ["LICENSE", "LICENSE.txt", "LICENSE.md", "license", "License"];

pub fn detect_structure(root: &Path) -> StructureReport {
    StructureReport {
        has_readme: file_exists(&root.join("README.md")),
        has_license: LICENSE_VARIANTS
            .iter()
            .any(|name| file_exists(&root.join(name))),
        has_tests: has_tests_dir(root),
        has_gitignore: file_exists(&root.join(".gitignore")),
    }
}

pub fn has_tests_dir(root: &Path) -> bool {
    dir_exists(&root.join("tests")) || dir_exists(&root.join("__tests__"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn detect_structure_finds_conventional_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("README.md"), "# Test Repo").expect("readme should write");
        fs::write(dir.path().join("LICENSE.txt"), "MIT License").expect("license should write");
        fs::create_dir_all(dir.path().join("__tests__")).expect("tests dir should create");
        fs::write(dir.path().join(".gitignore"), "*.pyc\n").expect("gitignore should write");

        let report = detect_structure(dir.path());
        assert!(report.has_readme);
        assert!(report.has_license);
        assert!(report.has_tests);
        assert!(report.has_gitignore);
    }

    #[test]
    fn detect_structure_on_empty_dir_is_all_false() {
        let dir = TempDir::new().expect("temp dir should be created");
        assert_eq!(detect_structure(dir.path()), StructureReport::default());
    }

    #[test]
    fn tests_file_is_not_a_tests_directory() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("tests"), "").expect("file should write");
        assert!(!detect_structure(dir.path()).has_tests);
    }
}
