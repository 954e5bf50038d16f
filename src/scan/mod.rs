pub mod filesystem;
pub mod git_meta;
pub mod language;
pub mod secrets;
pub mod structure;

use filesystem::list_files;
use std::path::{Path, PathBuf};

/// The repository file listing, walked once and shared by every analyzer.
#[derive(Debug, Clone)]
pub struct SourceTree {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

impl SourceTree {
    pub fn discover(root: &Path) -> Self {
        let files = list_files(root);
        tracing::debug!("discovered {} file(s) under {}", files.len(), root.display());
        Self {
            root: root.to_path_buf(),
            files,
        }
    }

    pub fn python_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files
            .iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "py"))
    }

    pub fn relative(&self, path: &Path) -> String {
        filesystem::relative_display(&self.root, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn python_files_filters_by_extension() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("pkg")).expect("pkg dir should create");
        fs::write(dir.path().join("pkg/core.py"), "").expect("core should write");
        fs::write(dir.path().join("index.js"), "").expect("js should write");
        fs::write(dir.path().join("setup.pyc"), "").expect("pyc should write");

        let tree = SourceTree::discover(dir.path());
        let python: Vec<_> = tree.python_files().map(|path| tree.relative(path)).collect();
        assert_eq!(python, ["pkg/core.py"]);
        assert_eq!(tree.files.len(), 3);
    }
}
