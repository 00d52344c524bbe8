//
//  fs.rs
//  Routescope
//
//  Created by hak (tharun)
//

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use super::Corpus;
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};

/// Source files under a directory.
///
/// Respects .gitignore and `.routescopeignore`, skips hidden entries and
/// never descends into the configured ignore directories.
#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_dirs: Vec<String>,
}

impl FsCorpus {
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ScanError::RootNotFound(root));
        }
        Ok(Self {
            root,
            extensions: config.extensions.clone(),
            ignore_dirs: config.ignore_dirs.clone(),
        })
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

impl Corpus for FsCorpus {
    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let ignore_dirs = self.ignore_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .add_custom_ignore_filename(".routescopeignore")
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !ignore_dirs.iter().any(|dir| *dir == name)
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_some_and(|ft| ft.is_file())
                && self.has_source_extension(entry.path())
            {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_text(&self, file: &Path) -> Result<String> {
        fs::read_to_string(file).map_err(|e| ScanError::io(file, e))
    }

    fn root(&self) -> Option<&Path> {
        Some(self.root.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "router.get('/x', h);").unwrap();
    }

    #[test]
    fn test_lists_source_files_only() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/app.js");
        touch(dir.path(), "src/routes/users.TS");
        touch(dir.path(), "src/readme.md");
        touch(dir.path(), "node_modules/express/index.js");
        touch(dir.path(), "dist/bundle.js");
        touch(dir.path(), ".hidden/secret.js");

        let corpus = FsCorpus::new(dir.path(), &ScanConfig::default()).unwrap();
        let files: Vec<PathBuf> = corpus
            .list_files()
            .unwrap()
            .into_iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("src/app.js"),
                PathBuf::from("src/routes/users.TS"),
            ]
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let err = FsCorpus::new(dir.path().join("nope"), &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn test_read_text() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.js");
        let corpus = FsCorpus::new(dir.path(), &ScanConfig::default()).unwrap();
        let text = corpus.read_text(&dir.path().join("a.js")).unwrap();
        assert!(text.contains("router.get"));
        assert!(matches!(
            corpus.read_text(&dir.path().join("b.js")),
            Err(ScanError::Io { .. })
        ));
        assert_eq!(corpus.root(), Some(dir.path()));
    }
}
