//
//  memory.rs
//  Routescope
//
//  Created by hak (tharun)
//

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Corpus;
use crate::error::{Result, ScanError};

/// In-memory corpus, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), text.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Corpus for MemoryCorpus {
    fn list_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_text(&self, file: &Path) -> Result<String> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| ScanError::UnknownFile(file.to_path_buf()))
    }
}
