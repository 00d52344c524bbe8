//
//  mod.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Source snapshots the scanner reads from.

mod fs;
mod memory;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use fs::FsCorpus;
pub use memory::MemoryCorpus;

/// A snapshot of source files.
///
/// Reads are independent and may run in parallel.
pub trait Corpus: Sync {
    /// Every file to scan.
    fn list_files(&self) -> Result<Vec<PathBuf>>;

    /// Full text of one listed file.
    fn read_text(&self, file: &Path) -> Result<String>;

    /// Directory the snapshot was taken from, if it has one.
    fn root(&self) -> Option<&Path> {
        None
    }
}
