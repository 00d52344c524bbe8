//
//  error.rs
//  Routescope
//
//  Created by hak (tharun)
//

use std::path::PathBuf;

/// Errors surfaced by a scan. Everything below the corpus layer is total,
/// so these only describe failures to enumerate or read the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("File not in corpus: {}", .0.display())]
    UnknownFile(PathBuf),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
