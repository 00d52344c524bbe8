//
//  base_url.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Base-URL hint from `.env*` files in the scan root.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::BaseUrlConfig;

/// `.env*` files directly in `root`, sorted by name.
fn env_files(root: &Path, limit: usize) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".env"))
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files.truncate(limit);
    files
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// First value of the first configured key found in `text`.
pub fn find_in_text(text: &str, keys: &[String]) -> Option<String> {
    keys.iter().find_map(|key| {
        let pattern = format!(r"(?m)^{}\s*=\s*(.+)$", regex::escape(key));
        let re = Regex::new(&pattern).ok()?;
        let caps = re.captures(text)?;
        let value = strip_quotes(caps[1].trim()).trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Look for a base URL in the `.env*` files of `root`. Unreadable files are skipped.
pub fn detect_base_url(root: &Path, config: &BaseUrlConfig) -> Option<String> {
    env_files(root, config.max_env_files)
        .into_iter()
        .find_map(|file| {
            let text = fs::read_to_string(&file).ok()?;
            let found = find_in_text(&text, &config.keys);
            if let Some(url) = &found {
                debug!(file = %file.display(), url = %url, "base url hint");
            }
            found
        })
}
