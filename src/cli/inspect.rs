//! Single-file and environment inspection: file, base-url

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::base_url::detect_base_url;
use crate::parser::extract_file;
use crate::scanner::RouteScanner;

/// Print one file's analysis (constants, bindings, mounts, routes) as JSON.
pub fn file(scanner: &RouteScanner, root: &Path, path: &Path) -> Result<()> {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let text = fs::read_to_string(&full)
        .with_context(|| format!("Failed to read {}", full.display()))?;

    let analysis = extract_file(&full, &text, scanner.config().scan.chain_window);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

/// Print the detected base URL, or nothing.
pub fn base_url(scanner: &RouteScanner, root: &Path) -> Result<()> {
    if let Some(url) = detect_base_url(root, &scanner.config().base_url) {
        println!("{}", url);
    }
    Ok(())
}
