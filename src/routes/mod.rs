//
//  mod.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Fully-qualified routes: the output of a scan.

pub mod assembler;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parser::HttpMethod;

pub use assembler::{app_prefix_guess, assemble_routes};

/// One route as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub method: HttpMethod,
    /// Best-known local path.
    pub path: String,
    /// Local path behind every mount prefix.
    pub full_path: String,
    /// Original path expression text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    pub file: PathBuf,
    /// Zero-based.
    pub line: usize,
    pub column: usize,
}

/// Result of scanning a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub routes: Vec<RouteNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}
