//
//  config.rs
//  Routescope
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::{Result, ScanError};

/// Top-level Routescope configuration (`routescope.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutescopeConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub base_url: BaseUrlConfig,
}

/// Which files are scanned and how far chains are followed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Source extensions, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names never descended into, even without .gitignore.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    /// Bytes after a `.route(...)` close searched for chained methods.
    #[serde(default = "default_chain_window")]
    pub chain_window: usize,
}

/// Caps on prefix propagation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Prefixes with more segments than this are discarded.
    #[serde(default = "default_max_prefix_depth")]
    pub max_prefix_depth: usize,
    /// Maximum relaxation passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

/// Base-URL hint lookup in `.env*` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUrlConfig {
    #[serde(default = "default_base_url_keys")]
    pub keys: Vec<String>,
    #[serde(default = "default_max_env_files")]
    pub max_env_files: usize,
}

fn default_extensions() -> Vec<String> {
    crate::resolve::path::SOURCE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_ignore_dirs() -> Vec<String> {
    [
        "node_modules",
        "bower_components",
        "jspm_packages",
        "vendor",
        "dist",
        "build",
        "out",
        "coverage",
        ".git",
        ".svn",
        ".hg",
        ".next",
        ".nuxt",
        ".output",
        ".cache",
        ".turbo",
        "target",
    ]
    .iter()
    .map(|dir| dir.to_string())
    .collect()
}

fn default_chain_window() -> usize {
    400
}

fn default_max_prefix_depth() -> usize {
    32
}

fn default_max_passes() -> usize {
    64
}

fn default_base_url_keys() -> Vec<String> {
    [
        "BASE_URL",
        "API_BASE_URL",
        "API_URL",
        "VITE_API_URL",
        "NEXT_PUBLIC_API_URL",
    ]
    .iter()
    .map(|key| key.to_string())
    .collect()
}

fn default_max_env_files() -> usize {
    3
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_dirs: default_ignore_dirs(),
            chain_window: default_chain_window(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_prefix_depth: default_max_prefix_depth(),
            max_passes: default_max_passes(),
        }
    }
}

impl Default for BaseUrlConfig {
    fn default() -> Self {
        Self {
            keys: default_base_url_keys(),
            max_env_files: default_max_env_files(),
        }
    }
}

impl RoutescopeConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        toml::from_str(&contents).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
