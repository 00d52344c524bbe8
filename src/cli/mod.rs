//! CLI module for Routescope.
//!
//! Commands:
//! - routes: fully-qualified route list (text or JSON)
//! - mounts: mount edges and resolved prefixes
//! - file: one file's analysis
//! - base-url: `.env*` base-URL hint

pub mod inspect;
pub mod routes;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::RoutescopeConfig;
use crate::scanner::RouteScanner;

#[derive(Parser)]
#[command(name = "routescope")]
#[command(about = "Routescope - static route discovery for Express-style apps", long_about = None)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/routescope.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every route with its full path
    Routes {
        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,

        /// Only routes with this HTTP method
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Show mount edges and the prefixes each file resolves to
    Mounts,

    /// Print one file's analysis as JSON
    File {
        /// File path (relative to root or absolute)
        path: PathBuf,
    },

    /// Print the base URL found in .env files, if any
    BaseUrl,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join("routescope.toml"))
    }

    pub fn scanner(&self) -> RouteScanner {
        RouteScanner::new(RoutescopeConfig::load(&self.config_path()))
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let scanner = cli.scanner();
    let root = cli.root.as_path();

    match &cli.command {
        Commands::Routes { json, method } => routes::routes(&scanner, root, *json, method.as_deref()),
        Commands::Mounts => routes::mounts(&scanner, root),
        Commands::File { path } => inspect::file(&scanner, root, path),
        Commands::BaseUrl => inspect::base_url(&scanner, root),
    }
}

/// Path shown to the user: relative to `root` when possible.
pub(crate) fn display_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .display()
        .to_string()
}
