//
//  scanner.rs
//  Routescope
//
//  Created by hak (tharun)
//

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::base_url::detect_base_url;
use crate::config::RoutescopeConfig;
use crate::corpus::{Corpus, FsCorpus};
use crate::error::Result;
use crate::graph::{build_mount_graph, resolve_prefixes, MountGraph, PrefixResolution};
use crate::parser::{extract_file, FileAnalysis};
use crate::routes::{assemble_routes, RouteNode, ScanResult};

/// Every intermediate product of one scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub analyses: Vec<FileAnalysis>,
    pub graph: MountGraph,
    pub prefixes: PrefixResolution,
    pub routes: Vec<RouteNode>,
    pub base_url: Option<String>,
}

impl ScanReport {
    pub fn analysis(&self, file: &Path) -> Option<&FileAnalysis> {
        self.analyses.iter().find(|a| a.file == file)
    }

    pub fn into_result(self) -> ScanResult {
        ScanResult {
            routes: self.routes,
            base_url: self.base_url,
        }
    }
}

/// Runs extraction, mount resolution and assembly over a corpus.
#[derive(Debug, Clone, Default)]
pub struct RouteScanner {
    config: RoutescopeConfig,
}

impl RouteScanner {
    pub fn new(config: RoutescopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutescopeConfig {
        &self.config
    }

    /// Read and analyse every file. Unreadable files are skipped.
    fn extract_all<C: Corpus + ?Sized>(&self, corpus: &C) -> Result<Vec<FileAnalysis>> {
        let mut files: Vec<PathBuf> = corpus.list_files()?;
        files.sort();
        files.dedup();

        let chain_window = self.config.scan.chain_window;
        let analyses = files
            .par_iter()
            .filter_map(|file| match corpus.read_text(file) {
                Ok(text) => {
                    let analysis = extract_file(file, &text, chain_window);
                    debug!(
                        file = %file.display(),
                        routes = analysis.routes.len(),
                        mounts = analysis.mounts.len(),
                        "extracted"
                    );
                    Some(analysis)
                }
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "skipping unreadable file");
                    None
                }
            })
            .collect();
        Ok(analyses)
    }

    /// Full pipeline, keeping every stage.
    pub fn analyze<C: Corpus + ?Sized>(&self, corpus: &C) -> Result<ScanReport> {
        let analyses = self.extract_all(corpus)?;
        let graph = build_mount_graph(&analyses);
        let prefixes = resolve_prefixes(&graph, &self.config.graph);
        let routes = assemble_routes(&analyses, &prefixes);
        let base_url = corpus
            .root()
            .and_then(|root| detect_base_url(root, &self.config.base_url));

        info!(
            files = analyses.len(),
            mounts = graph.mount_count(),
            routes = routes.len(),
            truncated = prefixes.truncated,
            "scan complete"
        );

        Ok(ScanReport {
            analyses,
            graph,
            prefixes,
            routes,
            base_url,
        })
    }

    /// Scan a corpus into its ordered route list.
    pub fn scan<C: Corpus + ?Sized>(&self, corpus: &C) -> Result<ScanResult> {
        Ok(self.analyze(corpus)?.into_result())
    }

    /// Scan the source files under `root`.
    pub fn scan_dir(&self, root: &Path) -> Result<ScanResult> {
        let corpus = FsCorpus::new(root, &self.config.scan)?;
        self.scan(&corpus)
    }
}
