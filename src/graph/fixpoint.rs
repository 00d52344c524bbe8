//
//  fixpoint.rs
//  Routescope
//
//  Created by hak (tharun)
//

use petgraph::visit::Dfs;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::engine::MountGraph;
use crate::config::GraphConfig;
use crate::resolve::path::{join_paths, normalize_mount_prefix};

/// Every prefix under which each file can be reached.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrefixResolution {
    pub prefixes: BTreeMap<PathBuf, BTreeSet<String>>,
    /// Relaxation passes run.
    pub passes: usize,
    /// A cap was hit; the sets are incomplete.
    pub truncated: bool,
}

impl PrefixResolution {
    /// Prefixes of `file`, empty for files outside the graph.
    pub fn prefixes_of(&self, file: &Path) -> impl Iterator<Item = &str> + '_ {
        self.prefixes
            .get(file)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

fn segment_count(prefix: &str) -> usize {
    prefix.split('/').filter(|s| !s.is_empty()).count()
}

/// Propagate mount prefixes until no set grows.
///
/// Files nobody mounts are entry points and start with the empty prefix.
/// Files only reachable through a cycle are seeded the same way so that
/// every file ends up with at least one prefix.
pub fn resolve_prefixes(graph: &MountGraph, limits: &GraphConfig) -> PrefixResolution {
    let mut prefixes: BTreeMap<PathBuf, BTreeSet<String>> = graph
        .files()
        .map(|file| (file.to_path_buf(), BTreeSet::new()))
        .collect();

    // ─── Seeding ────────────────────────────────────────────────

    let entries: Vec<_> = graph
        .graph
        .node_indices()
        .filter(|&idx| !graph.is_mounted(idx))
        .collect();

    let mut reachable = vec![false; graph.graph.node_count()];
    for &entry in &entries {
        let mut dfs = Dfs::new(&graph.graph, entry);
        while let Some(idx) = dfs.next(&graph.graph) {
            reachable[idx.index()] = true;
        }
    }

    for idx in graph.graph.node_indices() {
        let is_entry = !graph.is_mounted(idx);
        if is_entry || !reachable[idx.index()] {
            if let Some(file) = graph.file(idx) {
                prefixes
                    .entry(file.to_path_buf())
                    .or_default()
                    .insert(String::new());
            }
        }
    }

    // ─── Relaxation ─────────────────────────────────────────────

    let mounts: Vec<_> = graph.mounts().collect();
    let mut passes = 0;
    let mut truncated = false;

    loop {
        if passes >= limits.max_passes {
            truncated = true;
            break;
        }
        passes += 1;
        let mut changed = false;

        for (from, to, edge) in &mounts {
            let parents: Vec<String> = prefixes
                .get(*from)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default();

            for parent in parents {
                let combined = match edge.prefix.as_deref() {
                    Some(segment) if !segment.is_empty() => {
                        normalize_mount_prefix(&join_paths(&parent, segment))
                    }
                    _ => parent,
                };
                if segment_count(&combined) > limits.max_prefix_depth {
                    truncated = true;
                    continue;
                }
                if prefixes.entry(to.to_path_buf()).or_default().insert(combined) {
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    if truncated {
        warn!(
            passes,
            max_passes = limits.max_passes,
            max_prefix_depth = limits.max_prefix_depth,
            "mount prefixes truncated; the mount graph likely contains a cycle"
        );
    } else {
        debug!(passes, "mount prefixes resolved");
    }

    PrefixResolution {
        prefixes,
        passes,
        truncated,
    }
}
