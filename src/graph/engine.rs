//
//  engine.rs
//  Routescope
//
//  Created by hak (tharun)
//

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Label of a `from -> to` mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEdge {
    /// One element of the raw prefix argument.
    pub prefix_expr: String,
    /// Normalized mount prefix, `None` when the expression did not resolve.
    pub prefix: Option<String>,
}

/// Files of the corpus and the mounts between them.
#[derive(Debug, Clone)]
pub struct MountGraph {
    /// One node per corpus file; edges point from the mounting file to the mounted one.
    pub(crate) graph: DiGraph<PathBuf, MountEdge>,
    /// Index: file path -> node index.
    pub(crate) file_index: HashMap<PathBuf, NodeIndex>,
}

impl MountGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            file_index: HashMap::new(),
        }
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Add a file node. Adding a known file returns its existing index.
    pub fn add_file(&mut self, path: PathBuf) -> NodeIndex {
        if let Some(&idx) = self.file_index.get(&path) {
            return idx;
        }
        let idx = self.graph.add_node(path.clone());
        self.file_index.insert(path, idx);
        idx
    }

    pub fn node_index(&self, path: &Path) -> Option<NodeIndex> {
        self.file_index.get(path).copied()
    }

    pub fn file(&self, idx: NodeIndex) -> Option<&Path> {
        self.graph.node_weight(idx).map(PathBuf::as_path)
    }

    /// All files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.file(idx))
    }

    pub fn file_count(&self) -> usize {
        self.graph.node_count()
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Record a mount. Returns false when the identical edge already exists.
    pub fn add_mount(&mut self, from: NodeIndex, to: NodeIndex, edge: MountEdge) -> bool {
        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|existing| *existing.weight() == edge);
        if exists {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    /// All mounts as `(from, to, edge)` in insertion order.
    pub fn mounts(&self) -> impl Iterator<Item = (&Path, &Path, &MountEdge)> + '_ {
        self.graph.edge_references().filter_map(move |e| {
            let from = self.file(e.source())?;
            let to = self.file(e.target())?;
            Some((from, to, e.weight()))
        })
    }

    pub fn mount_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when at least one mount points at `idx`.
    pub fn is_mounted(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_some()
    }
}

impl Default for MountGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(prefix: &str) -> MountEdge {
        MountEdge {
            prefix_expr: format!("'{prefix}'"),
            prefix: Some(prefix.to_string()),
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = MountGraph::new();
        assert_eq!(graph.file_count(), 0);
        assert_eq!(graph.mount_count(), 0);
    }

    #[test]
    fn test_add_file_is_idempotent() {
        let mut graph = MountGraph::new();
        let a = graph.add_file(PathBuf::from("/p/app.js"));
        let again = graph.add_file(PathBuf::from("/p/app.js"));
        assert_eq!(a, again);
        assert_eq!(graph.file_count(), 1);
        assert_eq!(graph.node_index(Path::new("/p/app.js")), Some(a));
        assert_eq!(graph.file(a), Some(Path::new("/p/app.js")));
    }

    #[test]
    fn test_duplicate_mounts_are_recorded_once() {
        let mut graph = MountGraph::new();
        let app = graph.add_file(PathBuf::from("/p/app.js"));
        let users = graph.add_file(PathBuf::from("/p/users.js"));

        assert!(graph.add_mount(app, users, edge("/v1")));
        assert!(!graph.add_mount(app, users, edge("/v1")));
        assert!(graph.add_mount(app, users, edge("/v2")));
        assert_eq!(graph.mount_count(), 2);

        assert!(graph.is_mounted(users));
        assert!(!graph.is_mounted(app));

        let mounts: Vec<_> = graph.mounts().collect();
        assert_eq!(mounts[0].0, Path::new("/p/app.js"));
        assert_eq!(mounts[0].1, Path::new("/p/users.js"));
        assert_eq!(mounts[1].2.prefix.as_deref(), Some("/v2"));
    }
}
