//
//  builder.rs
//  Routescope
//
//  Created by hak (tharun)
//

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::engine::{MountEdge, MountGraph};
use crate::parser::scan::split_route_path_expressions;
use crate::parser::FileAnalysis;
use crate::resolve::expr::resolve_path_expression;
use crate::resolve::path::{
    is_relative_specifier, lexical_normalize, normalize_mount_prefix, strip_extension,
};

/// Index: extension-less normalized path -> corpus file.
pub type ModuleIndex = HashMap<PathBuf, PathBuf>;

/// Map every corpus file by its path without extension.
///
/// When two files share a stem (`users.js` and `users.ts`), the first wins.
pub fn module_index<'a>(files: impl IntoIterator<Item = &'a Path>) -> ModuleIndex {
    let mut index = ModuleIndex::new();
    for file in files {
        index
            .entry(strip_extension(&lexical_normalize(file)))
            .or_insert_with(|| file.to_path_buf());
    }
    index
}

/// Module specifier bound to `ident` in the file's require table, then its import table.
fn specifier_for<'a>(analysis: &'a FileAnalysis, ident: &str) -> Option<&'a str> {
    analysis
        .requires
        .iter()
        .find(|r| r.name == ident)
        .map(|r| r.source.as_str())
        .or_else(|| {
            analysis
                .imports
                .iter()
                .find(|i| i.name == ident)
                .map(|i| i.source.as_str())
        })
}

/// Resolve a relative specifier from `file` to a corpus file.
///
/// `./routes` matches `routes.js` first, then `routes/index.js`.
pub fn resolve_target(file: &Path, specifier: &str, index: &ModuleIndex) -> Option<PathBuf> {
    if !is_relative_specifier(specifier) {
        return None;
    }
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let target = strip_extension(&lexical_normalize(&dir.join(specifier)));
    index
        .get(&target)
        .or_else(|| index.get(&target.join("index")))
        .cloned()
}

/// Resolve each element of a mount prefix against the mounting file's constants.
fn mount_edges(analysis: &FileAnalysis, prefix_expr: &str) -> Vec<MountEdge> {
    if prefix_expr.is_empty() {
        return vec![MountEdge {
            prefix_expr: String::new(),
            prefix: Some(String::new()),
        }];
    }
    split_route_path_expressions(prefix_expr)
        .into_iter()
        .map(|expr| {
            let prefix = resolve_path_expression(&expr, &analysis.constants)
                .map(|resolved| normalize_mount_prefix(&resolved));
            MountEdge {
                prefix_expr: expr,
                prefix,
            }
        })
        .collect()
}

/// Build the mount graph from per-file analyses.
///
/// Every analysed file becomes a node. Mounts whose router argument cannot
/// be traced to a corpus file are dropped.
pub fn build_mount_graph(analyses: &[FileAnalysis]) -> MountGraph {
    let index = module_index(analyses.iter().map(|a| a.file.as_path()));
    let mut graph = MountGraph::new();
    for analysis in analyses {
        graph.add_file(analysis.file.clone());
    }

    for analysis in analyses {
        let from = graph.add_file(analysis.file.clone());

        for mount in &analysis.mounts {
            let edges = mount_edges(analysis, &mount.prefix_expr);

            for ident in &mount.router_idents {
                let Some(target) = specifier_for(analysis, ident)
                    .and_then(|specifier| resolve_target(&analysis.file, specifier, &index))
                else {
                    continue;
                };
                let to = graph.add_file(target.clone());

                for edge in &edges {
                    debug!(
                        from = %analysis.file.display(),
                        to = %target.display(),
                        prefix = edge.prefix.as_deref().unwrap_or("?"),
                        "mount edge"
                    );
                    graph.add_mount(from, to, edge.clone());
                }
            }
        }
    }

    graph
}
