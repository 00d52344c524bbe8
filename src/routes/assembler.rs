//
//  assembler.rs
//  Routescope
//
//  Created by hak (tharun)
//

use std::collections::HashSet;
use std::path::PathBuf;

use super::RouteNode;
use crate::graph::PrefixResolution;
use crate::parser::scan::split_route_path_expressions;
use crate::parser::{FileAnalysis, HttpMethod, LocalRoute, Receiver};
use crate::resolve::expr::resolve_path_expression;
use crate::resolve::path::{join_paths, normalize_path};

/// Longest resolved prefix among the file's own app `use` calls.
/// Ties keep the first one seen.
pub fn app_prefix_guess(analysis: &FileAnalysis) -> Option<String> {
    let mut best: Option<String> = None;
    for expr in &analysis.app_use_prefix_exprs {
        for piece in split_route_path_expressions(expr) {
            let Some(resolved) = resolve_path_expression(&piece, &analysis.constants) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| resolved.len() > b.len()) {
                best = Some(resolved);
            }
        }
    }
    best
}

/// Join without normalizing `path`; used for paths that never resolved.
fn join_unresolved(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn qualify(prefix: &str, route: &LocalRoute, concrete: bool, display: &str) -> String {
    let prefix = normalize_path(prefix);
    if concrete {
        join_paths(&prefix, &route.path)
    } else {
        join_unresolved(&prefix, display)
    }
}

/// Combine local routes with their file's prefixes, then dedupe and sort.
pub fn assemble_routes(analyses: &[FileAnalysis], prefixes: &PrefixResolution) -> Vec<RouteNode> {
    let mut routes = Vec::new();

    for analysis in analyses {
        let app_prefix = app_prefix_guess(analysis);
        let router_prefixes: Vec<&str> = prefixes.prefixes_of(&analysis.file).collect();

        for route in &analysis.routes {
            let concrete = route.resolved_path.is_some() || route.path.starts_with('/');
            let display = if concrete {
                normalize_path(&route.path)
            } else if route.path.is_empty() {
                "/".to_string()
            } else {
                route.path.clone()
            };

            let full_paths: Vec<String> = match (route.receiver, app_prefix.as_deref()) {
                (Receiver::Router, _) if !router_prefixes.is_empty() => router_prefixes
                    .iter()
                    .map(|prefix| qualify(prefix, route, concrete, &display))
                    .collect(),
                (Receiver::App, Some(prefix)) => vec![qualify(prefix, route, concrete, &display)],
                _ => vec![normalize_path(&display)],
            };

            for full_path in full_paths {
                routes.push(RouteNode {
                    method: route.method,
                    path: display.clone(),
                    full_path,
                    raw_path: Some(route.path_expr.clone()),
                    resolved_path: route.resolved_path.clone(),
                    file: analysis.file.clone(),
                    line: route.line,
                    column: route.column,
                });
            }
        }
    }

    let mut seen: HashSet<(HttpMethod, String, PathBuf, usize)> = HashSet::new();
    routes.retain(|r| seen.insert((r.method, r.full_path.clone(), r.file.clone(), r.line)));
    routes.sort_by(|a, b| {
        a.full_path
            .cmp(&b.full_path)
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });
    routes
}
