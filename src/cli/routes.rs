//! Route listing: routes, mounts

use anyhow::{anyhow, Result};
use std::path::Path;

use super::display_path;
use crate::corpus::FsCorpus;
use crate::parser::HttpMethod;
use crate::routes::RouteNode;
use crate::scanner::RouteScanner;

/// Compact format: METHOD fullPath  file:line
fn format_route(root: &Path, route: &RouteNode) -> String {
    format!(
        "{} {}  {}:{}",
        route.method,
        route.full_path,
        display_path(root, &route.file),
        route.line + 1
    )
}

fn format_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "/"
    } else {
        prefix
    }
}

/// List every route, optionally filtered by method.
pub fn routes(scanner: &RouteScanner, root: &Path, json: bool, method: Option<&str>) -> Result<()> {
    let method = method
        .map(|m| HttpMethod::parse(m).ok_or_else(|| anyhow!("Unknown HTTP method: {}", m)))
        .transpose()?;

    let mut result = scanner.scan_dir(root)?;
    if let Some(method) = method {
        result.routes.retain(|r| r.method == method);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.routes.is_empty() {
        println!("No routes found");
        return Ok(());
    }
    for route in &result.routes {
        println!("{}", format_route(root, route));
    }
    Ok(())
}

/// Print mount edges, then every file's resolved prefixes.
pub fn mounts(scanner: &RouteScanner, root: &Path) -> Result<()> {
    let corpus = FsCorpus::new(root, &scanner.config().scan)?;
    let report = scanner.analyze(&corpus)?;

    if report.graph.mount_count() == 0 {
        println!("No mounts found");
    }
    for (from, to, edge) in report.graph.mounts() {
        let prefix = match &edge.prefix {
            Some(prefix) => format_prefix(prefix).to_string(),
            None => format!("? ({})", edge.prefix_expr),
        };
        println!(
            "{} -> {}  {}",
            display_path(root, from),
            display_path(root, to),
            prefix
        );
    }

    println!();
    for (file, prefixes) in &report.prefixes.prefixes {
        let list: Vec<&str> = prefixes.iter().map(|p| format_prefix(p)).collect();
        println!("{}: {}", display_path(root, file), list.join(", "));
    }

    if report.prefixes.truncated {
        println!(
            "(prefixes truncated after {} passes; check for mount cycles)",
            report.prefixes.passes
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_route() {
        let route = RouteNode {
            method: HttpMethod::Get,
            path: "/ping".into(),
            full_path: "/v1/ping".into(),
            raw_path: Some("'/ping'".into()),
            resolved_path: Some("/ping".into()),
            file: PathBuf::from("/p/src/r.js"),
            line: 4,
            column: 0,
        };
        assert_eq!(
            format_route(Path::new("/p"), &route),
            "GET /v1/ping  src/r.js:5"
        );
    }

    #[test]
    fn test_format_prefix() {
        assert_eq!(format_prefix(""), "/");
        assert_eq!(format_prefix("/api"), "/api");
    }
}
