//
//  expr.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Best-effort evaluation of path expressions:
//!
//! - `"/api/v1"`
//! - `API_PREFIX`
//! - `API_PREFIX + "/audio"`
//! - `` `${API_PREFIX}/audio` ``
//! - `path.join("/api", "v1")`
//! - `PREFIX || "/fallback"`

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::path::normalize_path;
use crate::parser::scan::{is_identifier, quoted_literal, split_top_level, unwrap_parens};
use crate::parser::types::ConstTable;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex"));

static PATH_JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^path\s*\.\s*(?:posix\s*\.\s*)?join\s*\((.*)\)$").expect("path.join regex")
});

/// Substitute `${name}` placeholders. Unknown names become empty.
fn interpolate(template: &str, constants: &ConstTable) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            constants
                .get(caps[1].trim())
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Resolve `expr` to a concrete, normalized path using `constants`.
///
/// Returns `None` when the expression cannot be evaluated; never fails.
pub fn resolve_path_expression(expr: &str, constants: &ConstTable) -> Option<String> {
    let expr = unwrap_parens(expr);
    if expr.is_empty() {
        return None;
    }

    // Single literal
    if let Some((_, inner)) = quoted_literal(expr) {
        return Some(normalize_path(&interpolate(inner, constants)));
    }

    // Lenient template: backticks at both ends, none in between
    if expr.len() >= 2 && expr.starts_with('`') && expr.ends_with('`') {
        let inner = &expr[1..expr.len() - 1];
        if !inner.contains('`') {
            return Some(normalize_path(&interpolate(inner, constants)));
        }
    }

    // PREFIX || "/fallback", PREFIX ?? "/fallback"
    let alternatives = split_top_level(expr, &["||", "??"]);
    if alternatives.len() > 1 {
        if let Some(resolved) = alternatives
            .iter()
            .find_map(|part| resolve_path_expression(part, constants))
        {
            return Some(resolved);
        }
    }

    if let Some(caps) = PATH_JOIN.captures(expr) {
        if let Some(joined) = resolve_path_join(&caps[1], constants) {
            return Some(joined);
        }
    }

    let pieces = split_top_level(expr, &["+"]);
    if pieces.len() > 1 {
        return resolve_concatenation(&pieces, constants);
    }

    if is_identifier(expr) {
        return constants.get(expr).map(|value| normalize_path(value));
    }

    None
}

/// Every argument must resolve; one failure aborts the whole join.
fn resolve_path_join(args: &str, constants: &ConstTable) -> Option<String> {
    let args: Vec<&str> = split_top_level(args, &[","])
        .into_iter()
        .filter(|a| !a.is_empty())
        .collect();
    if args.is_empty() {
        return None;
    }

    let mut built = String::new();
    for arg in args {
        let resolved = resolve_path_expression(arg, constants)?;
        if built.is_empty() {
            built = normalize_path(&resolved);
        } else {
            built = format!("{}/{}", built, resolved.trim_start_matches('/'));
        }
    }
    Some(normalize_path(&built))
}

/// Only literals and known identifiers may be concatenated.
fn resolve_concatenation(pieces: &[&str], constants: &ConstTable) -> Option<String> {
    let mut result = String::new();
    for piece in pieces {
        let piece = unwrap_parens(piece);
        if let Some((_, inner)) = quoted_literal(piece) {
            result.push_str(&interpolate(inner, constants));
        } else if is_identifier(piece) {
            result.push_str(constants.get(piece)?);
        } else {
            return None;
        }
    }
    Some(normalize_path(&result))
}

/// Readable stand-in for an expression that did not resolve.
///
/// Literal text for a bare string, the normalized text for something that
/// already looks like a path, otherwise the expression verbatim.
pub fn fallback_path_from_expression(expr: &str) -> String {
    let trimmed = unwrap_parens(expr);

    if let Some((_, inner)) = quoted_literal(trimmed) {
        return normalize_path(inner);
    }
    if trimmed.starts_with('/') {
        return normalize_path(trimmed);
    }
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> ConstTable {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literals() {
        let consts = ConstTable::new();
        assert_eq!(resolve_path_expression("'/users'", &consts), Some("/users".into()));
        assert_eq!(resolve_path_expression("\"users\"", &consts), Some("/users".into()));
        assert_eq!(resolve_path_expression("(('/x//y'))", &consts), Some("/x/y".into()));
        assert_eq!(resolve_path_expression("''", &consts), Some("/".into()));
    }

    #[test]
    fn test_template_interpolation() {
        let consts = table(&[("API", "/api"), ("V", "/v1")]);
        assert_eq!(
            resolve_path_expression("`${API}${V}/audio`", &consts),
            Some("/api/v1/audio".into())
        );
        // unknown placeholders collapse to nothing
        assert_eq!(
            resolve_path_expression("`${MISSING}/x`", &consts),
            Some("/x".into())
        );
    }

    #[test]
    fn test_lenient_template() {
        let consts = table(&[("API", "/api")]);
        // trailing escape: not a closed literal, still read as a template
        assert_eq!(
            resolve_path_expression("`${API}/x\\`", &consts),
            Some("/api/x\\".into())
        );
        // inner backticks are never read as one template
        assert_eq!(resolve_path_expression("`${API}/${`nested`}`", &consts), None);
    }

    #[test]
    fn test_concatenated_templates() {
        let consts = table(&[("API", "/api")]);
        assert_eq!(
            resolve_path_expression("`${API}` + `/users`", &consts),
            Some("/api/users".into())
        );
        assert_eq!(
            resolve_path_expression("`/a` + `/b`", &consts),
            Some("/a/b".into())
        );
        assert_eq!(
            resolve_path_expression("`a` + `b`", &consts),
            Some("/ab".into())
        );
    }

    #[test]
    fn test_fallback_operators() {
        let consts = table(&[("API", "/api")]);
        assert_eq!(
            resolve_path_expression("process.env.PREFIX || '/fallback'", &consts),
            Some("/fallback".into())
        );
        assert_eq!(
            resolve_path_expression("API ?? '/other'", &consts),
            Some("/api".into())
        );
        assert_eq!(resolve_path_expression("a || b", &consts), None);
    }

    #[test]
    fn test_path_join() {
        let consts = table(&[("BASE", "/api")]);
        assert_eq!(
            resolve_path_expression("path.join(BASE, 'v1', '/users')", &consts),
            Some("/api/v1/users".into())
        );
        assert_eq!(
            resolve_path_expression("path.posix.join('/a', 'b')", &consts),
            Some("/a/b".into())
        );
        assert_eq!(
            resolve_path_expression("path.join(BASE, dynamic())", &consts),
            None
        );
    }

    #[test]
    fn test_concatenation() {
        let consts = table(&[("P", "/api")]);
        assert_eq!(
            resolve_path_expression("P + \"/users\"", &consts),
            Some("/api/users".into())
        );
        assert_eq!(
            resolve_path_expression("'/a' + '/b'", &consts),
            Some("/a/b".into())
        );
        assert_eq!(resolve_path_expression("P + id", &consts), None);
        assert_eq!(resolve_path_expression("P + getId()", &consts), None);
    }

    #[test]
    fn test_identifier() {
        let consts = table(&[("USERS", "/users")]);
        assert_eq!(resolve_path_expression("USERS", &consts), Some("/users".into()));
        assert_eq!(resolve_path_expression("OTHER", &consts), None);
        assert_eq!(resolve_path_expression("req.params.x", &consts), None);
    }

    #[test]
    fn test_fallback_path_from_expression() {
        assert_eq!(fallback_path_from_expression("'users'"), "/users");
        assert_eq!(fallback_path_from_expression("/raw//path"), "/raw/path");
        assert_eq!(fallback_path_from_expression("routes.users"), "routes.users");
        assert_eq!(fallback_path_from_expression("  "), "/");
    }
}
