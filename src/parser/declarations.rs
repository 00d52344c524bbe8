//
//  declarations.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Route declarations: direct `recv.method(path, ...)` calls and
//! `recv.route(path).method(...)` chains.

use once_cell::sync::Lazy;
use regex::Regex;

use super::aliases::Bindings;
use super::scan::{
    extract_first_argument, find_call_close, floor_char_boundary, split_route_path_expressions,
    LineIndex, QuoteState,
};
use super::types::{ConstTable, HttpMethod, LocalRoute, Receiver, RouteDeclaration};
use crate::resolve::expr::{fallback_path_from_expression, resolve_path_expression};

static DIRECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:^|[^\w$])([\w$]+)\s*(?:\.\s*(get|post|put|delete|patch|options|head|all)|\[\s*['"]?(get|post|put|delete|patch|options|head|all)['"]?\s*\])\s*\("#,
    )
    .expect("direct route regex")
});

static CHAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w$])([\w$]+)\s*\.\s*route\s*\(").expect("route chain regex"));

fn receiver_kind(bindings: &Bindings, ident: &str) -> Option<Receiver> {
    if bindings.is_app(ident) {
        Some(Receiver::App)
    } else if bindings.is_router(ident) {
        Some(Receiver::Router)
    } else {
        None
    }
}

/// Collect every route declaration made on a known receiver.
pub fn collect_declarations(
    text: &str,
    bindings: &Bindings,
    lines: &LineIndex<'_>,
    chain_window: usize,
) -> Vec<RouteDeclaration> {
    let mut declarations = collect_direct(text, bindings, lines);
    declarations.extend(collect_chained(text, bindings, lines, chain_window));
    declarations
}

fn collect_direct(text: &str, bindings: &Bindings, lines: &LineIndex<'_>) -> Vec<RouteDeclaration> {
    let mut declarations = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = DIRECT.captures_at(text, pos) else { break };
        let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else { break };
        // Resume on the `(` so it can serve as the boundary of a nested call.
        pos = whole.end() - 1;

        let Some(receiver) = receiver_kind(bindings, &caps[1]) else { continue };
        let Some(method) = caps
            .get(2)
            .or_else(|| caps.get(3))
            .and_then(|m| HttpMethod::parse(m.as_str()))
        else {
            continue;
        };
        let Some(arg) = extract_first_argument(text, whole.end()) else { continue };

        // Skip past the path argument so nothing inside it is matched again.
        pos = pos.max(arg.end.min(text.len()));

        // No handler after the path: a settings read like `app.get('env')`.
        if arg.expr.is_empty() || arg.terminator != Some(b',') {
            continue;
        }

        declarations.push(RouteDeclaration::Direct {
            receiver,
            method,
            path_expr: arg.expr,
            position: lines.position(ident.start()),
        });
    }

    declarations
}

fn collect_chained(
    text: &str,
    bindings: &Bindings,
    lines: &LineIndex<'_>,
    chain_window: usize,
) -> Vec<RouteDeclaration> {
    let mut declarations = Vec::new();

    for caps in CHAIN.captures_iter(text) {
        let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else { continue };
        let Some(receiver) = receiver_kind(bindings, ident.as_str()) else { continue };

        let open = whole.end() - 1;
        let Some(arg) = extract_first_argument(text, open + 1) else { continue };
        if arg.expr.is_empty() {
            continue;
        }
        let Some(close) = find_call_close(text, open) else { continue };

        let methods = chain_methods(text, close, chain_window)
            .into_iter()
            .map(|(method, offset)| (method, lines.position(offset)))
            .collect();

        declarations.push(RouteDeclaration::Chained {
            receiver,
            path_expr: arg.expr,
            position: lines.position(ident.start()),
            methods,
        });
    }

    declarations
}

/// Name read at `start`, and whether a `(` follows it.
fn method_call_at(text: &str, start: usize) -> (&str, bool) {
    let rest = &text[start..];
    let name_start = rest.len() - rest.trim_start().len();
    let name_len = rest[name_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
        .count();
    let name = &rest[name_start..name_start + name_len];
    let is_call = rest[name_start + name_len..].trim_start().starts_with('(');
    (name, is_call)
}

/// `.method(` calls continuing the chain that starts at `start`.
///
/// Only calls at depth zero count. The chain ends at a top-level `;`, at an
/// unbalanced close, at a new line that does not start with `.`, at another
/// `.route(`, or after `window` bytes.
fn chain_methods(text: &str, start: usize, window: usize) -> Vec<(HttpMethod, usize)> {
    let end = floor_char_boundary(text, start.saturating_add(window));
    let bytes = text.as_bytes();
    let mut state = QuoteState::default();
    let mut depth = 0i64;
    let mut methods = Vec::new();
    let mut i = start;

    while i < end {
        let b = bytes[i];

        if !state.is_active() && b == b'/' {
            match bytes.get(i + 1) {
                Some(b'/') => {
                    i = text[i..end].find('\n').map_or(end, |n| i + n);
                    continue;
                }
                Some(b'*') => {
                    i = text
                        .get(i + 2..end)
                        .and_then(|rest| rest.find("*/"))
                        .map_or(end, |n| i + 2 + n + 2);
                    continue;
                }
                _ => {}
            }
        }

        if state.consume(b) {
            i += 1;
            continue;
        }

        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            b';' if depth == 0 => break,
            b'\n' if depth == 0 => {
                let next = text[i + 1..end].trim_start();
                let continues =
                    next.starts_with('.') || next.starts_with("//") || next.starts_with("/*");
                if !continues {
                    break;
                }
            }
            b'.' if depth == 0 => {
                let (name, is_call) = method_call_at(text, i + 1);
                if is_call {
                    if name == "route" {
                        break;
                    }
                    if let Some(method) = HttpMethod::parse(name) {
                        methods.push((method, i));
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    methods
}

/// Expand declarations into local routes, one per method and path element.
pub fn local_routes(declarations: &[RouteDeclaration], constants: &ConstTable) -> Vec<LocalRoute> {
    let mut routes = Vec::new();

    for declaration in declarations {
        match declaration {
            RouteDeclaration::Direct {
                receiver,
                method,
                path_expr,
                position,
            } => {
                for expr in split_route_path_expressions(path_expr) {
                    routes.push(local_route(
                        *method,
                        *receiver,
                        expr,
                        constants,
                        position.line,
                        position.column,
                    ));
                }
            }
            RouteDeclaration::Chained {
                receiver,
                path_expr,
                methods,
                ..
            } => {
                let exprs = split_route_path_expressions(path_expr);
                for (method, position) in methods {
                    for expr in &exprs {
                        routes.push(local_route(
                            *method,
                            *receiver,
                            expr.clone(),
                            constants,
                            position.line,
                            position.column,
                        ));
                    }
                }
            }
        }
    }

    routes
}

fn local_route(
    method: HttpMethod,
    receiver: Receiver,
    path_expr: String,
    constants: &ConstTable,
    line: usize,
    column: usize,
) -> LocalRoute {
    let resolved_path = resolve_path_expression(&path_expr, constants);
    let path = resolved_path
        .clone()
        .unwrap_or_else(|| fallback_path_from_expression(&path_expr));
    LocalRoute {
        method,
        receiver,
        path_expr,
        resolved_path,
        path,
        line,
        column,
    }
}
