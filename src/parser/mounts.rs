//
//  mounts.rs
//  Routescope
//
//  Created by hak (tharun)
//

use once_cell::sync::Lazy;
use regex::Regex;

use super::aliases::Bindings;
use super::scan::{extract_arguments, is_identifier, LineIndex};
use super::types::{MountStatement, Receiver};

static USE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w$])([\w$]+)\s*\.\s*use\s*\(").expect("use regex"));

/// Mount statements plus the prefix expressions of app-level `use` calls.
#[derive(Debug, Clone, Default)]
pub struct Mounts {
    pub statements: Vec<MountStatement>,
    pub app_use_prefix_exprs: Vec<String>,
}

/// Collect `<receiver>.use(...)` calls made on known app/router identifiers.
pub fn collect_mounts(text: &str, bindings: &Bindings, lines: &LineIndex<'_>) -> Mounts {
    let mut mounts = Mounts::default();

    for caps in USE_CALL.captures_iter(text) {
        let (Some(whole), Some(ident_match)) = (caps.get(0), caps.get(1)) else { continue };
        let ident = ident_match.as_str();
        let receiver = if bindings.is_app(ident) {
            Receiver::App
        } else if bindings.is_router(ident) {
            Receiver::Router
        } else {
            continue;
        };

        let args = extract_arguments(text, whole.end() - 1);
        let (prefix_expr, router_idents) = match args.as_slice() {
            [] => continue,
            [only] => {
                if !is_identifier(only) {
                    continue;
                }
                (String::new(), vec![only.clone()])
            }
            [prefix, rest @ ..] => {
                if receiver == Receiver::App {
                    mounts.app_use_prefix_exprs.push(prefix.clone());
                }
                let idents: Vec<String> = rest
                    .iter()
                    .filter(|arg| is_identifier(arg))
                    .cloned()
                    .collect();
                if idents.is_empty() {
                    continue;
                }
                (prefix.clone(), idents)
            }
        };

        mounts.statements.push(MountStatement {
            receiver,
            prefix_expr,
            router_idents,
            position: lines.position(ident_match.start()),
        });
    }

    mounts
}
