//
//  aliases.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Import/require tables and app/router receiver discovery.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::types::{ImportEntry, RequireEntry};

/// Module name of the framework.
const FRAMEWORK_MODULE: &str = "express";
/// Export name of the router factory.
const ROUTER_FACTORY: &str = "Router";
/// Receivers recognized even when no binding is found.
const DEFAULT_APP: &str = "app";
const DEFAULT_ROUTER: &str = "router";

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+([^;'"`]+?)\s+from\s+['"]([^'"]+)['"]"#).expect("import regex")
});

static REQUIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:const|let|var)\s+([\w$]+)\s*=\s*require\s*\(\s*['"`]([^'"`]+)['"`]\s*\)"#)
        .expect("require regex")
});

static DESTRUCTURED_REQUIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:const|let|var)\s*\{([^}]*)\}\s*=\s*require\s*\(\s*['"`]([^'"`]+)['"`]\s*\)"#,
    )
    .expect("destructured require regex")
});

static RECEIVER_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:const|let|var)\s+([\w$]+)\s*(?::\s*[\w$.<>]+\s*)?=\s*(?:new\s+)?([\w$]+)\s*(\.\s*Router\s*)?\("#,
    )
    .expect("receiver regex")
});

static NAMESPACE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\s+as\s+([\w$]+)").expect("namespace regex"));

static DEFAULT_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w$]+)").expect("default clause regex"));

static NAMED_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]*)\}").expect("named clause regex"));

/// Bindings discovered in one file.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub imports: Vec<ImportEntry>,
    pub requires: Vec<RequireEntry>,
    pub app_identifiers: BTreeSet<String>,
    pub router_identifiers: BTreeSet<String>,
}

impl Bindings {
    pub fn is_app(&self, ident: &str) -> bool {
        self.app_identifiers.contains(ident)
    }

    pub fn is_router(&self, ident: &str) -> bool {
        self.router_identifiers.contains(ident)
    }

    pub fn is_receiver(&self, ident: &str) -> bool {
        self.is_app(ident) || self.is_router(ident)
    }
}

/// Split `a, b as c` (or `a, b: c` when `sep` is `:`) into (name, local) pairs.
fn specifiers<'a>(list: &'a str, sep: &str) -> Vec<(&'a str, &'a str)> {
    list.split(',')
        .map(str::trim)
        .map(|part| part.strip_prefix("type ").unwrap_or(part).trim())
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(sep) {
            Some((name, local)) => (name.trim(), local.trim()),
            None => (part, part),
        })
        .filter(|(name, local)| !name.is_empty() && !local.is_empty())
        .collect()
}

/// Collect imports, requires and the app/router identifiers of a file.
pub fn collect_bindings(text: &str) -> Bindings {
    let mut framework_aliases: BTreeSet<String> = BTreeSet::from([FRAMEWORK_MODULE.to_string()]);
    let mut router_factories: BTreeSet<String> = BTreeSet::from([ROUTER_FACTORY.to_string()]);
    let mut bindings = Bindings::default();

    for caps in IMPORT.captures_iter(text) {
        let clause = caps[1].trim();
        let clause = clause.strip_prefix("type ").unwrap_or(clause).trim();
        let source = caps[2].trim();

        let namespace = NAMESPACE_CLAUSE.captures(clause).map(|c| c[1].to_string());
        let default = DEFAULT_CLAUSE.captures(clause).map(|c| c[1].to_string());
        let named = NAMED_CLAUSE.captures(clause).map(|c| c[1].to_string());

        if source == FRAMEWORK_MODULE {
            framework_aliases.extend(namespace.into_iter().chain(default));
            if let Some(named) = named {
                for (name, local) in specifiers(&named, " as ") {
                    if name == ROUTER_FACTORY {
                        router_factories.insert(local.to_string());
                    }
                }
            }
            continue;
        }

        for name in namespace.into_iter().chain(default) {
            bindings.imports.push(ImportEntry {
                name,
                source: source.to_string(),
            });
        }
        if let Some(named) = named {
            for (_, local) in specifiers(&named, " as ") {
                bindings.imports.push(ImportEntry {
                    name: local.to_string(),
                    source: source.to_string(),
                });
            }
        }
    }

    for caps in REQUIRE.captures_iter(text) {
        let name = caps[1].to_string();
        let source = caps[2].trim().to_string();
        if source == FRAMEWORK_MODULE {
            framework_aliases.insert(name.clone());
        }
        bindings.requires.push(RequireEntry { name, source });
    }

    for caps in DESTRUCTURED_REQUIRE.captures_iter(text) {
        let source = caps[2].trim();
        for (name, local) in specifiers(&caps[1], ":") {
            if source == FRAMEWORK_MODULE {
                if name == ROUTER_FACTORY {
                    router_factories.insert(local.to_string());
                }
            } else {
                bindings.requires.push(RequireEntry {
                    name: local.to_string(),
                    source: source.to_string(),
                });
            }
        }
    }

    bindings.app_identifiers.insert(DEFAULT_APP.to_string());
    bindings.router_identifiers.insert(DEFAULT_ROUTER.to_string());

    for caps in RECEIVER_DECL.captures_iter(text) {
        let ident = caps[1].to_string();
        let callee = &caps[2];
        let via_router_member = caps.get(3).is_some();

        if via_router_member {
            if framework_aliases.contains(callee) {
                bindings.router_identifiers.insert(ident);
            }
        } else if framework_aliases.contains(callee) {
            bindings.app_identifiers.insert(ident);
        } else if router_factories.contains(callee) {
            bindings.router_identifiers.insert(ident);
        }
    }

    bindings
}
