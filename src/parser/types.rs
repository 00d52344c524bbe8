//
//  types.rs
//  Routescope
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Per-file constant table: identifier -> resolved path value.
pub type ConstTable = BTreeMap<String, String>;

/// HTTP methods recognized on route declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    All,
}

impl HttpMethod {
    pub const ALL_METHODS: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::All,
    ];

    /// Case-insensitive lookup of a method name.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL_METHODS
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::All => "ALL",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural kind of the object a call is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Receiver {
    App,
    Router,
}

/// Zero-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// `import A from 'p'`, `import { a as b } from 'p'`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    pub name: String,
    pub source: String,
}

/// `const A = require('p')`, `const { a } = require('p')`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequireEntry {
    pub name: String,
    pub source: String,
}

/// `<receiver>.use(prefix, routerA, routerB)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountStatement {
    pub receiver: Receiver,
    /// Raw prefix expression; empty for `use(router)`.
    pub prefix_expr: String,
    /// Bare identifiers passed after the prefix.
    pub router_idents: Vec<String>,
    pub position: Position,
}

/// One route declaration as matched in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteDeclaration {
    /// `app.get(path, ...)` / `router['post'](path, ...)`
    Direct {
        receiver: Receiver,
        method: HttpMethod,
        path_expr: String,
        position: Position,
    },
    /// `router.route(path).get(...).post(...)`
    Chained {
        receiver: Receiver,
        path_expr: String,
        position: Position,
        methods: Vec<(HttpMethod, Position)>,
    },
}

/// A route as seen inside one file, before prefix composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRoute {
    pub method: HttpMethod,
    pub receiver: Receiver,
    /// One element of the (possibly array) path argument.
    pub path_expr: String,
    pub resolved_path: Option<String>,
    /// Resolved path, else the fallback rendering of `path_expr`.
    pub path: String,
    pub line: usize,
    pub column: usize,
}

/// Everything the extractor learns about one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file: PathBuf,
    pub constants: ConstTable,
    pub imports: Vec<ImportEntry>,
    pub requires: Vec<RequireEntry>,
    pub app_identifiers: Vec<String>,
    pub router_identifiers: Vec<String>,
    /// First argument of every app `use` call that has a second argument.
    pub app_use_prefix_exprs: Vec<String>,
    pub mounts: Vec<MountStatement>,
    pub declarations: Vec<RouteDeclaration>,
    pub routes: Vec<LocalRoute>,
}
