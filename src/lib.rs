//! # Routescope
//!
//! Static discovery of HTTP routes in Express-style JavaScript and
//! TypeScript projects.
//!
//! Routescope reads a snapshot of source files, finds route declarations
//! (`app.get(path, ...)`, `router.route(path).post(...)`) and router mounts
//! (`app.use(prefix, router)`), follows mounts across files and reports every
//! route under its fully-qualified path.
//!
//! ## Key Features
//!
//! - **No parser**: string-aware token scanning, tolerant of partial code
//! - **Cross-file**: relative `require`/`import` targets become mount edges
//! - **Best effort**: unresolvable paths are reported verbatim, never dropped
//! - **Deterministic**: same snapshot, same ordered output
//!
//! ## Quick Start
//!
//! ```rust
//! use routescope::{MemoryCorpus, RouteScanner};
//!
//! let corpus = MemoryCorpus::new()
//!     .with_file("/app/server.js", "const users = require('./users');\napp.use('/api', users);")
//!     .with_file("/app/users.js", "router.get('/:id', show);");
//!
//! let result = RouteScanner::default().scan(&corpus).unwrap();
//! assert_eq!(result.routes[0].full_path, "/api/:id");
//! ```

pub mod base_url;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod parser;
pub mod resolve;
pub mod routes;
pub mod scanner;

// Re-exports for convenience
pub use config::RoutescopeConfig;
pub use corpus::{Corpus, FsCorpus, MemoryCorpus};
pub use error::{Result, ScanError};
pub use parser::{extract_file, FileAnalysis, HttpMethod, Receiver, RouteDeclaration};
pub use routes::{RouteNode, ScanResult};
pub use scanner::{RouteScanner, ScanReport};
