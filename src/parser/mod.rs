//
//  mod.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Per-file extraction: bindings, constants, mounts and route declarations.

pub mod aliases;
pub mod constants;
pub mod declarations;
pub mod mounts;
pub mod scan;
pub mod types;

use std::path::Path;

pub use types::*;

/// Analyse one source file. Pure: never fails, never touches the disk.
pub fn extract_file(file: &Path, text: &str, chain_window: usize) -> FileAnalysis {
    let lines = scan::LineIndex::new(text);
    let bindings = aliases::collect_bindings(text);
    let constants = constants::collect_constants(text);
    let mounts = mounts::collect_mounts(text, &bindings, &lines);
    let declarations = declarations::collect_declarations(text, &bindings, &lines, chain_window);
    let routes = declarations::local_routes(&declarations, &constants);

    FileAnalysis {
        file: file.to_path_buf(),
        constants,
        imports: bindings.imports,
        requires: bindings.requires,
        app_identifiers: bindings.app_identifiers.into_iter().collect(),
        router_identifiers: bindings.router_identifiers.into_iter().collect(),
        app_use_prefix_exprs: mounts.app_use_prefix_exprs,
        mounts: mounts.statements,
        declarations,
        routes,
    }
}
