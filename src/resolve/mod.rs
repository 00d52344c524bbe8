//
//  mod.rs
//  Routescope
//
//  Created by hak (tharun)
//

pub mod expr;
pub mod path;

pub use expr::{fallback_path_from_expression, resolve_path_expression};
pub use path::{join_paths, normalize_mount_prefix, normalize_path};
