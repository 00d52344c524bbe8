//! Mount graph: which file mounts which, under what prefix, and the
//! prefixes every file ends up reachable under.

pub mod builder;
pub mod engine;
pub mod fixpoint;

pub use builder::{build_mount_graph, module_index, resolve_target, ModuleIndex};
pub use engine::{MountEdge, MountGraph};
pub use fixpoint::{resolve_prefixes, PrefixResolution};
