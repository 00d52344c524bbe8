//
//  path.rs
//  Routescope
//
//  Created by hak (tharun)
//

use std::path::{Component, Path, PathBuf};

/// Source extensions stripped when matching import targets to corpus files.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Ensure a single leading slash and collapse slash runs. Never empty.
pub fn normalize_path(p: &str) -> String {
    let mut out = String::with_capacity(p.len() + 1);
    out.push('/');
    for c in p.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Normalize a mount prefix. Empty and `/` both mean "no prefix".
pub fn normalize_mount_prefix(p: &str) -> String {
    if p.is_empty() || p == "/" {
        return String::new();
    }
    let normalized = normalize_path(p);
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Join a prefix and a route path with exactly one slash between them.
pub fn join_paths(prefix: &str, route: &str) -> String {
    if prefix.is_empty() && route.is_empty() {
        return "/".to_string();
    }
    if prefix.is_empty() {
        return normalize_path(route);
    }
    if route.is_empty() {
        return normalize_path(prefix);
    }
    let joined = format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        route.trim_start_matches('/')
    );
    normalize_path(&joined)
}

/// Drop a known source extension, if any.
pub fn strip_extension(path: &Path) -> PathBuf {
    let known = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);
    if known {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// True for `./x` and `../x` module specifiers.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("users"), "/users");
        assert_eq!(normalize_path("//api///v1//"), "/api/v1/");
        assert_eq!(normalize_path("/:id"), "/:id");
    }

    #[test]
    fn test_normalize_path_is_idempotent() {
        for raw in ["", "/", "a//b", "///x/", "/api/v1", "api"] {
            let once = normalize_path(raw);
            assert!(once.starts_with('/'));
            assert!(!once.contains("//"));
            assert_eq!(normalize_path(&once), once);
        }
    }

    #[test]
    fn test_normalize_mount_prefix() {
        assert_eq!(normalize_mount_prefix(""), "");
        assert_eq!(normalize_mount_prefix("/"), "");
        assert_eq!(normalize_mount_prefix("//"), "");
        assert_eq!(normalize_mount_prefix("api/"), "/api");
        assert_eq!(normalize_mount_prefix("/api/v1"), "/api/v1");
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/api", "/v1/things"), "/api/v1/things");
        assert_eq!(join_paths("", "things"), "/things");
        assert_eq!(join_paths("/api/", "//x"), "/api/x");
        assert_eq!(join_paths("/api", ""), "/api");
        assert_eq!(join_paths("", ""), "/");
        assert_eq!(join_paths("/", "/"), "/");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(
            strip_extension(Path::new("/p/routes/users.ts")),
            PathBuf::from("/p/routes/users")
        );
        assert_eq!(
            strip_extension(Path::new("/p/app.JS")),
            PathBuf::from("/p/app")
        );
        assert_eq!(
            strip_extension(Path::new("/p/data.json")),
            PathBuf::from("/p/data.json")
        );
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/p/src/./routes/../api/users")),
            PathBuf::from("/p/src/api/users")
        );
        assert_eq!(
            lexical_normalize(Path::new("/p/../../x")),
            PathBuf::from("/x")
        );
    }

    #[test]
    fn test_is_relative_specifier() {
        assert!(is_relative_specifier("./users"));
        assert!(is_relative_specifier("../routes/users"));
        assert!(!is_relative_specifier("express"));
        assert!(!is_relative_specifier("@scope/pkg"));
        assert!(!is_relative_specifier(".hidden"));
    }
}
