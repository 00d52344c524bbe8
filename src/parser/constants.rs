//
//  constants.rs
//  Routescope
//
//  Created by hak (tharun)
//

use once_cell::sync::Lazy;
use regex::Regex;

use super::scan::{strip_line_comment, unwrap_parens};
use super::types::ConstTable;
use crate::resolve::expr::resolve_path_expression;

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+([\w$]+)\s*(?::\s*[\w$.<>]+\s*)?=\s*([^\r\n;]+)").expect("assignment regex")
});

/// Build the constant table of one file.
///
/// Assignments may reference constants declared anywhere in the file, so
/// resolution repeats until a pass resolves nothing new. Each assignment is
/// resolved at most once; later assignments to the same name win.
pub fn collect_constants(text: &str) -> ConstTable {
    let mut pending: Vec<(String, String)> = ASSIGNMENT
        .captures_iter(text)
        .map(|caps| {
            let value = unwrap_parens(strip_line_comment(caps[2].trim()));
            (caps[1].to_string(), value.to_string())
        })
        .collect();

    let mut constants = ConstTable::new();
    loop {
        let before = pending.len();
        pending.retain(|(name, value)| match resolve_path_expression(value, &constants) {
            Some(resolved) => {
                constants.insert(name.clone(), resolved);
                false
            }
            None => true,
        });
        if pending.is_empty() || pending.len() == before {
            break;
        }
    }
    constants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_annotated_constants() {
        let consts = collect_constants("const API: string = '/api';\nlet V : Readonly<string> = `${API}/v1`;\n");
        assert_eq!(consts.get("API").map(String::as_str), Some("/api"));
        assert_eq!(consts.get("V").map(String::as_str), Some("/api/v1"));
    }

    #[test]
    fn test_literal_constants() {
        let consts = collect_constants("const API = '/api';\nlet V = \"v1\"; // version\n");
        assert_eq!(consts.get("API").map(String::as_str), Some("/api"));
        assert_eq!(consts.get("V").map(String::as_str), Some("/v1"));
    }

    #[test]
    fn test_forward_references_resolve() {
        let text = r#"
            const USERS = API + '/users';
            const ADMIN = USERS + '/admin';
            const API = "/api";
        "#;
        let consts = collect_constants(text);
        assert_eq!(consts.get("USERS").map(String::as_str), Some("/api/users"));
        assert_eq!(consts.get("ADMIN").map(String::as_str), Some("/api/users/admin"));
    }

    #[test]
    fn test_unresolvable_names_terminate() {
        let text = r#"
            const A = B + '/a';
            const B = A + '/b';
            const app = express();
            const port = process.env.PORT;
        "#;
        let consts = collect_constants(text);
        assert!(consts.is_empty());
    }
}
