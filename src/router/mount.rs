//! Recovering the literal prefix a router was mounted at.

use super::{MountPattern, RouterMount};
use log::debug;

/// Suffixes a host appends when compiling a non-terminal mount prefix.
const PATTERN_SUFFIXES: [&str; 5] = ["\\/?(?=\\/|$)", "(?=\\/|$)", "\\/?$", "/?", "$"];

/// Capture group a host emits for a `:name` parameter segment.
const PARAM_GROUP: &str = "(?:([^\\/]+?))";

const METACHARACTERS: [char; 14] = [
    '(', ')', '[', ']', '*', '+', '?', '|', '{', '}', '^', '$', '.', '\\',
];

const ESCAPES: [(&str, &str); 3] = [("\\/", "/"), ("\\.", "."), ("\\-", "-")];

/// Returns the literal prefix of a mount.
///
/// A literal path wins. Otherwise the prefix is reverse-engineered from the compiled
/// pattern on a best-effort basis. An empty string is returned when neither yields a
/// prefix; it is neutral once joined and normalized.
pub fn extract_mount_path(mount: &RouterMount) -> String {
    if let Some(path) = &mount.path {
        return path.clone();
    }

    match &mount.pattern {
        Some(pattern) => prefix_from_pattern(pattern).unwrap_or_else(|| {
            debug!("Could not recover mount prefix from pattern {}", pattern.source);
            String::new()
        }),
        None => String::new(),
    }
}

/// Best-effort inverse of a compiled prefix pattern such as `^\/api\/v1\/?(?=\/|$)`.
///
/// Returns `None` if regular-expression syntax remains after the known host constructs
/// are removed.
pub fn prefix_from_pattern(pattern: &MountPattern) -> Option<String> {
    let mut source = strip_delimiters(pattern.source.trim());
    source = source.strip_prefix('^').unwrap_or(source);

    let mut body = source.to_string();
    let mut stripped = true;
    while stripped {
        stripped = false;
        for suffix in PATTERN_SUFFIXES {
            if let Some(rest) = body.strip_suffix(suffix) {
                body = rest.to_string();
                stripped = true;
            }
        }
    }

    let mut keys = pattern.keys.iter();
    while let Some(index) = body.find(PARAM_GROUP) {
        let key = keys.next()?;
        body.replace_range(index..index + PARAM_GROUP.len(), &format!(":{}", key));
    }

    let residue = ESCAPES
        .iter()
        .fold(body.clone(), |acc, (escaped, _)| acc.replace(escaped, ""));
    if residue.contains(METACHARACTERS) {
        return None;
    }

    Some(
        ESCAPES
            .iter()
            .fold(body, |acc, (escaped, literal)| acc.replace(escaped, literal)),
    )
}

/// Strip JavaScript regex literal delimiters and flags: `/^\/api/i` -> `^\/api`.
fn strip_delimiters(source: &str) -> &str {
    let Some(rest) = source.strip_prefix('/') else {
        return source;
    };
    match rest.rfind('/') {
        Some(end)
            if rest.starts_with('^') && rest[end + 1..].chars().all(|c| "dgimsuy".contains(c)) =>
        {
            &rest[..end]
        }
        _ => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::NodeId;

    fn pattern(source: &str, keys: &[&str]) -> MountPattern {
        MountPattern {
            source: source.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn mount(path: Option<&str>, pattern: Option<MountPattern>) -> RouterMount {
        RouterMount {
            path: path.map(str::to_string),
            pattern,
            target: NodeId(0),
        }
    }

    #[test]
    fn test_literal_path_wins() {
        let m = mount(Some("/api"), Some(pattern("^\\/other\\/?(?=\\/|$)", &[])));
        assert_eq!(extract_mount_path(&m), "/api");
    }

    #[test]
    fn test_prefix_from_compiled_pattern() {
        let m = mount(None, Some(pattern("^\\/api\\/v1\\/?(?=\\/|$)", &[])));
        assert_eq!(extract_mount_path(&m), "/api/v1");
    }

    #[test]
    fn test_prefix_from_regex_literal_with_flags() {
        let m = mount(None, Some(pattern("/^\\/admin\\/?(?=\\/|$)/i", &[])));
        assert_eq!(extract_mount_path(&m), "/admin");
    }

    #[test]
    fn test_root_mount_pattern_is_empty() {
        let m = mount(None, Some(pattern("^\\/?(?=\\/|$)", &[])));
        assert_eq!(extract_mount_path(&m), "");
    }

    #[test]
    fn test_parameter_groups_use_keys() {
        let m = mount(
            None,
            Some(pattern(
                "^\\/users\\/(?:([^\\/]+?))\\/posts\\/?(?=\\/|$)",
                &["userId"],
            )),
        );
        assert_eq!(extract_mount_path(&m), "/users/:userId/posts");
    }

    #[test]
    fn test_parameter_group_without_key_fails() {
        let p = pattern("^\\/users\\/(?:([^\\/]+?))\\/?(?=\\/|$)", &[]);
        assert_eq!(prefix_from_pattern(&p), None);
    }

    #[test]
    fn test_true_regex_yields_empty() {
        let m = mount(None, Some(pattern("^\\/v[0-9]+\\/?(?=\\/|$)", &[])));
        assert_eq!(extract_mount_path(&m), "");
    }

    #[test]
    fn test_escaped_literals_are_unescaped() {
        let m = mount(None, Some(pattern("^\\/files\\.v2\\/my\\-docs\\/?$", &[])));
        assert_eq!(extract_mount_path(&m), "/files.v2/my-docs");
    }

    #[test]
    fn test_no_path_information() {
        assert_eq!(extract_mount_path(&mount(None, None)), "");
    }
}
