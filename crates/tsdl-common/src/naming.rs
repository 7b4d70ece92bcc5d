//! Anchor slugs and per-symbol output file names.

use crate::DeclKind;

/// Anchor-safe slug for a member: every non-word character becomes `_` and
/// the result is lowercased.
pub fn anchor_slug(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// File stem for one emitted symbol, e.g. `interface-Array` or
/// `variable-___array`.
///
/// Names starting with a lowercase letter get a `___` prefix so they never
/// collide with an uppercase sibling on case-insensitive filesystems.
pub fn output_file_stem(kind: DeclKind, name: &str) -> String {
    let starts_lower = name.chars().next().is_some_and(|ch| ch.is_lowercase());
    if starts_lower {
        format!("{}-___{}", kind.file_prefix(), name)
    } else {
        format!("{}-{}", kind.file_prefix(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_slug() {
        assert_eq!(anchor_slug("addEventListener"), "addeventlistener");
        assert_eq!(anchor_slug("[iterator]"), "_iterator_");
        assert_eq!(anchor_slug("__call"), "__call");
    }

    #[test]
    fn test_lowercase_names_are_prefixed() {
        assert_eq!(output_file_stem(DeclKind::Variable, "array"), "variable-___array");
        assert_eq!(output_file_stem(DeclKind::Variable, "Array"), "variable-Array");
        assert_eq!(output_file_stem(DeclKind::TypeAlias, "Partial"), "typealias-Partial");
    }
}
