//! String case conversion and kebab-case validation for feature names

use once_cell::sync::Lazy;
use regex::Regex;

static KEBAB_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(-[a-z]+)*$").expect("kebab-case pattern is valid"));

/// Convert a kebab-case string to PascalCase.
///
/// The first character and every character following a hyphen are uppercased,
/// and the hyphens are removed.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = true;

    for ch in s.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Convert a kebab-case string to camelCase.
///
/// Same rule as [`to_pascal_case`] except the very first character keeps its case.
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;

    for ch in s.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Check that a string is plain kebab-case: lowercase ASCII words joined by single hyphens.
pub fn is_kebab_case(s: &str) -> bool {
    KEBAB_CASE.is_match(s)
}

/// Check a single path segment, accepting an optional leading underscore.
pub fn is_kebab_case_segment(segment: &str) -> bool {
    match segment.strip_prefix('_') {
        Some(rest) => is_kebab_case(rest),
        None => is_kebab_case(segment),
    }
}

/// Split a directory path on `/` or `\`, dropping empty segments.
pub fn path_segments(s: &str) -> Vec<&str> {
    s.split(['/', '\\']).filter(|seg| !seg.is_empty()).collect()
}

/// Check that every non-empty segment of a `/` or `\` separated path is kebab-case,
/// optionally prefixed with a single underscore.
///
/// A path with no non-empty segments is rejected.
pub fn is_kebab_case_path(s: &str) -> bool {
    let segments = path_segments(s);
    !segments.is_empty() && segments.iter().all(|seg| is_kebab_case_segment(seg))
}

/// Check that a relative path stays below the directory it is joined onto:
/// not absolute, no drive prefix, no `..` segments.
pub fn is_contained_relative_path(s: &str) -> bool {
    !s.starts_with(['/', '\\'])
        && !s.contains(':')
        && s.split(['/', '\\']).all(|seg| seg != "..")
}

/// Join logical path parts with `/`, collapsing duplicate separators.
pub fn join_logical_path<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for part in parts {
        for segment in part.split('/').filter(|seg| !seg.is_empty()) {
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(segment);
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("my-feature-name"), "MyFeatureName");
        assert_eq!(to_pascal_case("order-item"), "OrderItem");
        assert_eq!(to_pascal_case("a"), "A");
        assert_eq!(to_pascal_case("Feature"), "Feature");
        assert_eq!(to_pascal_case("MyFeature"), "MyFeature");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("my-feature-name"), "myFeatureName");
        assert_eq!(to_camel_case("order-item"), "orderItem");
        assert_eq!(to_camel_case("tag"), "tag");
        assert_eq!(to_camel_case("myFeature"), "myFeature");
    }

    #[test]
    fn test_is_kebab_case() {
        assert!(is_kebab_case("tag"));
        assert!(is_kebab_case("order-item"));
        assert!(is_kebab_case("a-b-c"));

        assert!(!is_kebab_case(""));
        assert!(!is_kebab_case("-tag"));
        assert!(!is_kebab_case("tag-"));
        assert!(!is_kebab_case("order--item"));
        assert!(!is_kebab_case("Order-item"));
        assert!(!is_kebab_case("item2"));
        assert!(!is_kebab_case("order_item"));
        assert!(!is_kebab_case("order item"));
        assert!(!is_kebab_case("_order"));
    }

    #[test]
    fn test_is_kebab_case_path() {
        assert!(is_kebab_case_path("orders"));
        assert!(is_kebab_case_path("my-parent-dir/sub-dir"));
        assert!(is_kebab_case_path("my-parent-dir\\sub-dir"));
        assert!(is_kebab_case_path("_internal/order-item"));
        assert!(is_kebab_case_path("orders//items/"));

        assert!(!is_kebab_case_path(""));
        assert!(!is_kebab_case_path("/"));
        assert!(!is_kebab_case_path("Orders/items"));
        assert!(!is_kebab_case_path("orders/__items"));
        assert!(!is_kebab_case_path("orders/_"));
        assert!(!is_kebab_case_path("orders/items-"));
    }

    #[test]
    fn test_is_contained_relative_path() {
        assert!(is_contained_relative_path("model/types/requests"));
        assert!(is_contained_relative_path("{{FeatureName}}Req.ts"));
        assert!(is_contained_relative_path("..hidden-but-fine.ts"));

        assert!(!is_contained_relative_path("../outside"));
        assert!(!is_contained_relative_path("api/../../etc"));
        assert!(!is_contained_relative_path("api\\..\\x"));
        assert!(!is_contained_relative_path("/etc/passwd"));
        assert!(!is_contained_relative_path("\\server\\share"));
        assert!(!is_contained_relative_path("C:/Windows"));
    }

    #[test]
    fn test_join_logical_path() {
        assert_eq!(
            join_logical_path(["@/features/", "orders", "order-item"]),
            "@/features/orders/order-item"
        );
        assert_eq!(join_logical_path(["@/", "tag"]), "@/tag");
        assert_eq!(join_logical_path(["@/shared/features", "a/b", "c"]), "@/shared/features/a/b/c");
    }
}
