/// Path utilities for pattern normalization and parameter decoding
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// The pattern that matches every URL
pub const MATCH_ALL: &str = "*";

/// Normalize a registered pattern to canonical form
///
/// Strips every leading and trailing `/`, then prepends a single `/`.
/// The match-all pattern `*` is returned untouched.
///
/// Returns `Cow::Borrowed` when the pattern is already canonical.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::path::normalize_pattern;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_pattern("/foo"), Cow::Borrowed("/foo")));
/// assert_eq!(normalize_pattern("foo"), "/foo");
/// assert_eq!(normalize_pattern("/////foo////"), "/foo");
/// assert_eq!(normalize_pattern(""), "/");
/// assert_eq!(normalize_pattern("*"), "*");
/// ```
pub fn normalize_pattern(pattern: &str) -> Cow<'_, str> {
    if pattern == MATCH_ALL {
        return Cow::Borrowed(pattern);
    }

    let trimmed = pattern.trim_matches('/');

    // Already canonical: exactly one leading slash and no trailing slash
    if pattern.len() == trimmed.len() + 1 && pattern.starts_with('/') {
        return Cow::Borrowed(pattern);
    }

    Cow::Owned(format!("/{}", trimmed))
}

/// Decode a captured parameter value
///
/// Follows form-style URL decoding: `+` becomes a space and `%XX` sequences
/// become bytes. Byte sequences that are not valid UTF-8 are replaced with
/// U+FFFD rather than failing the match.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::path::decode_component;
///
/// assert_eq!(decode_component("timothy"), "timothy");
/// assert_eq!(decode_component("hello%20world"), "hello world");
/// assert_eq!(decode_component("a+b"), "a b");
/// ```
pub fn decode_component(raw: &str) -> String {
    if !raw.contains(['%', '+']) {
        return raw.to_string();
    }

    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
