/// Matching compiled patterns against request URLs
///
/// Matching is case-sensitive and whitespace-literal: the URL is compared
/// exactly as the caller supplied it.

use std::collections::HashMap;

use super::pattern::{CompiledPattern, DynamicPattern};
use crate::path::decode_component;

/// Parameters extracted from a matched URL
///
/// Keeps declaration order. A parameter declared inside an optional segment
/// that did not participate in the match is present with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the decoded value of a parameter
    ///
    /// Returns `None` both for undeclared names and for declared parameters
    /// that did not participate in the match; use [`Params::contains`] to tell
    /// them apart.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the pattern declared this parameter
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterates `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Declared parameter names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collects the parameters that have a value
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.clone().map(|v| (name.clone(), v)))
            .collect()
    }
}

impl<N, V> FromIterator<(N, Option<V>)> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, Option<V>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.map(Into::into)))
                .collect(),
        }
    }
}

/// Matches a URL against a compiled pattern
///
/// Returns `None` when the URL does not match, otherwise the extracted
/// parameters (empty for static and match-all patterns).
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::route::{matcher::match_url, pattern::compile};
///
/// let compiled = compile("/user/{name}").unwrap();
/// let params = match_url(&compiled, "/user/timothy").unwrap();
/// assert_eq!(params.get("name"), Some("timothy"));
///
/// assert!(match_url(&compiled, "/user/timothy/posts").is_none());
/// ```
pub fn match_url(pattern: &CompiledPattern, url: &str) -> Option<Params> {
    match pattern {
        CompiledPattern::MatchAll => Some(Params::new()),
        CompiledPattern::Static(literal) => (literal == url).then(Params::new),
        CompiledPattern::Dynamic(dynamic) => match_dynamic(dynamic, url),
    }
}

fn match_dynamic(pattern: &DynamicPattern, url: &str) -> Option<Params> {
    let captures = pattern.regex.captures(url)?;

    Some(
        pattern
            .params
            .iter()
            .map(|(name, index)| {
                let value = captures
                    .get(*index)
                    .map(|m| decode_component(m.as_str()));
                (name.clone(), value)
            })
            .collect(),
    )
}
