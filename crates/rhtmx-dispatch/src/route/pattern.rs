/// Pattern compilation for route definitions
///
/// Turns a registered pattern string into a [`CompiledPattern`]: a literal
/// string for the fast path, the match-all marker, or an anchored regex with
/// one capture group per declared parameter.
///
/// # Pattern Syntax
///
/// - `{name}` → parameter matching one or more characters except `/`
/// - `{name:regex}` → parameter constrained by a custom regex
/// - `(...)` → optional segment, may be nested: `/foo(/baz(/bim))`
/// - `/*` → nothing, `/`, or `/` followed by anything
/// - `*` → anything except line breaks
/// - `*` on its own → matches every URL
///
/// Everything else is literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{DispatchError, Result};
use crate::path::{normalize_pattern, MATCH_ALL};

static PARAM_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").unwrap());

/// Default fragment for a parameter without a custom regex
pub const DEFAULT_PARAM_REGEX: &str = "[^/]+";

/// Fragment for `/*`: empty, a lone slash, or a slash followed by anything
const SLASH_WILDCARD: &str = "(?:/?|/.*?)";

/// Fragment for a bare `*`
const WILDCARD: &str = ".*";

/// A pattern ready for matching
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// `*`: every URL matches
    MatchAll,
    /// No tokens: exact string comparison against the normalized pattern
    Static(String),
    /// Anchored regex with capture groups for each parameter
    Dynamic(DynamicPattern),
}

/// Regex form of a pattern with its declared parameters
#[derive(Debug, Clone)]
pub struct DynamicPattern {
    pub(crate) regex: Regex,
    /// (parameter name, capture group index), in declaration order
    pub(crate) params: Vec<(String, usize)>,
}

impl DynamicPattern {
    /// The generated regex source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter names in declaration order
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }
}

impl CompiledPattern {
    /// Whether this pattern uses the literal fast path
    pub fn is_static(&self) -> bool {
        matches!(self, CompiledPattern::Static(_) | CompiledPattern::MatchAll)
    }

    /// Parameter names in declaration order (empty for static patterns)
    pub fn parameter_names(&self) -> Vec<&str> {
        match self {
            CompiledPattern::Dynamic(dynamic) => dynamic.parameter_names().collect(),
            _ => Vec::new(),
        }
    }
}

/// Compiles a raw pattern
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::route::pattern::{compile, CompiledPattern};
///
/// assert!(matches!(compile("*").unwrap(), CompiledPattern::MatchAll));
/// assert!(matches!(compile("foo/").unwrap(), CompiledPattern::Static(ref p) if p == "/foo"));
///
/// let compiled = compile("/user/{name}/{id:\\d+}").unwrap();
/// assert_eq!(compiled.parameter_names(), vec!["name", "id"]);
///
/// assert!(compile("/user/{name").is_err());
/// ```
pub fn compile(raw: &str) -> Result<CompiledPattern> {
    if raw == MATCH_ALL {
        debug!(pattern = raw, "compiled match-all pattern");
        return Ok(CompiledPattern::MatchAll);
    }

    let normalized = normalize_pattern(raw);

    if !has_tokens(&normalized) {
        debug!(pattern = raw, "compiled static pattern");
        return Ok(CompiledPattern::Static(normalized.into_owned()));
    }

    let (source, names) = translate(&normalized)?;
    let regex = Regex::new(&source).map_err(|source| DispatchError::InvalidRegex {
        pattern: normalized.to_string(),
        source,
    })?;

    let params = names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let group = group_name(i);
            regex
                .capture_names()
                .position(|n| n == Some(group.as_str()))
                .map(|index| (name, index))
        })
        .collect::<Vec<_>>();

    debug!(
        pattern = raw,
        regex = regex.as_str(),
        params = params.len(),
        "compiled dynamic pattern"
    );

    Ok(CompiledPattern::Dynamic(DynamicPattern { regex, params }))
}

/// Whether a normalized pattern needs the regex path
fn has_tokens(pattern: &str) -> bool {
    pattern.contains(['{', '}', '(', ')', '*'])
}

/// Internal capture group name for the i-th parameter
///
/// Parameter names may contain `-`, which the regex engine rejects in group
/// names, so groups are numbered and mapped back to names after compilation.
fn group_name(i: usize) -> String {
    format!("__p{}", i)
}

/// Translates a normalized pattern into anchored regex source
///
/// Returns the regex source and the parameter names in encounter order.
fn translate(pattern: &str) -> Result<(String, Vec<String>)> {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    let mut literal = String::new();
    let mut names: Vec<String> = Vec::new();
    let mut open_optionals: Vec<usize> = Vec::new();

    out.push_str("^(?:");

    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                flush_literal(&mut out, &mut literal);
                let end = closing_brace(pattern, i)?;
                let (name, fragment) = parse_param(pattern, &pattern[i + 1..end])?;
                if names.contains(&name) {
                    return Err(DispatchError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name,
                    });
                }
                out.push_str(&format!("(?P<{}>{})", group_name(names.len()), fragment));
                names.push(name);
                i = end + 1;
            }
            b'}' => {
                return Err(DispatchError::UnterminatedParameter {
                    pattern: pattern.to_string(),
                    position: i,
                });
            }
            b'(' => {
                flush_literal(&mut out, &mut literal);
                out.push_str("(?:");
                open_optionals.push(i);
                i += 1;
            }
            b')' => {
                flush_literal(&mut out, &mut literal);
                if open_optionals.pop().is_none() {
                    return Err(DispatchError::UnbalancedOptional {
                        pattern: pattern.to_string(),
                        position: i,
                    });
                }
                out.push_str(")?");
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                flush_literal(&mut out, &mut literal);
                out.push_str(SLASH_WILDCARD);
                i += 2;
            }
            b'*' => {
                flush_literal(&mut out, &mut literal);
                out.push_str(WILDCARD);
                i += 1;
            }
            _ => {
                // Advance by a whole char so multi-byte text stays intact
                let ch = pattern[i..].chars().next().unwrap_or_default();
                literal.push(ch);
                i += ch.len_utf8();
            }
        }
    }

    if let Some(position) = open_optionals.pop() {
        return Err(DispatchError::UnbalancedOptional {
            pattern: pattern.to_string(),
            position,
        });
    }

    flush_literal(&mut out, &mut literal);
    out.push_str(")$");

    Ok((out, names))
}

fn flush_literal(out: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        out.push_str(&regex::escape(literal));
        literal.clear();
    }
}

/// Finds the `}` closing the parameter opened at `start`
///
/// Braces inside a custom regex must balance, so `{id:\d{3}}` is one token.
fn closing_brace(pattern: &str, start: usize) -> Result<usize> {
    let mut depth = 0usize;
    for (offset, byte) in pattern.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + offset);
                }
            }
            _ => {}
        }
    }

    Err(DispatchError::UnterminatedParameter {
        pattern: pattern.to_string(),
        position: start,
    })
}

/// Splits a parameter token body into (name, regex fragment)
fn parse_param(pattern: &str, body: &str) -> Result<(String, String)> {
    let (name, custom) = match body.split_once(':') {
        Some((name, custom)) => (name, Some(custom.trim())),
        None => (body, None),
    };

    if !PARAM_NAME.is_match(name) {
        return Err(DispatchError::InvalidParameterName {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }

    let fragment = custom
        .filter(|custom| !custom.is_empty())
        .unwrap_or(DEFAULT_PARAM_REGEX);

    Ok((name.to_string(), fragment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_source(pattern: &str) -> String {
        match compile(pattern).unwrap() {
            CompiledPattern::Dynamic(dynamic) => dynamic.as_str().to_string(),
            other => panic!("expected dynamic pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_match_all() {
        assert!(matches!(compile("*").unwrap(), CompiledPattern::MatchAll));
    }

    #[test]
    fn test_compile_static() {
        for raw in ["/foo", "foo", "/foo/", "/////foo////"] {
            match compile(raw).unwrap() {
                CompiledPattern::Static(p) => assert_eq!(p, "/foo"),
                other => panic!("expected static pattern, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_compile_static_keeps_regex_metacharacters_literal() {
        match compile("/files/a.b+c").unwrap() {
            CompiledPattern::Static(p) => assert_eq!(p, "/files/a.b+c"),
            other => panic!("expected static pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_default_param() {
        assert_eq!(regex_source("/user/{name}"), "^(?:/user/(?P<__p0>[^/]+))$");
    }

    #[test]
    fn test_compile_custom_param() {
        assert_eq!(regex_source("/user/{id:\\d+}"), "^(?:/user/(?P<__p0>\\d+))$");
        assert_eq!(regex_source("/user/{id: \\d+ }"), "^(?:/user/(?P<__p0>\\d+))$");
    }

    #[test]
    fn test_compile_empty_custom_regex_uses_default() {
        assert_eq!(regex_source("/user/{id:}"), "^(?:/user/(?P<__p0>[^/]+))$");
    }

    #[test]
    fn test_compile_nested_braces_in_custom_regex() {
        let compiled = compile("/zip/{code:\\d{5}}").unwrap();
        assert_eq!(compiled.parameter_names(), vec!["code"]);
    }

    #[test]
    fn test_compile_optional_segments() {
        assert_eq!(regex_source("/foo(bar)"), "^(?:/foo(?:bar)?)$");
        assert_eq!(
            regex_source("/foo(/baz(/bim))"),
            "^(?:/foo(?:/baz(?:/bim)?)?)$"
        );
    }

    #[test]
    fn test_compile_wildcards() {
        assert_eq!(regex_source("/foo/*"), "^(?:/foo(?:/?|/.*?))$");
        assert_eq!(regex_source("/foo*"), "^(?:/foo.*)$");
    }

    #[test]
    fn test_compile_escapes_literals() {
        assert_eq!(regex_source("/a.b/{x}"), "^(?:/a\\.b/(?P<__p0>[^/]+))$");
    }

    #[test]
    fn test_parameter_names_in_order() {
        let compiled = compile("/{b}/{a-1}/{c_2:[a-z]+}").unwrap();
        assert_eq!(compiled.parameter_names(), vec!["b", "a-1", "c_2"]);
        assert!(!compiled.is_static());
    }

    #[test]
    fn test_custom_regex_groups_do_not_shift_params() {
        let compiled = compile("/{kind:(a|b)}/{id}").unwrap();
        let CompiledPattern::Dynamic(dynamic) = compiled else {
            panic!("expected dynamic pattern");
        };
        let caps = dynamic.regex.captures("/a/7").unwrap();
        assert_eq!(&caps[dynamic.params[0].1], "a");
        assert_eq!(&caps[dynamic.params[1].1], "7");
    }

    #[test]
    fn test_unterminated_parameter() {
        assert!(matches!(
            compile("/user/{name"),
            Err(DispatchError::UnterminatedParameter { position: 6, .. })
        ));
        assert!(matches!(
            compile("/user/name}"),
            Err(DispatchError::UnterminatedParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_parameter_name() {
        for raw in ["/{1id}", "/{}", "/{na me}", "/{_id}"] {
            assert!(
                matches!(compile(raw), Err(DispatchError::InvalidParameterName { .. })),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_duplicate_parameter() {
        assert!(matches!(
            compile("/{id}/{id}"),
            Err(DispatchError::DuplicateParameter { ref name, .. }) if name == "id"
        ));
    }

    #[test]
    fn test_unbalanced_optional() {
        assert!(matches!(
            compile("/foo(bar"),
            Err(DispatchError::UnbalancedOptional { position: 4, .. })
        ));
        assert!(matches!(
            compile("/foo)bar"),
            Err(DispatchError::UnbalancedOptional { position: 4, .. })
        ));
    }

    #[test]
    fn test_invalid_custom_regex() {
        assert!(matches!(
            compile("/{id:[0-9}"),
            Err(DispatchError::InvalidRegex { .. })
        ));
    }
}
