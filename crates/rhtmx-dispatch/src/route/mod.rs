//! Route module for method-aware dispatching
//!
//! Contains the route record plus its pure functional components:
//! - `pattern`: raw pattern → compiled matcher
//! - `matcher`: compiled matcher + URL → extracted parameters
//!
//! Patterns are compiled once when the route is built and never recompiled
//! during dispatch. A route is immutable after construction, so matched
//! parameters travel in the dispatch result instead of living on the route.

pub mod matcher;
pub mod pattern;

// Re-export commonly used types
pub use matcher::{match_url, Params};
pub use pattern::{compile, CompiledPattern};

use crate::error::Result;

/// A route definition: allowed methods, a URL pattern, and an opaque handler
///
/// The handler is never called or inspected; it is whatever the caller wants
/// to get back when the route matches.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::Route;
///
/// let route = Route::new(["get", "POST"], "/user/{name}", "user_handler").unwrap();
/// assert_eq!(route.methods(), ["GET", "POST"]);
/// assert_eq!(route.parameter_names(), vec!["name"]);
///
/// let params = route.matches("/user/timothy").unwrap();
/// assert_eq!(params.get("name"), Some("timothy"));
/// ```
#[derive(Debug, Clone)]
pub struct Route<H> {
    methods: Vec<String>,
    pattern: String,
    handler: H,
    compiled: CompiledPattern,
}

impl<H> Route<H> {
    /// Builds a route and compiles its pattern
    ///
    /// Methods are uppercased and deduplicated, keeping first occurrence order.
    /// Fails if the pattern is malformed (see [`DispatchError`](crate::DispatchError)).
    pub fn new<I, S>(methods: I, pattern: impl Into<String>, handler: H) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = pattern.into();
        let compiled = compile(&pattern)?;

        let methods = methods
            .into_iter()
            .map(|m| m.as_ref().to_uppercase())
            .fold(Vec::new(), |mut acc: Vec<String>, m| {
                if !acc.contains(&m) {
                    acc.push(m);
                }
                acc
            });

        Ok(Self {
            methods,
            pattern,
            handler,
            compiled,
        })
    }

    /// Allowed methods in registration order
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// The pattern as registered (before normalization)
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    /// Declared parameter names in order
    pub fn parameter_names(&self) -> Vec<&str> {
        self.compiled.parameter_names()
    }

    /// Whether the route matches by plain string comparison
    pub fn is_static(&self) -> bool {
        self.compiled.is_static()
    }

    /// Whether `method` is in this route's method set (case-sensitive)
    pub fn allows(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// Matches a URL against this route's pattern, ignoring methods
    pub fn matches(&self, url: &str) -> Option<Params> {
        match_url(&self.compiled, url)
    }
}
