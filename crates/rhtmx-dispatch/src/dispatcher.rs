// File: src/dispatcher.rs
// Purpose: Resolve (method, url) pairs against an ordered route list

use tracing::trace;

use crate::config::DispatchConfig;
use crate::response::{Response, RouteMatch};
use crate::route::Route;

/// Dispatches requests against a fixed, ordered list of routes
///
/// Routes are tried in registration order and the first route that accepts
/// both the method and the URL wins. Routes are never reordered or scored.
///
/// The dispatcher holds no mutable state: matched parameters are returned in
/// the [`Response`], so one dispatcher can serve many threads at once.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::{Dispatcher, Route, Status};
///
/// let dispatcher = Dispatcher::new(vec![
///     Route::new(["GET"], "/user/{name}/{id:\\d+}", "h1").unwrap(),
///     Route::new(["GET"], "/foofoo", "h2").unwrap(),
///     Route::new(["GET"], "/user/{id:\\d+}", "h3").unwrap(),
///     Route::new(["GET", "POST"], "/user/{name}", "h4").unwrap(),
/// ]);
///
/// let response = dispatcher.dispatch("POST", "/user/timothy");
/// assert_eq!(response.status(), Status::Found);
/// assert_eq!(response.handler(), Some(&"h4"));
/// assert_eq!(response.params().unwrap().get("name"), Some("timothy"));
///
/// let response = dispatcher.dispatch("PUT", "/user/timothy");
/// assert_eq!(response.allowed_methods(), Some(&["GET", "POST"][..]));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<H> {
    routes: Vec<Route<H>>,
    config: DispatchConfig,
}

impl<H> Dispatcher<H> {
    /// Creates a dispatcher with the default configuration
    pub fn new<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = Route<H>>,
    {
        Self::with_config(routes, DispatchConfig::default())
    }

    /// Creates a dispatcher with an explicit configuration
    pub fn with_config<I>(routes: I, config: DispatchConfig) -> Self
    where
        I: IntoIterator<Item = Route<H>>,
    {
        Self {
            routes: routes.into_iter().collect(),
            config,
        }
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Resolves a request to FOUND, NOT_FOUND, or METHOD_NOT_ALLOWED
    ///
    /// 1. The first route allowing `method` whose pattern matches `url` wins.
    /// 2. An unmatched `HEAD` is retried once as an independent `GET` lookup
    ///    (unless disabled in the config).
    /// 3. Otherwise every route's other methods are collected where the
    ///    pattern matches `url`; a non-empty list means METHOD_NOT_ALLOWED.
    pub fn dispatch(&self, method: &str, url: &str) -> Response<'_, H> {
        if let Some(matched) = self.find(method, url) {
            trace!(method, url, pattern = matched.route.pattern(), "route found");
            return Response::Found(matched);
        }

        if method == "HEAD" && self.config.head_fallback {
            trace!(url, "no HEAD route matched, falling back to GET");
            return self.dispatch("GET", url);
        }

        let allowed = self.allowed_methods(method, url);
        if allowed.is_empty() {
            trace!(method, url, "no route found");
            Response::NotFound
        } else {
            trace!(method, url, allowed = ?allowed, "method not allowed");
            Response::MethodNotAllowed(allowed)
        }
    }

    /// First route in registration order accepting both method and URL
    fn find(&self, method: &str, url: &str) -> Option<RouteMatch<'_, H>> {
        // Functional iteration with short-circuit on first match
        self.routes
            .iter()
            .filter(|route| route.allows(method))
            .find_map(|route| route.matches(url).map(|params| RouteMatch { route, params }))
    }

    /// Methods other than `method` offered by routes whose pattern matches `url`
    fn allowed_methods(&self, method: &str, url: &str) -> Vec<&str> {
        let mut allowed: Vec<&str> = Vec::new();

        for route in &self.routes {
            let mut others = route
                .methods()
                .iter()
                .map(String::as_str)
                .filter(|m| *m != method)
                .peekable();

            // Skip the pattern match when there is nothing to report
            if others.peek().is_none() || route.matches(url).is_none() {
                continue;
            }

            for m in others {
                if !self.config.dedup_allowed_methods || !allowed.contains(&m) {
                    allowed.push(m);
                }
            }
        }

        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Status;

    fn route(methods: &[&str], pattern: &str, handler: &'static str) -> Route<&'static str> {
        Route::new(methods.iter().copied(), pattern, handler).unwrap()
    }

    #[test]
    fn test_empty_dispatcher() {
        let dispatcher: Dispatcher<()> = Dispatcher::new(Vec::new());
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch("GET", "/").status(), Status::NotFound);
    }

    #[test]
    fn test_method_checked_before_pattern() {
        let dispatcher = Dispatcher::new(vec![
            route(&["POST"], "/foo", "post"),
            route(&["GET"], "/foo", "get"),
        ]);

        assert_eq!(dispatcher.dispatch("GET", "/foo").handler(), Some(&"get"));
        assert_eq!(dispatcher.dispatch("POST", "/foo").handler(), Some(&"post"));
    }

    #[test]
    fn test_head_fallback_disabled() {
        let config = DispatchConfig {
            head_fallback: false,
            ..DispatchConfig::default()
        };
        let dispatcher = Dispatcher::with_config(vec![route(&["GET"], "/foo", "get")], config);

        let response = dispatcher.dispatch("HEAD", "/foo");
        assert_eq!(response.status(), Status::MethodNotAllowed);
        assert_eq!(response.allowed_methods(), Some(&["GET"][..]));
    }

    #[test]
    fn test_allowed_methods_not_deduplicated_by_default() {
        let dispatcher = Dispatcher::new(vec![
            route(&["GET", "POST"], "/foo", "a"),
            route(&["GET"], "/foo", "b"),
        ]);

        let response = dispatcher.dispatch("DELETE", "/foo");
        assert_eq!(response.allowed_methods(), Some(&["GET", "POST", "GET"][..]));
    }

    #[test]
    fn test_allowed_methods_deduplicated_when_configured() {
        let config = DispatchConfig {
            dedup_allowed_methods: true,
            ..DispatchConfig::default()
        };
        let dispatcher = Dispatcher::with_config(
            vec![
                route(&["GET", "POST"], "/foo", "a"),
                route(&["GET"], "/foo", "b"),
            ],
            config,
        );

        let response = dispatcher.dispatch("DELETE", "/foo");
        assert_eq!(response.allowed_methods(), Some(&["GET", "POST"][..]));
    }

    #[test]
    fn test_allowed_methods_follow_route_then_method_order() {
        let dispatcher = Dispatcher::new(vec![
            route(&["PUT"], "/foo/{x}", "put"),
            route(&["GET", "POST"], "/foo/*", "any"),
            route(&["PATCH"], "/other", "other"),
        ]);

        let response = dispatcher.dispatch("DELETE", "/foo/bar");
        assert_eq!(response.allowed_methods(), Some(&["PUT", "GET", "POST"][..]));
    }

    #[test]
    fn test_allowed_methods_skip_non_matching_patterns() {
        let dispatcher = Dispatcher::new(vec![
            route(&["GET"], "/item/{id:\\d+}", "item"),
            route(&["POST"], "/item/new", "create"),
        ]);

        let response = dispatcher.dispatch("POST", "/item/42");
        assert_eq!(response.allowed_methods(), Some(&["GET"][..]));

        let response = dispatcher.dispatch("DELETE", "/item/abc");
        assert_eq!(response.status(), Status::NotFound);
    }
}
