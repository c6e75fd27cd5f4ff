// File: src/map.rs
// Purpose: Route registration helper with pipe-separated methods and prefix groups

use crate::config::DispatchConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::route::Route;

/// An uncompiled route as collected by [`RouteMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition<H> {
    pub methods: Vec<String>,
    pub pattern: String,
    pub handler: H,
}

impl<H> RouteDefinition<H> {
    /// Compiles this definition into a [`Route`]
    pub fn compile(self) -> Result<Route<H>> {
        Route::new(self.methods, self.pattern, self.handler)
    }
}

/// Collects route definitions before a [`Dispatcher`] is built
///
/// Patterns are compiled when the map is turned into a dispatcher, so the
/// registration calls themselves never fail.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::RouteMap;
///
/// let mut map = RouteMap::new();
/// map.add_group("/api", |api| {
///     api.add_route("GET|POST", "/users", "users");
///     api.add_group("/admin", |admin| {
///         admin.add_route("delete", "/users/{id}", "delete_user");
///     });
/// });
///
/// assert_eq!(map.definitions()[1].pattern, "/api/admin/users/{id}");
/// assert_eq!(map.definitions()[1].methods, ["DELETE"]);
///
/// let dispatcher = map.into_dispatcher().unwrap();
/// assert!(dispatcher.dispatch("POST", "/api/users").is_found());
/// ```
#[derive(Debug, Clone)]
pub struct RouteMap<H> {
    definitions: Vec<RouteDefinition<H>>,
    group_prefix: String,
}

impl<H> Default for RouteMap<H> {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
            group_prefix: String::new(),
        }
    }
}

impl<H> RouteMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing definitions
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = RouteDefinition<H>>,
    {
        Self {
            definitions: definitions.into_iter().collect(),
            group_prefix: String::new(),
        }
    }

    /// Adds a route
    ///
    /// `methods` is pipe-separated (`"GET|POST|PUT"`) and uppercased. The
    /// active group prefix is prepended to `pattern` and the result trimmed.
    pub fn add_route(
        &mut self,
        methods: &str,
        pattern: &str,
        handler: H,
    ) -> &RouteDefinition<H> {
        let methods = methods
            .split('|')
            .map(|m| m.trim().to_uppercase())
            .collect();
        let pattern = format!("{}{}", self.group_prefix, pattern)
            .trim()
            .to_string();

        self.definitions.push(RouteDefinition {
            methods,
            pattern,
            handler,
        });

        &self.definitions[self.definitions.len() - 1]
    }

    /// Adds routes under a shared prefix
    ///
    /// Groups nest: the prefix is appended to any enclosing group's prefix
    /// for the duration of `f`, then restored.
    pub fn add_group<F>(&mut self, prefix: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let previous_len = self.group_prefix.len();
        self.group_prefix.push_str(prefix);
        f(self);
        self.group_prefix.truncate(previous_len);
    }

    pub fn definitions(&self) -> &[RouteDefinition<H>] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Removes all routes and resets the group prefix
    pub fn clear(&mut self) {
        self.definitions.clear();
        self.group_prefix.clear();
    }

    /// Compiles every definition and builds a dispatcher
    ///
    /// Returns the first pattern compilation error, if any.
    pub fn into_dispatcher(self) -> Result<Dispatcher<H>> {
        self.into_dispatcher_with_config(DispatchConfig::default())
    }

    pub fn into_dispatcher_with_config(self, config: DispatchConfig) -> Result<Dispatcher<H>> {
        let routes = self
            .definitions
            .into_iter()
            .map(RouteDefinition::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Dispatcher::with_config(routes, config))
    }
}

/// Builds a dispatcher from routes registered in a closure
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::create_dispatcher;
///
/// let dispatcher = create_dispatcher(|map| {
///     map.add_route("GET", "/foo", "bar");
/// })
/// .unwrap();
///
/// assert_eq!(dispatcher.len(), 1);
/// ```
pub fn create_dispatcher<H, F>(f: F) -> Result<Dispatcher<H>>
where
    F: FnOnce(&mut RouteMap<H>),
{
    let mut map = RouteMap::new();
    f(&mut map);
    map.into_dispatcher()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_route_splits_methods() {
        let mut map = RouteMap::new();
        let definition = map.add_route("GET|post|Put", "/foo", "bar");
        assert_eq!(definition.methods, ["GET", "POST", "PUT"]);
        assert_eq!(definition.pattern, "/foo");
    }

    #[test]
    fn test_add_route_trims_pattern() {
        let mut map = RouteMap::new();
        map.add_route("GET", "  /foo  ", ());
        assert_eq!(map.definitions()[0].pattern, "/foo");
    }

    #[test]
    fn test_group_prefix_restored() {
        let mut map = RouteMap::new();
        map.add_group("/foo", |map| {
            map.add_route("GET", "/bar", 1);
        });
        map.add_route("GET", "/baz", 2);

        assert_eq!(map.definitions()[0].pattern, "/foo/bar");
        assert_eq!(map.definitions()[1].pattern, "/baz");
    }

    #[test]
    fn test_clear_resets_prefix() {
        let mut map = RouteMap::new();
        map.add_group("/foo", |map| {
            map.add_route("GET", "/bar", ());
            map.clear();
            map.add_route("GET", "/baz", ());
        });

        assert_eq!(map.len(), 1);
        assert_eq!(map.definitions()[0].pattern, "/baz");
    }

    #[test]
    fn test_into_dispatcher_reports_bad_pattern() {
        let mut map = RouteMap::new();
        map.add_route("GET", "/ok", ());
        map.add_route("GET", "/user/{name", ());
        assert!(map.into_dispatcher().is_err());
    }
}
