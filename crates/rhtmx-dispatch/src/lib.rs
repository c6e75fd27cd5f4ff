//! # RHTMX Dispatch
//!
//! A method-aware request dispatcher. Given an ordered list of routes
//! (methods, pattern, handler), it resolves a `(method, url)` pair to one of:
//! - **Found**: the first matching route plus its extracted parameters
//! - **Not found**: no route pattern matches the URL
//! - **Method not allowed**: the URL matches, but only under other methods
//!
//! ## Pattern Syntax
//!
//! - Static text: `/about`
//! - Parameters: `/users/{id}` (any text except `/`)
//! - Constrained parameters: `/users/{id:\d+}`
//! - Optional segments, nestable: `/posts(/{slug}(/comments))`
//! - Trailing wildcard: `/assets/*`
//! - Match everything: `*`
//!
//! Leading and trailing slashes on patterns are ignored, so `foo`, `/foo/`
//! and `/////foo////` all register the same route.
//!
//! ## Matching Rules
//!
//! - Routes are checked in registration order; the first match wins
//! - An unmatched `HEAD` request is retried as `GET`
//! - Patterns are compiled once, when the route is built
//! - Parameters are returned with the response, never stored on the route,
//!   so a dispatcher can be shared across threads
//!
//! ## Example
//!
//! ```
//! use rhtmx_dispatch::{create_dispatcher, Status};
//!
//! let dispatcher = create_dispatcher(|map| {
//!     map.add_route("GET", "/user/{name}/{id:\\d+}", "show_user");
//!     map.add_route("GET|POST", "/user/{name}", "user");
//! })
//! .unwrap();
//!
//! let response = dispatcher.dispatch("GET", "/user/timothy/42");
//! assert_eq!(response.handler(), Some(&"show_user"));
//! assert_eq!(response.params().unwrap().get("id"), Some("42"));
//!
//! let response = dispatcher.dispatch("DELETE", "/user/timothy");
//! assert_eq!(response.status(), Status::MethodNotAllowed);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod dispatcher;
mod error;
mod map;
pub mod path;
mod response;
pub mod route;

// ============================================================================
// Public API
// ============================================================================

pub use config::DispatchConfig;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
pub use map::{create_dispatcher, RouteDefinition, RouteMap};
pub use path::{decode_component, normalize_pattern};
pub use response::{Response, RouteMatch, Status};
pub use route::{CompiledPattern, Params, Route};
