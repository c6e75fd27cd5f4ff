// File: src/response.rs
// Purpose: Dispatch results (found, not found, method not allowed)

use std::fmt;

use crate::error::{DispatchError, Result};
use crate::route::{Params, Route};

/// Outcome kind of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    NotFound,
    Found,
    MethodNotAllowed,
}

impl Status {
    /// All recognized statuses
    pub const ALL: [Status; 3] = [Status::NotFound, Status::Found, Status::MethodNotAllowed];

    /// Wire ordinal: NOT_FOUND = 0, FOUND = 1, METHOD_NOT_ALLOWED = 2
    pub fn ordinal(self) -> i64 {
        match self {
            Status::NotFound => 0,
            Status::Found => 1,
            Status::MethodNotAllowed => 2,
        }
    }

    /// Corresponding HTTP status code
    pub fn http_code(self) -> u16 {
        match self {
            Status::NotFound => 404,
            Status::Found => 200,
            Status::MethodNotAllowed => 405,
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = DispatchError;

    fn try_from(ordinal: i64) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.ordinal() == ordinal)
            .ok_or(DispatchError::InvalidStatus(ordinal))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::NotFound => "NOT_FOUND",
            Status::Found => "FOUND",
            Status::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        };
        f.write_str(name)
    }
}

/// A matched route together with the parameters extracted for this request
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub params: Params,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn handler(&self) -> &'a H {
        self.route.handler()
    }
}

// Manual impl: cloning only copies the reference, so `H: Clone` is not needed
impl<H> Clone for RouteMatch<'_, H> {
    fn clone(&self) -> Self {
        Self {
            route: self.route,
            params: self.params.clone(),
        }
    }
}

/// Result of dispatching a `(method, url)` pair
///
/// Every variant is a successful outcome; callers branch on it rather than
/// treating anything but `Found` as an error.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::{Dispatcher, Response, Route, Status};
///
/// let dispatcher = Dispatcher::new(vec![
///     Route::new(["GET", "POST"], "/user/{name}", "user").unwrap(),
/// ]);
///
/// match dispatcher.dispatch("PUT", "/user/timothy") {
///     Response::MethodNotAllowed(allowed) => assert_eq!(allowed, ["GET", "POST"]),
///     other => panic!("unexpected {}", other.status()),
/// }
///
/// assert_eq!(dispatcher.dispatch("GET", "/nope").status(), Status::NotFound);
/// ```
#[derive(Debug)]
pub enum Response<'a, H> {
    Found(RouteMatch<'a, H>),
    NotFound,
    /// Methods accepted at this URL, in route then method order
    MethodNotAllowed(Vec<&'a str>),
}

impl<'a, H> Response<'a, H> {
    /// Builds a response from a raw status ordinal and optional parts
    ///
    /// The route must be present exactly when the status is FOUND, and the
    /// allowed methods exactly when it is METHOD_NOT_ALLOWED.
    pub fn from_parts(
        status: i64,
        matched: Option<RouteMatch<'a, H>>,
        allowed_methods: Option<Vec<&'a str>>,
    ) -> Result<Self> {
        match (Status::try_from(status)?, matched, allowed_methods) {
            (Status::Found, Some(matched), None) => Ok(Response::Found(matched)),
            (Status::NotFound, None, None) => Ok(Response::NotFound),
            (Status::MethodNotAllowed, None, Some(allowed)) => {
                Ok(Response::MethodNotAllowed(allowed))
            }
            (Status::Found, _, _) => Err(DispatchError::InconsistentResponse(
                "FOUND requires a matched route and no allowed methods",
            )),
            (Status::NotFound, _, _) => Err(DispatchError::InconsistentResponse(
                "NOT_FOUND carries neither a route nor allowed methods",
            )),
            (Status::MethodNotAllowed, _, _) => Err(DispatchError::InconsistentResponse(
                "METHOD_NOT_ALLOWED requires allowed methods and no route",
            )),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Response::Found(_) => Status::Found,
            Response::NotFound => Status::NotFound,
            Response::MethodNotAllowed(_) => Status::MethodNotAllowed,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Response::Found(_))
    }

    /// The matched route, present only when FOUND
    pub fn route(&self) -> Option<&'a Route<H>> {
        match self {
            Response::Found(matched) => Some(matched.route),
            _ => None,
        }
    }

    /// The matched route's handler, present only when FOUND
    pub fn handler(&self) -> Option<&'a H> {
        self.route().map(Route::handler)
    }

    /// Extracted parameters, present only when FOUND
    pub fn params(&self) -> Option<&Params> {
        match self {
            Response::Found(matched) => Some(&matched.params),
            _ => None,
        }
    }

    /// Allowed methods, present only when METHOD_NOT_ALLOWED
    pub fn allowed_methods(&self) -> Option<&[&'a str]> {
        match self {
            Response::MethodNotAllowed(allowed) => Some(allowed.as_slice()),
            _ => None,
        }
    }

    pub fn into_match(self) -> Option<RouteMatch<'a, H>> {
        match self {
            Response::Found(matched) => Some(matched),
            _ => None,
        }
    }
}

impl<H> Clone for Response<'_, H> {
    fn clone(&self) -> Self {
        match self {
            Response::Found(matched) => Response::Found(matched.clone()),
            Response::NotFound => Response::NotFound,
            Response::MethodNotAllowed(allowed) => Response::MethodNotAllowed(allowed.clone()),
        }
    }
}
