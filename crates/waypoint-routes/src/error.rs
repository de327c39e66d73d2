//! Route error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Duplicate route name: {0}")]
    DuplicateRouteName(String),

    #[error("Multiple catch-all routes: {first} and {second}")]
    MultipleCatchAll { first: String, second: String },

    #[error("Unknown route name: {0}")]
    UnknownRouteName(String),

    #[error("Route {route} requires parameter {param}")]
    MissingParam { route: String, param: String },

    #[error("Route {route} got an empty value for parameter {param}")]
    EmptyParam { route: String, param: String },

    #[error("Route {route} got a value for parameter {param} containing '/', '?' or '#'")]
    InvalidParam { route: String, param: String },

    #[error("Route {0} has no canonical path")]
    UnbuildableRoute(String),
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
