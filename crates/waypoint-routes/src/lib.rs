//! Waypoint Routes
//!
//! The static half of the router:
//! - `RoutePattern` — `/`, `/presale`, `/users/:id`, `/:catchAll(.*)`
//! - `RouteTable` — validated, ordered, immutable after construction
//! - `resolve` — path string → `MatchResult` or no match
//!
//! The catch-all route always loses to any literal or parametric route,
//! wherever it is declared.

mod error;
mod matcher;
mod pattern;
mod route;
mod table;

pub use error::RouteError;
pub use matcher::{resolve, split_location, MatchResult, MatchSnapshot, RouteParams};
pub use pattern::{RoutePattern, Segment};
pub use route::{RouteDefinition, ViewHandle};
pub use table::RouteTable;

pub type Result<T> = std::result::Result<T, RouteError>;
