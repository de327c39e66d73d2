//! Waypoint Core
//!
//! Navigation layer for the single-page app: maps a requested path to one
//! of a fixed set of views and keeps navigation history in step with the
//! displayed view. One `Router` owns the route table and the only
//! `NavigationState`; everything else reads through it.

mod config;
mod error;
mod router;
mod state;

pub use config::{RouteConfig, RouterConfig};
pub use error::{RouterError, SubscriberError};
pub use router::{Router, SubscriptionId};
pub use state::{NavigationMode, NavigationSnapshot, NavigationState, NavigationTrigger};

// Re-export the building blocks
pub use waypoint_history::{HistoryAdapter, HistoryEntry, HistoryError, MemoryHistory, PopListener};
pub use waypoint_routes::{
    MatchResult, MatchSnapshot, RouteDefinition, RouteError, RouteParams, RoutePattern,
    RouteTable, ViewHandle,
};

pub type Result<T> = std::result::Result<T, RouterError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
