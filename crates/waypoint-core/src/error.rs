//! Router error types

use thiserror::Error;

/// Error returned by a route-change subscriber
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("No route matches {0}")]
    Unroutable(String),

    #[error("Route error: {0}")]
    Route(#[from] waypoint_routes::RouteError),

    #[error("History error: {0}")]
    History(#[from] waypoint_history::HistoryError),

    #[error("Route subscriber failed: {0}")]
    Subscriber(#[source] SubscriberError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
