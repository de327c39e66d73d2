//! Waypoint History
//!
//! The boundary between the router and the host's navigation history.
//! The router is the only writer (`push`, `replace`); the host is the only
//! source of pop notifications (back/forward).

mod adapter;
mod error;
mod memory;

pub use adapter::{HistoryAdapter, PopListener};
pub use error::HistoryError;
pub use memory::{HistoryEntry, MemoryHistory};

pub type Result<T> = std::result::Result<T, HistoryError>;
