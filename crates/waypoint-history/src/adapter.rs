//! History capability consumed by the router

/// Called with the new current path after a back/forward navigation
pub type PopListener = Box<dyn Fn(&str) + Send + Sync>;

/// Host navigation history.
///
/// Methods take `&self` so one adapter can be shared behind an `Arc`.
/// Implementations must not hold internal locks while invoking pop
/// listeners: a listener is expected to call back into `current_path`.
/// `push` and `replace` run while the router holds its state lock and must
/// not call back into the router.
pub trait HistoryAdapter: Send + Sync {
    /// Current location relative to the application base
    fn current_path(&self) -> String;

    /// Add a new entry, discarding any forward entries
    fn push(&self, path: &str);

    /// Overwrite the current entry
    fn replace(&self, path: &str);

    /// Register a listener for back/forward navigations
    fn on_popped(&self, listener: PopListener);
}
