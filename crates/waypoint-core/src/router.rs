//! Router
//!
//! Composes the route table, the matcher and the history adapter.
//!
//! ```text
//! navigate(path, mode)
//!   → resolve against RouteTable
//!   → commit NavigationState (path + match together) and
//!     history.push / history.replace under one lock
//!   → notify subscribers, in registration order
//!
//! history pop → resolve_current() → commit → notify
//! ```
//!
//! Everything runs synchronously on the caller's thread. No lock is held
//! while subscribers run, so a subscriber may navigate again; that nested
//! navigation completes before the outer call resumes notifying.

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use uuid::Uuid;

use waypoint_history::HistoryAdapter;
use waypoint_routes::{MatchResult, RouteParams, RouteTable};

use crate::config::RouterConfig;
use crate::error::{RouterError, SubscriberError};
use crate::state::{NavigationMode, NavigationState, NavigationTrigger};
use crate::Result;

type RouteListener = Arc<dyn Fn(&MatchResult) -> std::result::Result<(), SubscriberError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RouterInner {
    table: RouteTable,
    history: Arc<dyn HistoryAdapter>,
    state: RwLock<Option<NavigationState>>,
    subscribers: RwLock<Vec<(SubscriptionId, RouteListener)>>,
    listening: AtomicBool,
}

/// Cheap to clone; clones share the same table, history and state
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    pub fn new(table: RouteTable, history: Arc<dyn HistoryAdapter>) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                table,
                history,
                state: RwLock::new(None),
                subscribers: RwLock::new(Vec::new()),
                listening: AtomicBool::new(false),
            }),
        }
    }

    pub fn from_config(config: &RouterConfig, history: Arc<dyn HistoryAdapter>) -> Result<Self> {
        Ok(Self::new(config.build_table()?, history))
    }

    /// Listen for history pops and resolve the current location.
    ///
    /// The pop listener is installed once, however often this is called.
    pub fn start(&self) -> Result<MatchResult> {
        if !self.inner.listening.swap(true, Ordering::SeqCst) {
            let weak: Weak<RouterInner> = Arc::downgrade(&self.inner);
            self.inner.history.on_popped(Box::new(move |path| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                tracing::debug!(path = %path, "History pop received");
                if let Err(e) = (Router { inner }).resolve_current() {
                    tracing::error!(path = %path, error = %e, "Failed to resolve popped location");
                }
            }));
        }

        let result = self.resolve_current()?;
        tracing::info!(path = %result.path(), route = %result.route().label(), "Router started");
        Ok(result)
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    pub fn history(&self) -> &Arc<dyn HistoryAdapter> {
        &self.inner.history
    }

    /// Snapshot of the navigation state; `None` before the first commit
    pub fn state(&self) -> Option<NavigationState> {
        self.inner.state.read().clone()
    }

    pub fn current_route(&self) -> Option<MatchResult> {
        self.inner
            .state
            .read()
            .as_ref()
            .map(|state| state.current_match.clone())
    }

    /// Resolve `path`, commit it, write it to history and notify subscribers
    pub fn navigate(&self, path: &str, mode: NavigationMode) -> Result<MatchResult> {
        let result = self.resolve(path)?;

        self.commit(path, &result, mode.into(), Some(mode));
        self.notify(&result)?;
        Ok(result)
    }

    /// Navigate to a named route, filling in its parameters
    pub fn navigate_named(
        &self,
        name: &str,
        params: &RouteParams,
        mode: NavigationMode,
    ) -> Result<MatchResult> {
        let path = self.inner.table.href_for(name, params)?;
        self.navigate(&path, mode)
    }

    /// Resolve the history's current location and commit it without
    /// writing to history
    pub fn resolve_current(&self) -> Result<MatchResult> {
        let path = self.inner.history.current_path();
        let result = self.resolve(&path)?;

        let trigger = if self.inner.state.read().is_some() {
            NavigationTrigger::Pop
        } else {
            NavigationTrigger::Initial
        };

        self.commit(&path, &result, trigger, None);
        self.notify(&result)?;
        Ok(result)
    }

    /// Register a callback invoked after every committed navigation
    pub fn on_route_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&MatchResult) -> std::result::Result<(), SubscriberError> + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.inner.subscribers.write().push((id, Arc::new(callback)));
        tracing::debug!(subscription = %id, "Route subscriber added");
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    fn resolve(&self, path: &str) -> Result<MatchResult> {
        self.inner.table.resolve(path).ok_or_else(|| {
            tracing::warn!(path = %path, "Navigation to unroutable path");
            RouterError::Unroutable(path.to_string())
        })
    }

    /// Replace the state and, for `navigate`, write history under the same
    /// lock so clones on other threads never see the two disagree
    fn commit(
        &self,
        path: &str,
        result: &MatchResult,
        trigger: NavigationTrigger,
        write: Option<NavigationMode>,
    ) {
        let mut state = self.inner.state.write();
        let sequence = state.as_ref().map_or(1, |s| s.sequence + 1);

        *state = Some(NavigationState {
            current_path: path.to_string(),
            current_match: result.clone(),
            sequence,
            trigger,
            navigated_at: Utc::now(),
        });

        match write {
            Some(NavigationMode::Push) => self.inner.history.push(path),
            Some(NavigationMode::Replace) => self.inner.history.replace(path),
            None => {}
        }

        tracing::info!(
            path = %path,
            route = %result.route().label(),
            trigger = %trigger,
            sequence,
            "Navigation committed"
        );
    }

    /// Invoke every subscriber; the first failure is returned afterwards
    fn notify(&self, result: &MatchResult) -> Result<()> {
        let subscribers: Vec<(SubscriptionId, RouteListener)> =
            self.inner.subscribers.read().clone();

        let mut first_error = None;
        for (id, callback) in &subscribers {
            if let Err(e) = callback(result) {
                tracing::warn!(subscription = %id, error = %e, "Route subscriber failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(RouterError::Subscriber(e)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.table.len())
            .field("state", &*self.inner.state.read())
            .field("subscribers", &self.inner.subscribers.read().len())
            .finish()
    }
}
