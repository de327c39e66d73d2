//! In-memory navigation history
//!
//! Behaves like a browser session history: a list of entries with a
//! cursor. `push` truncates forward entries, `replace` overwrites the
//! current one, and `back`/`forward`/`go` move the cursor and notify pop
//! listeners.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::adapter::{HistoryAdapter, PopListener};
use crate::error::HistoryError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Full location including the base prefix
    pub location: String,
    /// When the entry was pushed or last replaced
    pub written_at: DateTime<Utc>,
    /// Whether the entry was overwritten by `replace`
    pub replaced: bool,
}

impl HistoryEntry {
    fn new(location: String) -> Self {
        Self {
            location,
            written_at: Utc::now(),
            replaced: false,
        }
    }
}

struct Stack {
    entries: Vec<HistoryEntry>,
    position: usize,
}

type SharedListener = Arc<dyn Fn(&str) + Send + Sync>;

pub struct MemoryHistory {
    stack: Arc<RwLock<Stack>>,
    listeners: Arc<RwLock<Vec<SharedListener>>>,
    /// Normalized base: empty, or `/segment...` without trailing slash
    base: String,
}

impl MemoryHistory {
    /// Start with a single entry at `/`
    pub fn new() -> Self {
        Self::with_initial("/")
    }

    pub fn with_initial(location: impl Into<String>) -> Self {
        Self {
            stack: Arc::new(RwLock::new(Stack {
                entries: vec![HistoryEntry::new(location.into())],
                position: 0,
            })),
            listeners: Arc::new(RwLock::new(Vec::new())),
            base: String::new(),
        }
    }

    /// Seed the initial entry from an absolute URL
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| HistoryError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut location = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            location.push('?');
            location.push_str(query);
        }
        if let Some(fragment) = parsed.fragment() {
            location.push('#');
            location.push_str(fragment);
        }

        Ok(Self::with_initial(location))
    }

    /// Serve the application under a path prefix such as `/app`
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Self::normalize_base(base);
        self
    }

    fn normalize_base(base: &str) -> String {
        let trimmed = base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn strip_base<'a>(&self, location: &'a str) -> &'a str {
        if self.base.is_empty() {
            return location;
        }

        match location.strip_prefix(self.base.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with(['/', '?', '#']) => rest,
            _ => location,
        }
    }

    fn with_base_prefix(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.stack.read().entries.clone()
    }

    pub fn position(&self) -> usize {
        self.stack.read().position
    }

    pub fn len(&self) -> usize {
        self.stack.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.read().entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.position() > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let stack = self.stack.read();
        stack.position + 1 < stack.entries.len()
    }

    pub fn back(&self) -> Option<String> {
        self.go(-1)
    }

    pub fn forward(&self) -> Option<String> {
        self.go(1)
    }

    /// Move the cursor by `delta` entries and notify pop listeners.
    ///
    /// Out-of-range targets leave the history untouched and return `None`.
    pub fn go(&self, delta: isize) -> Option<String> {
        if delta == 0 {
            return None;
        }

        let path = {
            let mut stack = self.stack.write();
            let target = stack.position.checked_add_signed(delta)?;
            if target >= stack.entries.len() {
                return None;
            }
            stack.position = target;
            self.strip_base(&stack.entries[target].location).to_string()
        };

        tracing::debug!(delta, path = %path, "History popped");

        // Listeners may read or write the history, so call them unlocked
        let listeners: Vec<SharedListener> = self.listeners.read().clone();
        for listener in &listeners {
            listener(&path);
        }

        Some(path)
    }
}

impl HistoryAdapter for MemoryHistory {
    fn current_path(&self) -> String {
        let stack = self.stack.read();
        self.strip_base(&stack.entries[stack.position].location)
            .to_string()
    }

    fn push(&self, path: &str) {
        let location = self.with_base_prefix(path);
        let mut stack = self.stack.write();
        let keep = stack.position + 1;
        stack.entries.truncate(keep);
        stack.entries.push(HistoryEntry::new(location));
        stack.position = keep;
    }

    fn replace(&self, path: &str) {
        let location = self.with_base_prefix(path);
        let mut stack = self.stack.write();
        let position = stack.position;
        stack.entries[position] = HistoryEntry {
            replaced: true,
            ..HistoryEntry::new(location)
        };
    }

    fn on_popped(&self, listener: PopListener) {
        self.listeners.write().push(Arc::from(listener));
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryHistory {
    fn clone(&self) -> Self {
        Self {
            stack: Arc::clone(&self.stack),
            listeners: Arc::clone(&self.listeners),
            base: self.base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_push_and_replace() {
        let history = MemoryHistory::new();
        history.push("/presale");
        history.push("/mintusdc");
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_path(), "/mintusdc");

        history.replace("/presale");
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_path(), "/presale");
        assert!(history.entries()[2].replaced);
    }

    #[test]
    fn test_back_forward() {
        let history = MemoryHistory::new();
        history.push("/presale");
        history.push("/mintusdc");

        assert_eq!(history.back(), Some("/presale".to_string()));
        assert_eq!(history.back(), Some("/".to_string()));
        assert_eq!(history.back(), None);
        assert!(!history.can_go_back());

        assert_eq!(history.go(2), Some("/mintusdc".to_string()));
        assert_eq!(history.forward(), None);
        assert_eq!(history.go(-5), None);
        assert_eq!(history.position(), 2);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new();
        history.push("/presale");
        history.push("/mintusdc");
        history.back();
        history.back();

        history.push("/presale");
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_pop_listeners_notified() {
        let history = MemoryHistory::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(RwLock::new(Vec::new()));

        {
            let count = Arc::clone(&count);
            let seen = Arc::clone(&seen);
            let reader = history.clone();
            history.on_popped(Box::new(move |path| {
                count.fetch_add(1, Ordering::SeqCst);
                // Reading back inside the listener must not deadlock
                assert_eq!(reader.current_path(), path);
                seen.write().push(path.to_string());
            }));
        }

        history.push("/presale");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        history.back();
        history.forward();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.read(), vec!["/".to_string(), "/presale".to_string()]);
    }

    #[test]
    fn test_base_prefix() {
        let history = MemoryHistory::with_initial("/app/").with_base("app/");
        assert_eq!(history.base(), "/app");
        assert_eq!(history.current_path(), "/");

        history.push("/presale?ref=1");
        assert_eq!(history.entries()[1].location, "/app/presale?ref=1");
        assert_eq!(history.current_path(), "/presale?ref=1");

        // Locations outside the base are reported unchanged
        let outside = MemoryHistory::with_initial("/other").with_base("/app");
        assert_eq!(outside.current_path(), "/other");
        let sibling = MemoryHistory::with_initial("/application").with_base("/app");
        assert_eq!(sibling.current_path(), "/application");
    }

    #[test]
    fn test_from_url() {
        let history =
            MemoryHistory::from_url("https://mint.example.com/app/mintusdc?amount=10#form")
                .unwrap()
                .with_base("/app");
        assert_eq!(history.current_path(), "/mintusdc?amount=10#form");

        assert!(matches!(
            MemoryHistory::from_url("not a url"),
            Err(HistoryError::InvalidUrl { .. })
        ));
    }
}
