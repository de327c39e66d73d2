//! Route definitions and view handles

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::pattern::RoutePattern;
use crate::Result;

/// Opaque reference to the view a route activates.
///
/// The router never looks inside a handle. The rendering layer picks the
/// component either by `key()` or by downcasting the payload it stored.
#[derive(Clone)]
pub struct ViewHandle {
    key: Arc<str>,
    payload: Option<Arc<dyn Any + Send + Sync>>,
}

impl ViewHandle {
    pub fn named(key: impl Into<String>) -> Self {
        Self {
            key: Arc::from(key.into()),
            payload: None,
        }
    }

    pub fn with_payload<T: Any + Send + Sync>(key: impl Into<String>, payload: T) -> Self {
        Self {
            key: Arc::from(key.into()),
            payload: Some(Arc::new(payload)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref::<T>()
    }
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        let same_payload = match (&self.payload, &other.payload) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.key == other.key && same_payload
    }
}

impl Eq for ViewHandle {}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("key", &self.key)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pattern: RoutePattern,
    /// Optional unique identifier; empty names are stored as `None`
    name: Option<String>,
    view: ViewHandle,
}

impl RouteDefinition {
    pub fn new(pattern: &str, view: ViewHandle) -> Result<Self> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            name: None,
            view,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn view(&self) -> &ViewHandle {
        &self.view
    }

    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_catch_all()
    }

    /// Name if present, pattern otherwise (for logs and errors)
    pub fn label(&self) -> &str {
        self.name().unwrap_or_else(|| self.pattern.as_str())
    }
}
