//! Navigation state
//!
//! Exactly one `NavigationState` exists per router. `current_path` and
//! `current_match` are always replaced together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use waypoint_routes::{MatchResult, MatchSnapshot};

/// How `navigate` writes to history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Push,
    Replace,
}

/// What produced a committed navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTrigger {
    /// First resolution of the history's current location
    Initial,
    Push,
    Replace,
    /// Back/forward navigation reported by the host
    Pop,
}

impl NavigationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationTrigger::Initial => "initial",
            NavigationTrigger::Push => "push",
            NavigationTrigger::Replace => "replace",
            NavigationTrigger::Pop => "pop",
        }
    }
}

impl From<NavigationMode> for NavigationTrigger {
    fn from(mode: NavigationMode) -> Self {
        match mode {
            NavigationMode::Push => NavigationTrigger::Push,
            NavigationMode::Replace => NavigationTrigger::Replace,
        }
    }
}

impl fmt::Display for NavigationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Location as requested, including any query or fragment
    pub current_path: String,
    pub current_match: MatchResult,
    /// Increments by one on every committed update
    pub sequence: u64,
    pub trigger: NavigationTrigger,
    pub navigated_at: DateTime<Utc>,
}

impl NavigationState {
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_path: self.current_path.clone(),
            current_match: self.current_match.snapshot(),
            sequence: self.sequence,
            trigger: self.trigger,
            navigated_at: self.navigated_at,
        }
    }
}

/// Serializable form of `NavigationState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub current_path: String,
    pub current_match: MatchSnapshot,
    pub sequence: u64,
    pub trigger: NavigationTrigger,
    pub navigated_at: DateTime<Utc>,
}
