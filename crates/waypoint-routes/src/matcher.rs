//! Path matching
//!
//! Resolution order:
//! 1. Split off `?query` and `#fragment`
//! 2. Segment the path, dropping empty trailing segments
//! 3. First non-catch-all route (declared order) whose segments all match
//! 4. Otherwise the catch-all route, binding nothing
//! 5. Otherwise no match
//!
//! Comparison is case-sensitive and nothing is percent-decoded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::pattern::Segment;
use crate::route::RouteDefinition;
use crate::table::RouteTable;

/// Parameter name → extracted value
pub type RouteParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    route: Arc<RouteDefinition>,
    params: RouteParams,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl MatchResult {
    pub fn route(&self) -> &Arc<RouteDefinition> {
        &self.route
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Matched path without query or fragment
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.route.name()
    }

    /// True when both results point at the same table entry
    pub fn same_route(&self, other: &MatchResult) -> bool {
        Arc::ptr_eq(&self.route, &other.route)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            name: self.route.name().map(str::to_string),
            pattern: self.route.pattern().as_str().to_string(),
            view: self.route.view().key().to_string(),
            catch_all: self.route.is_catch_all(),
            params: self.params.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

/// Serializable view of a match for hosts and logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub name: Option<String>,
    pub pattern: String,
    pub view: String,
    pub catch_all: bool,
    pub params: RouteParams,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

/// Split a location into path, query and fragment
pub fn split_location(location: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match location.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (location, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    (path, query, fragment)
}

fn path_segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<&str> = trimmed.split('/').collect();
    while segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

fn match_segments(route: &RouteDefinition, segments: &[&str]) -> Option<RouteParams> {
    let pattern = route.pattern().segments();
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Literal(literal) if literal == actual => {}
            Segment::Param(name) if !actual.is_empty() => {
                params.insert(name.clone(), actual.to_string());
            }
            _ => return None,
        }
    }

    Some(params)
}

/// Resolve a location against a route table
pub fn resolve(location: &str, table: &RouteTable) -> Option<MatchResult> {
    let (path, query, fragment) = split_location(location);
    let segments = path_segments(path);

    let matched = table
        .routes()
        .iter()
        .filter(|route| !route.is_catch_all())
        .find_map(|route| match_segments(route, &segments).map(|params| (route, params)))
        .or_else(|| table.catch_all().map(|route| (route, RouteParams::new())));

    let Some((route, params)) = matched else {
        tracing::debug!(path = %path, "No route matched");
        return None;
    };

    tracing::debug!(
        path = %path,
        route = %route.label(),
        catch_all = route.is_catch_all(),
        "Resolved route"
    );

    Some(MatchResult {
        route: Arc::clone(route),
        params,
        path: path.to_string(),
        query: query.map(str::to_string),
        fragment: fragment.map(str::to_string),
    })
}
