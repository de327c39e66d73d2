//! Route table
//!
//! Built once at startup from an ordered list of definitions and never
//! mutated afterwards. Construction rejects duplicate names and more than
//! one catch-all route.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RouteError;
use crate::matcher::{self, MatchResult, RouteParams};
use crate::pattern::Segment;
use crate::route::RouteDefinition;
use crate::Result;

#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Definitions in declared order
    routes: Vec<Arc<RouteDefinition>>,
    /// Name → index into `routes`
    by_name: HashMap<String, usize>,
    /// Index of the catch-all definition, if any
    catch_all: Option<usize>,
}

impl RouteTable {
    pub fn new(definitions: Vec<RouteDefinition>) -> Result<Self> {
        let mut by_name = HashMap::new();
        let mut catch_all: Option<usize> = None;

        for (index, route) in definitions.iter().enumerate() {
            if let Some(name) = route.name() {
                if by_name.insert(name.to_string(), index).is_some() {
                    return Err(RouteError::DuplicateRouteName(name.to_string()));
                }
            }

            if route.is_catch_all() {
                if let Some(first) = catch_all {
                    return Err(RouteError::MultipleCatchAll {
                        first: definitions[first].label().to_string(),
                        second: route.label().to_string(),
                    });
                }
                catch_all = Some(index);
            }
        }

        tracing::debug!(
            routes = definitions.len(),
            has_catch_all = catch_all.is_some(),
            "Built route table"
        );

        Ok(Self {
            routes: definitions.into_iter().map(Arc::new).collect(),
            by_name,
            catch_all,
        })
    }

    pub fn routes(&self) -> &[Arc<RouteDefinition>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    pub fn catch_all(&self) -> Option<&Arc<RouteDefinition>> {
        self.catch_all.map(|index| &self.routes[index])
    }

    /// Resolve a location against this table
    pub fn resolve(&self, location: &str) -> Option<MatchResult> {
        matcher::resolve(location, self)
    }

    /// Build the path of a named route, substituting its parameters
    pub fn href_for(&self, name: &str, params: &RouteParams) -> Result<String> {
        let route = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRouteName(name.to_string()))?;

        if route.is_catch_all() {
            return Err(RouteError::UnbuildableRoute(name.to_string()));
        }

        let mut href = String::new();
        for segment in route.pattern().segments() {
            href.push('/');
            match segment {
                Segment::Literal(literal) => href.push_str(literal),
                Segment::Param(param) => {
                    let value = params.get(param).ok_or_else(|| RouteError::MissingParam {
                        route: name.to_string(),
                        param: param.clone(),
                    })?;
                    if value.is_empty() {
                        return Err(RouteError::EmptyParam {
                            route: name.to_string(),
                            param: param.clone(),
                        });
                    }
                    // A separator would change which route the href resolves to
                    if value.contains(['/', '?', '#']) {
                        return Err(RouteError::InvalidParam {
                            route: name.to_string(),
                            param: param.clone(),
                        });
                    }
                    href.push_str(value);
                }
                Segment::CatchAll(_) => return Err(RouteError::UnbuildableRoute(name.to_string())),
            }
        }

        if href.is_empty() {
            href.push('/');
        }

        Ok(href)
    }
}
