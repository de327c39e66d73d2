//! Router configuration
//!
//! The route table is declared as a list of (path, name, view) triples,
//! either in code via `Default` or loaded from JSON:
//!
//! ```json
//! {
//!   "base": "/app",
//!   "routes": [
//!     { "path": "/", "name": "Home", "view": "Home" },
//!     { "path": "/:catchAll(.*)", "view": "NotFound" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use waypoint_routes::{RouteDefinition, RouteTable, ViewHandle};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route pattern
    pub path: String,
    /// Unique route name, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Component key handed to the rendering layer
    pub view: String,
}

impl RouteConfig {
    pub fn new(path: &str, name: Option<&str>, view: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.map(str::to_string),
            view: view.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Path prefix the application is served under
    #[serde(default)]
    pub base: String,
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            routes = config.routes.len(),
            "Loaded router config"
        );
        Ok(config)
    }

    /// Build the route table, wrapping each view key in a named handle
    pub fn build_table(&self) -> Result<RouteTable> {
        self.build_table_with(|route| ViewHandle::named(route.view.clone()))
    }

    /// Build the route table with host-supplied view handles
    pub fn build_table_with<F>(&self, mut view_for: F) -> Result<RouteTable>
    where
        F: FnMut(&RouteConfig) -> ViewHandle,
    {
        let mut definitions = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            let mut definition = RouteDefinition::new(&route.path, view_for(route))?;
            if let Some(name) = &route.name {
                definition = definition.named(name.clone());
            }
            definitions.push(definition);
        }

        Ok(RouteTable::new(definitions)?)
    }
}

impl Default for RouterConfig {
    /// The application's routes: home, presale, USDC minting and a
    /// not-found fallback
    fn default() -> Self {
        Self {
            base: String::new(),
            routes: vec![
                RouteConfig::new("/", Some("Home"), "Home"),
                RouteConfig::new("/presale", Some("Presale"), "Presale"),
                RouteConfig::new("/mintusdc", Some("MintUsdc"), "MintUsdc"),
                RouteConfig::new("/:catchAll(.*)", None, "NotFound"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_routes::RouteError;

    #[test]
    fn test_default_table() {
        let table = RouterConfig::default().build_table().unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.get("Presale").is_some());
        assert!(table.get("MintUsdc").is_some());
        assert_eq!(table.catch_all().unwrap().view().key(), "NotFound");
    }

    #[test]
    fn test_from_json() {
        let config = RouterConfig::from_json_str(
            r#"{
                "base": "/app",
                "routes": [
                    { "path": "/", "name": "Home", "view": "Home" },
                    { "path": "/mint/:token", "name": "Mint", "view": "MintToken" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.base, "/app");
        assert_eq!(config.routes[1].view, "MintToken");

        let table = config.build_table().unwrap();
        assert!(table.catch_all().is_none());
        assert_eq!(
            table.resolve("/mint/usdc").unwrap().param("token"),
            Some("usdc")
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            RouterConfig::from_json_str("{ \"routes\": 3 }"),
            Err(crate::RouterError::Serialization(_))
        ));
    }

    #[test]
    fn test_duplicate_names_fail_table_build() {
        let config = RouterConfig {
            base: String::new(),
            routes: vec![
                RouteConfig::new("/a", Some("Same"), "A"),
                RouteConfig::new("/b", Some("Same"), "B"),
            ],
        };
        assert!(matches!(
            config.build_table(),
            Err(crate::RouterError::Route(RouteError::DuplicateRouteName(_)))
        ));
    }

    #[test]
    fn test_build_table_with_custom_handles() {
        let table = RouterConfig::default()
            .build_table_with(|route| ViewHandle::with_payload(route.view.clone(), route.path.len()))
            .unwrap();
        let presale = table.get("Presale").unwrap();
        assert_eq!(presale.view().downcast_ref::<usize>(), Some(&8));
    }
}
