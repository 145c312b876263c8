//! Environment attribute source

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ambient attributes that influence decisions but belong to neither the
/// subject nor the resource.
///
/// Split into two scopes: `global` attributes apply across the whole
/// deployment, `service` attributes are specific to the service the request
/// targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Deployment-wide attributes.
    #[serde(default)]
    pub global: HashMap<String, Value>,
    /// Service-specific attributes.
    #[serde(default)]
    pub service: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a deployment-wide attribute.
    pub fn add_global(&mut self, name: impl Into<String>, value: Value) {
        self.global.insert(name.into(), value);
    }

    /// Adds or replaces a service-specific attribute.
    pub fn add_service(&mut self, name: impl Into<String>, value: Value) {
        self.service.insert(name.into(), value);
    }

    /// Looks up a deployment-wide attribute.
    pub fn global_attr(&self, name: &str) -> Option<&Value> {
        self.global.get(name)
    }

    /// Looks up a service-specific attribute.
    pub fn service_attr(&self, name: &str) -> Option<&Value> {
        self.service.get(name)
    }
}
