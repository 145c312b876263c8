//! Resource attribute source

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The resource of an authorization request: what is being acted on.
///
/// `data` is an opaque payload (the domain object the enforcement layer has
/// already fetched); predicates may reach into its fields through the
/// context. The engine itself never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Logical name of the resource (e.g. "note", "order").
    pub name: String,
    /// Names of sub-resources addressed by the request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_resource_names: Option<Vec<String>>,
    /// Opaque resource payload, populated by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Additional resource attributes keyed by name.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_resource_names: None,
            data: None,
            attributes: HashMap::new(),
        }
    }

    /// Creates a resource with an opaque data payload.
    pub fn with_data(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            sub_resource_names: None,
            data: Some(data),
            attributes: HashMap::new(),
        }
    }

    /// Adds or replaces an attribute.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}
