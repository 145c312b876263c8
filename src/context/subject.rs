//! Subject attribute source

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subject of an authorization request: who is asking.
///
/// Carries the stable identity (`user_id`), the subject's roles in assignment
/// order, and a free-form attribute map for everything else (department,
/// clearance, tenant, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Identifier of the user or service principal.
    pub user_id: String,
    /// Roles assigned to the subject, in assignment order.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Additional subject attributes keyed by name.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl Subject {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), roles: Vec::new(), attributes: HashMap::new() }
    }

    /// Adds or replaces an attribute.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether the subject holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
