//! Action attribute source
//!
//! An action is the request the subject is trying to perform, seen as a
//! read-only HTTP request view plus a free-form attribute map. The view is
//! assembled by the enforcement layer; the engine never touches the network.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The action of an authorization request: what the subject is doing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// The HTTP request that triggered the action, if the enforcement layer
    /// runs in front of an HTTP service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<HttpRequest>,
    /// Additional action attributes keyed by name.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl Action {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an action from an already-captured HTTP request view.
    pub fn from_request(request: HttpRequest) -> Self {
        Self { request: Some(request), attributes: HashMap::new() }
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

/// Structured, read-only view of an HTTP request.
///
/// Headers and query parameters are multimaps because both may legally repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// HTTP method (GET, POST, …).
    pub method: String,
    /// Request path as matched by the service.
    pub path: String,
    /// Request headers; each name maps to every value it carried.
    #[serde(default)]
    pub headers: HashMap<String, Vec<String>>,
    /// Query parameters; each name maps to every value it carried.
    #[serde(default)]
    pub query: HashMap<String, Vec<String>>,
    /// Path variables bound by the route pattern.
    #[serde(default)]
    pub path_params: HashMap<String, String>,
    /// Parsed request body, if one was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Request cookies by name.
    #[serde(default)]
    pub cookies: HashMap<String, String>,
    /// Session attributes by name.
    #[serde(default)]
    pub session: HashMap<String, Value>,
    /// Transport-level request metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RequestMetadata>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), ..Self::default() }
    }

    /// First value of a header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// First value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).and_then(|v| v.first()).map(String::as_str)
    }
}

/// Transport metadata about the client connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    /// Request scheme (http, https).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Name of the server handling the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Port the server accepted the request on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,
    /// Client address as seen by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<String>,
}
